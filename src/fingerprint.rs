//! Finding Fingerprints
//!
//! Stable identities for technical-debt findings, and order-preserving
//! deduplication built on them.
//!
//! A fingerprint lets the same logical finding be recognised across runs
//! and across tools. When an upstream code-quality tool already supplies
//! one, it is reused verbatim so identity continuity survives the
//! hand-off; otherwise one is derived from the finding's defining
//! attributes.

use std::collections::HashSet;
use std::fmt::Write;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of a derived fingerprint in hex characters
///
/// 64 bits of a SHA-256 digest. Truncation trades collision resistance
/// for human readability; at realistic finding volumes the collision
/// probability is negligible.
pub const FINGERPRINT_LEN: usize = 16;

/// A single raw technical-debt observation, prior to deduplication
///
/// Field positions are load-bearing for identity: a missing field hashes
/// as an empty string in its slot rather than being omitted, so two
/// findings that differ only in *which* field is missing get distinct
/// fingerprints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Debt category, e.g. "high_complexity"
    #[serde(rename = "type", default)]
    pub debt_type: String,
    /// File the finding applies to
    #[serde(default)]
    pub file: String,
    /// Line range, e.g. "45-120"
    #[serde(default)]
    pub lines: String,
    /// Rule that produced the finding, e.g. "cyclomatic_complexity"
    #[serde(default)]
    pub rule_id: String,
    /// Fingerprint supplied by an upstream code-quality tool, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_quality_fingerprint: Option<String>,
    /// Derived identity, stamped by [`deduplicate`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Compute the stable fingerprint for a finding
///
/// An externally supplied fingerprint wins unchanged. Otherwise the
/// fingerprint is the first [`FINGERPRINT_LEN`] hex characters of
/// `sha256(type|file|lines|rule_id)`.
pub fn fingerprint(finding: &Finding) -> String {
    if let Some(external) = &finding.code_quality_fingerprint {
        if !external.is_empty() {
            return external.clone();
        }
    }

    let joined = [
        finding.debt_type.as_str(),
        finding.file.as_str(),
        finding.lines.as_str(),
        finding.rule_id.as_str(),
    ]
    .join("|");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    let mut hex = hex_digest(&hasher.finalize());
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// Remove duplicate findings, keeping the first occurrence of each
/// fingerprint
///
/// Survivors are stamped with their computed fingerprint and returned in
/// their original relative order. This is the only mutation ever applied
/// to a finding.
pub fn deduplicate(findings: Vec<Finding>) -> Vec<Finding> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for mut finding in findings {
        let fp = fingerprint(&finding);
        if seen.insert(fp.clone()) {
            finding.fingerprint = Some(fp);
            unique.push(finding);
        }
    }

    unique
}

fn hex_digest(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(&mut out, "{:02x}", byte);
    }
    out
}
