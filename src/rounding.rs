//! Report Rounding
//!
//! Fixed decimal rounding applied to every figure that leaves this crate
//! in a report. Downstream consumers depend on these exact precisions:
//! 2 places for currency/kWh/CO2, 1 place for hours/ROI/payback, 3
//! places for failure rates.

/// Round to 1 decimal place (hours, ROI, payback days)
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to 2 decimal places (currency, kWh, CO2, minutes)
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 3 decimal places (failure rates)
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
