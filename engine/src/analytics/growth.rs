// Compound annual growth rate.
use shared::models::GrowthSummary;

/// `((end / start)^(1 / periods) - 1) * 100`, or `None` when that is not a real number.
///
/// Undefined for zero periods, a missing or NaN endpoint, a zero start, and
/// whenever `end / start` is negative (no real root for the general case).
pub fn compute_cagr(start: Option<f64>, end: Option<f64>, periods: usize) -> Option<f64> {
    let start = start.filter(|v| !v.is_nan())?;
    let end = end.filter(|v| !v.is_nan())?;
    if periods == 0 || start == 0.0 {
        return None;
    }
    let ratio = end / start;
    if ratio < 0.0 || !ratio.is_finite() {
        return None;
    }
    let cagr = (ratio.powf(1.0 / periods as f64) - 1.0) * 100.0;
    cagr.is_finite().then_some(cagr)
}

/// Growth from the first to the last value; `None` for an empty slice.
pub fn growth_summary(values: &[f64]) -> Option<GrowthSummary> {
    let start_value = *values.first()?;
    let end_value = *values.last()?;
    let period_count = values.len() - 1;
    Some(GrowthSummary {
        start_value,
        end_value,
        period_count,
        cagr_percent: compute_cagr(Some(start_value), Some(end_value), period_count),
    })
}
