// Display helpers shared by the engine sinks and any front end.
use crate::models::GrowthSummary;

pub const UNDEFINED_LABEL: &str = "undefined";

/// Formats a growth rate with two decimals, or "undefined".
pub fn format_cagr(cagr_percent: Option<f64>) -> String {
    match cagr_percent {
        Some(value) if value.is_finite() => format!("{:.2}%", value),
        _ => UNDEFINED_LABEL.to_string(),
    }
}

fn cagr_of(growth: Option<&GrowthSummary>) -> Option<f64> {
    growth.and_then(|g| g.cagr_percent)
}

/// Chart caption comparing the selected territory's CAGR with the reference one.
/// When both are the same territory only one figure is shown.
pub fn cagr_caption(
    selected_name: &str,
    reference_name: &str,
    selected: Option<&GrowthSummary>,
    reference: Option<&GrowthSummary>,
) -> String {
    if selected_name == reference_name {
        format!("CAGR: {}", format_cagr(cagr_of(selected)))
    } else {
        format!(
            "CAGR: {} vs {}: {}",
            format_cagr(cagr_of(selected)),
            reference_name,
            format_cagr(cagr_of(reference))
        )
    }
}
