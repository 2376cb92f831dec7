// Single-panel pipeline: resolve, align, transform, summarize
use super::panel_config::PanelConfig;
use super::Selection;
use crate::analytics::{align, growth_summary, relative_change};
use crate::data::DataContext;
use shared::models::{AlignedSeries, NoDataReason, PanelOutcome, PanelSeries, SeriesMode};

/// A chart needs at least two aligned years.
pub const MIN_ALIGNED_ROWS: usize = 2;

pub const RELATIVE_CHANGE_UNIT: &str = "Relative Change (%)";
pub const RELATIVE_CHANGE_SUFFIX: &str = " (Relative Change)";

fn outside(range: (f64, f64), value: f64) -> bool {
    value < range.0 || value > range.1
}

fn has_suspicious_values(series: &AlignedSeries, range: Option<(f64, f64)>) -> bool {
    range.map_or(false, |range| {
        series
            .rows()
            .iter()
            .any(|row| outside(range, row.selected) || outside(range, row.reference))
    })
}

pub fn run_panel(ctx: &DataContext, panel: &PanelConfig, selection: &Selection) -> PanelOutcome {
    tracing::debug!(
        panel = %panel.id(),
        source = %panel.source().name(),
        parameters = %panel.source().parameters(),
        territory = %selection.territory,
        mode = ?selection.mode(),
        "Running panel"
    );

    let reference_name = panel.reference_territory();
    let selected_raw = match panel.source().resolve(ctx, &selection.territory) {
        Some(series) => series,
        None => {
            tracing::debug!(panel = %panel.id(), territory = %selection.territory, "Selected territory not found");
            return PanelOutcome::no_data(NoDataReason::LookupMiss {
                territory: selection.territory.clone(),
            });
        }
    };
    let reference_raw = match panel.source().resolve(ctx, reference_name) {
        Some(series) => series,
        None => {
            tracing::warn!(panel = %panel.id(), territory = %reference_name, "Reference territory not found");
            return PanelOutcome::no_data(NoDataReason::LookupMiss {
                territory: reference_name.to_string(),
            });
        }
    };

    let absolute = align(&selected_raw, &reference_raw);
    let suspicious_values = has_suspicious_values(&absolute, panel.plausible_range());
    if suspicious_values {
        tracing::warn!(
            panel = %panel.id(),
            territory = %selection.territory,
            range = ?panel.plausible_range(),
            "Some values look suspiciously low or high"
        );
    }

    let mode = selection.mode();
    let series = match mode {
        SeriesMode::Absolute => absolute,
        SeriesMode::RelativeChange => relative_change(&absolute),
    };

    if series.len() < MIN_ALIGNED_ROWS {
        tracing::debug!(panel = %panel.id(), rows = series.len(), "Not enough aligned years");
        return PanelOutcome::no_data(NoDataReason::AlignmentEmpty {
            rows: series.len(),
            suspicious_values,
        });
    }

    let (selected_growth, reference_growth, title_suffix, unit_label) = match mode {
        SeriesMode::Absolute => (
            growth_summary(&series.selected_values()),
            growth_summary(&series.reference_values()),
            "",
            panel.unit_label(),
        ),
        SeriesMode::RelativeChange => (None, None, RELATIVE_CHANGE_SUFFIX, RELATIVE_CHANGE_UNIT),
    };

    PanelOutcome::Ready(PanelSeries {
        title: format!("{} in {}{}", panel.title(), selection.territory, title_suffix),
        unit_label: unit_label.to_string(),
        selected_name: selection.territory.clone(),
        reference_name: reference_name.to_string(),
        mode,
        series,
        selected_growth,
        reference_growth,
        suspicious_values,
    })
}
