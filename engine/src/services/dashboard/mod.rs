// Dashboard service: the configured panels and one evaluation per interaction.
//
// Every panel runs the same pipeline against its own source. Panels share only
// the read-only DataContext, so they are evaluated one after another.
use crate::analytics::{DatasetSource, RoiSource};
use crate::config::DashboardSettings;
use crate::data::DataContext;
use crate::error::EngineError;
use shared::models::{DatasetKind, PanelReport, SeriesMode};

pub mod panel_config;
pub mod run_panel;
pub mod sink;

pub use panel_config::{PanelConfig, PanelConfigBuilder, DEFAULT_REFERENCE_TERRITORY};
pub use run_panel::{run_panel, MIN_ALIGNED_ROWS};
pub use sink::{JsonLinesSink, LogSink, PanelSink};

/// The caller's current choice of territory and display mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub territory: String,
    pub show_relative_change: bool,
}

impl Selection {
    pub fn new(territory: impl Into<String>) -> Self {
        Selection {
            territory: territory.into(),
            show_relative_change: false,
        }
    }

    pub fn relative_change(mut self, enabled: bool) -> Self {
        self.show_relative_change = enabled;
        self
    }

    pub fn mode(&self) -> SeriesMode {
        if self.show_relative_change {
            SeriesMode::RelativeChange
        } else {
            SeriesMode::Absolute
        }
    }
}

/// The six panels of the district dashboard.
pub fn default_panels(settings: &DashboardSettings) -> Result<Vec<PanelConfig>, EngineError> {
    let reference = settings.reference_territory.as_str();
    let dataset = |id: &str, kind: DatasetKind, title: &str, unit: &str| {
        PanelConfig::builder(id, DatasetSource::new(kind))
            .title(title)
            .unit_label(unit)
            .reference_territory(reference)
    };

    vec![
        dataset("population", DatasetKind::Population, "Population", "Population"),
        dataset(
            "unemployment",
            DatasetKind::Unemployment,
            "Unemployment",
            "Number of Unemployed Persons",
        ),
        dataset("income", DatasetKind::Income, "Income", "Mean Gross Income (€)"),
        dataset(
            "transactions",
            DatasetKind::Transactions,
            "Transactions",
            "Number of Transactions",
        ),
        dataset(
            "transaction_price",
            DatasetKind::TransactionPrice,
            "Transaction Price",
            "Avg. Transaction Price (€/m²)",
        )
        .plausible_range(500.0, 20000.0),
        PanelConfig::builder("roi", RoiSource::default())
            .title("ROI")
            .unit_label("ROI (%)")
            .reference_territory(reference),
    ]
    .into_iter()
    .map(PanelConfigBuilder::build)
    .collect()
}

pub struct Dashboard {
    panels: Vec<PanelConfig>,
}

impl Dashboard {
    pub fn new(panels: Vec<PanelConfig>) -> Self {
        Dashboard { panels }
    }

    pub fn from_settings(settings: &DashboardSettings) -> Result<Self, EngineError> {
        Ok(Self::new(default_panels(settings)?))
    }

    pub fn panels(&self) -> &[PanelConfig] {
        &self.panels
    }

    pub fn evaluate(&self, ctx: &DataContext, selection: &Selection) -> Vec<PanelReport> {
        tracing::info!(
            territory = %selection.territory,
            relative_change = selection.show_relative_change,
            panels = self.panels.len(),
            "Evaluating dashboard"
        );
        self.panels
            .iter()
            .map(|panel| PanelReport {
                panel: panel.id().to_string(),
                outcome: run_panel(ctx, panel, selection),
            })
            .collect()
    }

    /// Evaluates every panel and pushes the results into `sink`, in panel order.
    pub fn render(&self, ctx: &DataContext, selection: &Selection, sink: &mut dyn PanelSink) -> Result<usize, EngineError> {
        let reports = self.evaluate(ctx, selection);
        for report in &reports {
            sink.push(report)?;
        }
        Ok(reports.len())
    }
}
