// Destinations for finished panels
use crate::error::EngineError;
use shared::models::{PanelOutcome, PanelReport};
use shared::utils::cagr_caption;
use std::io::Write;

pub trait PanelSink {
    fn push(&mut self, report: &PanelReport) -> Result<(), EngineError>;
}

impl PanelSink for Vec<PanelReport> {
    fn push(&mut self, report: &PanelReport) -> Result<(), EngineError> {
        Vec::push(self, report.clone());
        Ok(())
    }
}

/// Writes a one-line summary of every panel to the tracing subscriber.
#[derive(Debug, Default)]
pub struct LogSink;

impl PanelSink for LogSink {
    fn push(&mut self, report: &PanelReport) -> Result<(), EngineError> {
        match &report.outcome {
            PanelOutcome::Ready(panel) => {
                let years = panel.series.years();
                let caption = match (&panel.selected_growth, &panel.reference_growth) {
                    (None, None) => String::new(),
                    (selected, reference) => cagr_caption(
                        &panel.selected_name,
                        &panel.reference_name,
                        selected.as_ref(),
                        reference.as_ref(),
                    ),
                };
                tracing::info!(
                    panel = %report.panel,
                    title = %panel.title,
                    unit = %panel.unit_label,
                    rows = panel.series.len(),
                    first_year = ?years.first(),
                    last_year = ?years.last(),
                    caption = %caption,
                    "Panel ready"
                );
                if panel.suspicious_values {
                    tracing::warn!(panel = %report.panel, "Some values look suspiciously low or high. Check the data source.");
                }
            }
            PanelOutcome::NoData { reason } => {
                tracing::info!(panel = %report.panel, reason = %reason, "No data available for the selected territory");
            }
        }
        Ok(())
    }
}

/// Serializes each report as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PanelSink for JsonLinesSink<W> {
    fn push(&mut self, report: &PanelReport) -> Result<(), EngineError> {
        serde_json::to_writer(&mut self.writer, report)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::NoDataReason;

    fn no_data_report(panel: &str) -> PanelReport {
        PanelReport {
            panel: panel.to_string(),
            outcome: PanelOutcome::no_data(NoDataReason::LookupMiss { territory: "Nowhere".to_string() }),
        }
    }

    #[test]
    fn test_json_lines_sink_writes_one_line_per_report() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.push(&no_data_report("population")).unwrap();
        sink.push(&no_data_report("roi")).unwrap();
        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["panel"], "population");
        assert_eq!(first["status"], "no_data");
        assert_eq!(first["reason"]["territory"], "Nowhere");
    }

    #[test]
    fn test_vec_sink_collects_reports() {
        let mut reports: Vec<PanelReport> = Vec::new();
        PanelSink::push(&mut reports, &no_data_report("income")).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].panel, "income");
    }

    #[test]
    fn test_log_sink_accepts_every_outcome() {
        let mut sink = LogSink;
        assert!(sink.push(&no_data_report("income")).is_ok());
    }
}
