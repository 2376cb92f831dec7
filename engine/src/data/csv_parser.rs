use crate::config::DashboardSettings;
use crate::data::context::{StatTable, TerritoryRow};
use crate::error::EngineError;
use csv::{ReaderBuilder, StringRecord};
use shared::models::{Cell, DatasetKind, RawSeries};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const TERRITORY_COLUMN: &str = "Territory";
pub const LOCATION_TYPE_COLUMN: &str = "Location type";

// Cell-level conventions of the statistical tables.
pub mod stat_format {
    use anyhow::{anyhow, Result};
    use shared::models::Cell;
    use std::str::FromStr;

    /// Parses one table cell. Blank cells and the missing marker are `Missing`;
    /// anything that is not a finite number is an error for the caller to handle.
    pub fn parse_cell(s: &str, missing_marker: &str) -> Result<Cell> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == missing_marker {
            return Ok(Cell::Missing);
        }
        let value = f64::from_str(trimmed).map_err(|e| anyhow!("Failed to parse number '{}': {}", s, e))?;
        if !value.is_finite() {
            return Err(anyhow!("Non-finite number '{}'", s));
        }
        Ok(Cell::Value(value))
    }

}

/// Reads the pre-tabulated statistical CSV files into typed rows.
pub struct StatTableParser {
    missing_marker: String,
    location_types: Vec<String>,
}

impl StatTableParser {
    pub fn new(missing_marker: impl Into<String>, location_types: Vec<String>) -> Self {
        StatTableParser {
            missing_marker: missing_marker.into(),
            location_types,
        }
    }

    pub fn from_settings(settings: &DashboardSettings) -> Self {
        Self::new(settings.missing_marker.clone(), settings.location_types.clone())
    }

    pub fn load_from_path(&self, kind: DatasetKind, path: &Path) -> Result<StatTable, EngineError> {
        let file = File::open(path)?;
        tracing::debug!(dataset = %kind, path = %path.display(), "Loading statistical table");
        self.load_from_reader(kind, BufReader::new(file))
    }

    // Header: Territory,Location type,<year label>,<year label>,...
    // Example row: Eixample,Districte,266416,-,268184
    pub fn load_from_reader<R: Read>(&self, kind: DatasetKind, reader: R) -> Result<StatTable, EngineError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = rdr.headers()?.clone();

        let territory_pos = Self::column_position(&headers, TERRITORY_COLUMN)?;
        let location_pos = Self::column_position(&headers, LOCATION_TYPE_COLUMN)?;
        let year_columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(pos, _)| *pos != territory_pos && *pos != location_pos)
            .map(|(pos, label)| (pos, label.to_string()))
            .collect();

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        let mut coerced = 0usize;

        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2;

            let location_type = record.get(location_pos).unwrap_or_default();
            if !self.location_types.iter().any(|allowed| allowed == location_type) {
                skipped += 1;
                continue;
            }
            let territory = record.get(territory_pos).unwrap_or_default();

            let mut series = RawSeries::new();
            for (pos, label) in &year_columns {
                let raw = record.get(*pos).unwrap_or_default();
                let cell = match stat_format::parse_cell(raw, &self.missing_marker) {
                    Ok(cell) => cell,
                    Err(e) => {
                        coerced += 1;
                        tracing::warn!(
                            dataset = %kind,
                            line,
                            territory = %territory,
                            column = %label,
                            error_detail = %e,
                            "Non-numeric cell treated as missing"
                        );
                        Cell::Missing
                    }
                };
                series.push(label.clone(), cell);
            }

            rows.push(TerritoryRow {
                territory: territory.to_string(),
                location_type: location_type.to_string(),
                series,
            });
        }

        tracing::info!(
            dataset = %kind,
            rows = rows.len(),
            skipped_rows = skipped,
            coerced_cells = coerced,
            year_columns = year_columns.len(),
            "Statistical table loaded"
        );

        Ok(StatTable {
            kind,
            year_labels: year_columns.into_iter().map(|(_, label)| label).collect(),
            rows,
        })
    }

    fn column_position(headers: &StringRecord, name: &str) -> Result<usize, EngineError> {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| EngineError::CsvDataFormatError(format!("Missing '{}' column in header", name)))
    }
}
