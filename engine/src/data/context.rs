// Read-only view over every loaded statistical table.
use crate::config::DashboardSettings;
use crate::data::csv_parser::StatTableParser;
use crate::error::EngineError;
use shared::models::{DatasetKind, RawSeries};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct TerritoryRow {
    pub territory: String,
    pub location_type: String,
    pub series: RawSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatTable {
    pub kind: DatasetKind,
    pub year_labels: Vec<String>,
    pub rows: Vec<TerritoryRow>,
}

impl StatTable {
    /// First row for the territory, compared exactly.
    pub fn row(&self, territory: &str) -> Option<&TerritoryRow> {
        self.rows.iter().find(|row| row.territory == territory)
    }
}

/// Built once at startup and passed by reference into every panel run.
#[derive(Debug, Default)]
pub struct DataContext {
    tables: HashMap<DatasetKind, StatTable>,
}

impl DataContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: impl IntoIterator<Item = StatTable>) -> Self {
        let mut context = DataContext::new();
        for table in tables {
            context.insert(table);
        }
        context
    }

    pub fn load(settings: &DashboardSettings) -> Result<Self, EngineError> {
        let parser = StatTableParser::from_settings(settings);
        let mut context = DataContext::new();
        for kind in DatasetKind::ALL {
            let path = settings.dataset_path(kind);
            let table = parser.load_from_path(kind, &path).map_err(|e| {
                tracing::error!(dataset = %kind, path = %path.display(), error_detail = %e, "Failed to load dataset");
                e
            })?;
            context.insert(table);
        }
        Ok(context)
    }

    pub fn insert(&mut self, table: StatTable) {
        if self.tables.insert(table.kind, table).is_some() {
            tracing::debug!("Replaced previously loaded table");
        }
    }

    /// `None` when the dataset is not loaded or has no row for the territory.
    pub fn series(&self, kind: DatasetKind, territory: &str) -> Option<&RawSeries> {
        self.tables
            .get(&kind)
            .and_then(|table| table.row(territory))
            .map(|row| &row.series)
    }

    /// Selectable territories: the sorted, de-duplicated names of the population table.
    pub fn territories(&self) -> Vec<String> {
        self.tables
            .get(&DatasetKind::Population)
            .map(|table| {
                table
                    .rows
                    .iter()
                    .map(|row| row.territory.clone())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Cell;
    use std::fs;

    fn table(kind: DatasetKind, rows: &[(&str, f64)]) -> StatTable {
        StatTable {
            kind,
            year_labels: vec!["2019".to_string()],
            rows: rows
                .iter()
                .map(|(territory, value)| TerritoryRow {
                    territory: territory.to_string(),
                    location_type: "Districte".to_string(),
                    series: vec![("2019", Cell::Value(*value))].into_iter().collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_series_lookup_first_row_wins() {
        let ctx = DataContext::from_tables(vec![table(
            DatasetKind::Population,
            &[("Gràcia", 1.0), ("Gràcia", 2.0)],
        )]);
        let series = ctx.series(DatasetKind::Population, "Gràcia").unwrap();
        assert_eq!(series.get("2019"), Some(Cell::Value(1.0)));
    }

    #[test]
    fn test_series_lookup_miss() {
        let ctx = DataContext::from_tables(vec![table(DatasetKind::Population, &[("Gràcia", 1.0)])]);
        assert!(ctx.series(DatasetKind::Population, "gràcia").is_none());
        assert!(ctx.series(DatasetKind::Income, "Gràcia").is_none());
    }

    #[test]
    fn test_territories_sorted_unique() {
        let ctx = DataContext::from_tables(vec![table(
            DatasetKind::Population,
            &[("Sants-Montjuïc", 1.0), ("Barcelona", 2.0), ("Eixample", 3.0), ("Barcelona", 4.0)],
        )]);
        assert_eq!(ctx.territories(), vec!["Barcelona", "Eixample", "Sants-Montjuïc"]);
        assert!(DataContext::new().territories().is_empty());
    }

    #[test]
    fn test_load_reads_every_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = DashboardSettings::default();
        settings.data_dir = dir.path().to_path_buf();
        for kind in DatasetKind::ALL {
            let path = settings.dataset_path(kind);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "Territory,Location type,2019\nBarcelona,Municipi,7\n").unwrap();
        }

        let ctx = DataContext::load(&settings).unwrap();
        for kind in DatasetKind::ALL {
            assert_eq!(ctx.series(kind, "Barcelona").unwrap().get("2019"), Some(Cell::Value(7.0)));
        }
    }

    #[test]
    fn test_load_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = DashboardSettings::default();
        settings.data_dir = dir.path().to_path_buf();
        assert!(matches!(DataContext::load(&settings), Err(EngineError::IoError { .. })));
    }
}
