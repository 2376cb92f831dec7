// Dashboard settings, loaded from an optional JSON file. Every field has a default.
use crate::error::EngineError;
use serde::Deserialize;
use shared::models::DatasetKind;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardSettings {
    pub data_dir: PathBuf,
    pub reference_territory: String,
    /// Rows whose `Location type` is not listed here are skipped at load.
    pub location_types: Vec<String>,
    pub missing_marker: String,
    pub datasets: DatasetPaths,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            data_dir: PathBuf::from("data"),
            reference_territory: "Barcelona".to_string(),
            location_types: vec!["Districte".to_string(), "Municipi".to_string()],
            missing_marker: "-".to_string(),
            datasets: DatasetPaths::default(),
        }
    }
}

/// Table locations relative to `data_dir`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DatasetPaths {
    pub population: PathBuf,
    pub unemployment: PathBuf,
    pub income: PathBuf,
    pub transactions: PathBuf,
    pub rental_price: PathBuf,
    pub transaction_price: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        DatasetPaths {
            population: PathBuf::from("population/Statistical table.csv"),
            unemployment: PathBuf::from("unemployment/Statistical table.csv"),
            income: PathBuf::from("Mean gross income per person (€)/Statistical table.csv"),
            transactions: PathBuf::from("number of transactions/Statistical table.csv"),
            rental_price: PathBuf::from("average rental price per area (€_m²)/Statistical table.csv"),
            transaction_price: PathBuf::from(
                "average transaction price per surface area (€_m²)/Statistical table.csv",
            ),
        }
    }
}

impl DatasetPaths {
    pub fn path_for(&self, kind: DatasetKind) -> &Path {
        match kind {
            DatasetKind::Population => &self.population,
            DatasetKind::Unemployment => &self.unemployment,
            DatasetKind::Income => &self.income,
            DatasetKind::Transactions => &self.transactions,
            DatasetKind::RentalPrice => &self.rental_price,
            DatasetKind::TransactionPrice => &self.transaction_price,
        }
    }
}

impl DashboardSettings {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let settings: DashboardSettings = serde_json::from_str(&raw)?;
        settings.validate()?;
        tracing::debug!(path = %path.display(), "Loaded dashboard settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.reference_territory.trim().is_empty() {
            return Err(EngineError::ConfigError("reference_territory must not be empty".to_string()));
        }
        if self.location_types.is_empty() {
            return Err(EngineError::ConfigError("location_types must list at least one type".to_string()));
        }
        Ok(())
    }

    pub fn dataset_path(&self, kind: DatasetKind) -> PathBuf {
        self.data_dir.join(self.datasets.path_for(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_settings(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.reference_territory, "Barcelona");
        assert_eq!(settings.location_types, vec!["Districte", "Municipi"]);
        assert_eq!(
            settings.dataset_path(DatasetKind::Population),
            PathBuf::from("data/population/Statistical table.csv")
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_settings(r#"{ "data_dir": "/srv/stats", "datasets": { "income": "income.csv" } }"#);
        let settings = DashboardSettings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/srv/stats"));
        assert_eq!(settings.missing_marker, "-");
        assert_eq!(settings.dataset_path(DatasetKind::Income), PathBuf::from("/srv/stats/income.csv"));
        assert_eq!(
            settings.datasets.unemployment,
            PathBuf::from("unemployment/Statistical table.csv")
        );
    }

    #[test]
    fn test_empty_reference_rejected() {
        let file = write_settings(r#"{ "reference_territory": " " }"#);
        let err = DashboardSettings::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }

    #[test]
    fn test_malformed_file() {
        let file = write_settings("{ not json");
        let err = DashboardSettings::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::JsonError { .. }));
    }
}
