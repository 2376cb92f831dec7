// A territory's row of a single statistical table
use super::SeriesSource;
use crate::data::DataContext;
use serde_json::Value;
use shared::models::{DatasetKind, RawSeries};
use std::borrow::Cow;

pub struct DatasetSource {
    name: String,
    kind: DatasetKind,
}

impl DatasetSource {
    pub fn new(kind: DatasetKind) -> Self {
        Self {
            name: format!("Dataset({})", kind),
            kind,
        }
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }
}

impl SeriesSource for DatasetSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "dataset": self.kind })
    }

    fn resolve<'a>(&self, ctx: &'a DataContext, territory: &str) -> Option<Cow<'a, RawSeries>> {
        ctx.series(self.kind, territory).map(Cow::Borrowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{StatTable, TerritoryRow};
    use shared::models::Cell;

    fn context() -> DataContext {
        DataContext::from_tables(vec![StatTable {
            kind: DatasetKind::Unemployment,
            year_labels: vec!["2020".to_string()],
            rows: vec![TerritoryRow {
                territory: "Horta-Guinardó".to_string(),
                location_type: "Districte".to_string(),
                series: vec![("2020", Cell::Value(9321.0))].into_iter().collect(),
            }],
        }])
    }

    #[test]
    fn test_resolve_borrows_table_row() {
        let ctx = context();
        let source = DatasetSource::new(DatasetKind::Unemployment);
        let series = source.resolve(&ctx, "Horta-Guinardó").unwrap();
        assert!(matches!(series, Cow::Borrowed(_)));
        assert_eq!(series.get("2020"), Some(Cell::Value(9321.0)));
    }

    #[test]
    fn test_resolve_miss() {
        let ctx = context();
        assert!(DatasetSource::new(DatasetKind::Unemployment).resolve(&ctx, "Nowhere").is_none());
        assert!(DatasetSource::new(DatasetKind::Income).resolve(&ctx, "Horta-Guinardó").is_none());
    }

    #[test]
    fn test_name_and_parameters() {
        let source = DatasetSource::new(DatasetKind::TransactionPrice);
        assert_eq!(source.name(), "Dataset(transaction_price)");
        assert_eq!(source.parameters(), serde_json::json!({ "dataset": "transaction_price" }));
        assert_eq!(source.kind(), DatasetKind::TransactionPrice);
    }
}
