// Return on investment: annual rent over purchase price, both per m²
use super::SeriesSource;
use crate::data::DataContext;
use serde_json::Value;
use shared::models::{Cell, DatasetKind, RawSeries};
use std::borrow::Cow;
use std::collections::HashSet;

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// `monthly_rent * 12 / price * 100` for every label present in both rows.
///
/// Runs on raw labels, before year canonicalization, in the rent row's
/// column order. A missing operand, a zero price or any non-finite result
/// becomes `Cell::Missing`.
pub fn derive_roi(monthly_rent: &RawSeries, price_per_area: &RawSeries) -> RawSeries {
    let mut seen = HashSet::new();
    monthly_rent
        .iter()
        .filter(|entry| seen.insert(entry.label.as_str()))
        .filter_map(|entry| {
            let price = price_per_area.get(&entry.label)?;
            let roi = match (entry.cell.as_f64(), price.as_f64()) {
                (Some(rent), Some(price)) => Some(rent * MONTHS_PER_YEAR / price * 100.0),
                _ => None,
            };
            Some((entry.label.clone(), Cell::from(roi)))
        })
        .collect()
}

pub struct RoiSource {
    name: String,
    rent: DatasetKind,
    price: DatasetKind,
}

impl RoiSource {
    pub fn new(rent: DatasetKind, price: DatasetKind) -> Self {
        Self {
            name: format!("ROI({}/{})", rent, price),
            rent,
            price,
        }
    }
}

impl Default for RoiSource {
    fn default() -> Self {
        Self::new(DatasetKind::RentalPrice, DatasetKind::TransactionPrice)
    }
}

impl SeriesSource for RoiSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "rent": self.rent, "price": self.price, "months": MONTHS_PER_YEAR })
    }

    fn resolve<'a>(&self, ctx: &'a DataContext, territory: &str) -> Option<Cow<'a, RawSeries>> {
        let rent = ctx.series(self.rent, territory)?;
        let price = ctx.series(self.price, territory)?;
        Some(Cow::Owned(derive_roi(rent, price)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{StatTable, TerritoryRow};

    fn raw(entries: &[(&str, Option<f64>)]) -> RawSeries {
        entries.iter().map(|(label, value)| (*label, Cell::from(*value))).collect()
    }

    #[test]
    fn test_derive_roi() {
        let rent = raw(&[("2018", Some(15.0)), ("2019", Some(16.0))]);
        let price = raw(&[("2018", Some(4000.0)), ("2019", Some(4800.0))]);
        let roi = derive_roi(&rent, &price);
        assert_eq!(roi.len(), 2);
        assert!((roi.get("2018").unwrap().as_f64().unwrap() - 4.5).abs() < 1e-9);
        assert!((roi.get("2019").unwrap().as_f64().unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_derive_roi_zero_price_is_missing() {
        let rent = raw(&[("2018", Some(15.0)), ("2019", Some(16.0)), ("2020", Some(0.0))]);
        let price = raw(&[("2018", Some(0.0)), ("2019", Some(4800.0)), ("2020", Some(0.0))]);
        let roi = derive_roi(&rent, &price);
        assert_eq!(roi.get("2018"), Some(Cell::Missing));
        assert_eq!(roi.get("2020"), Some(Cell::Missing));
        assert!(roi.get("2019").unwrap().as_f64().is_some());
    }

    #[test]
    fn test_derive_roi_label_intersection() {
        let rent = raw(&[("2017", Some(14.0)), ("2018", None), ("2019", Some(16.0)), ("2019", Some(99.0))]);
        let price = raw(&[("2018", Some(4000.0)), ("2019", Some(4800.0)), ("2020", Some(5000.0))]);
        let roi = derive_roi(&rent, &price);
        let labels: Vec<&str> = roi.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(labels, vec!["2018", "2019"]);
        assert_eq!(roi.get("2018"), Some(Cell::Missing));
        assert!((roi.get("2019").unwrap().as_f64().unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_roi_source_requires_both_tables() {
        let row = |territory: &str, value: f64| TerritoryRow {
            territory: territory.to_string(),
            location_type: "Districte".to_string(),
            series: raw(&[("2019", Some(value))]),
        };
        let ctx = DataContext::from_tables(vec![
            StatTable { kind: DatasetKind::RentalPrice, year_labels: vec![], rows: vec![row("Gràcia", 16.0), row("Sants", 14.0)] },
            StatTable { kind: DatasetKind::TransactionPrice, year_labels: vec![], rows: vec![row("Gràcia", 4800.0)] },
        ]);
        let source = RoiSource::default();
        let roi = source.resolve(&ctx, "Gràcia").unwrap();
        assert!((roi.get("2019").unwrap().as_f64().unwrap() - 4.0).abs() < 1e-9);
        assert!(source.resolve(&ctx, "Sants").is_none());
        assert_eq!(source.name(), "ROI(rental_price/transaction_price)");
    }
}
