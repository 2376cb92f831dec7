// Year alignment of a selected and a reference series.
use super::relative::to_relative_change;
use super::year::canonicalize_year;
use shared::models::{AlignedRow, AlignedSeries, Cell, RawSeries, YearKey};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRow {
    pub year: YearKey,
    pub selected: Option<f64>,
    pub reference: Option<f64>,
}

/// Years common to both sides, ascending, with gaps still in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearGrid {
    rows: Vec<GridRow>,
}

impl YearGrid {
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drops every year where either side is undefined.
    pub fn into_aligned(self) -> AlignedSeries {
        let rows = self
            .rows
            .into_iter()
            .filter_map(|row| match (row.selected, row.reference) {
                (Some(selected), Some(reference)) if selected.is_finite() && reference.is_finite() => {
                    Some(AlignedRow {
                        year: row.year,
                        selected,
                        reference,
                    })
                }
                _ => None,
            })
            .collect();
        AlignedSeries::from_rows(rows)
    }
}

// Several labels can share a year ("2019", "Avg 2019"); the first one in column
// order is kept even when its cell is missing.
fn first_cell_per_year(raw: &RawSeries) -> BTreeMap<YearKey, Cell> {
    let mut by_year = BTreeMap::new();
    for entry in raw.iter() {
        if let Some(year) = canonicalize_year(&entry.label) {
            by_year.entry(year).or_insert(entry.cell);
        }
    }
    by_year
}

pub fn align_grid(selected: &RawSeries, reference: &RawSeries) -> YearGrid {
    let selected_by_year = first_cell_per_year(selected);
    let reference_by_year = first_cell_per_year(reference);

    let rows = selected_by_year
        .iter()
        .filter_map(|(year, selected_cell)| {
            reference_by_year.get(year).map(|reference_cell| GridRow {
                year: *year,
                selected: selected_cell.as_f64(),
                reference: reference_cell.as_f64(),
            })
        })
        .collect();

    YearGrid { rows }
}

/// Common, ascending, gap-free yearly series for both sides.
pub fn align(selected: &RawSeries, reference: &RawSeries) -> AlignedSeries {
    align_grid(selected, reference).into_aligned()
}

/// Period-over-period change in percent of an aligned series. Neighbours are
/// consecutive aligned rows, so a dropped year is bridged; the first row and
/// any row with a zero previous value are dropped.
pub fn relative_change(series: &AlignedSeries) -> AlignedSeries {
    let selected: Vec<Option<f64>> = series.selected_values().into_iter().map(Some).collect();
    let reference: Vec<Option<f64>> = series.reference_values().into_iter().map(Some).collect();
    let rows = series
        .rows()
        .iter()
        .zip(to_relative_change(&selected))
        .zip(to_relative_change(&reference))
        .map(|((row, selected), reference)| GridRow {
            year: row.year,
            selected,
            reference,
        })
        .collect();
    YearGrid { rows }.into_aligned()
}
