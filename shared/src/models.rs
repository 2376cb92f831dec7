use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical four-digit year taken from the tail of a column label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct YearKey(u16);

impl YearKey {
    pub fn new(year: u16) -> Self {
        YearKey(year)
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A single table cell after load-time coercion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Cell {
    Value(f64),
    Missing,
}

impl Cell {
    /// Numeric value of the cell; non-finite values count as missing.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Cell::Value(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }

    pub fn is_missing(self) -> bool {
        self.as_f64().is_none()
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Cell::Value(v),
            _ => Cell::Missing,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawEntry {
    pub label: String,
    pub cell: Cell,
}

/// One territory's row of a statistical table: year labels and their cells,
/// kept in the original column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawSeries {
    entries: Vec<RawEntry>,
}

impl RawSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, cell: Cell) {
        self.entries.push(RawEntry {
            label: label.into(),
            cell,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cell of the first entry carrying exactly this label.
    pub fn get(&self, label: &str) -> Option<Cell> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.cell)
    }
}

impl<S: Into<String>> FromIterator<(S, Cell)> for RawSeries {
    fn from_iter<I: IntoIterator<Item = (S, Cell)>>(iter: I) -> Self {
        let mut series = RawSeries::new();
        for (label, cell) in iter {
            series.push(label, cell);
        }
        series
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AlignedRow {
    pub year: YearKey,
    pub selected: f64,
    pub reference: f64,
}

/// Year-aligned pair of series, ascending by year with no gaps in either column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AlignedSeries {
    rows: Vec<AlignedRow>,
}

impl AlignedSeries {
    /// Panics if the rows are not strictly ascending by year.
    pub fn from_rows(rows: Vec<AlignedRow>) -> Self {
        assert!(
            rows.windows(2).all(|pair| pair[0].year < pair[1].year),
            "aligned rows must be strictly ascending by year"
        );
        AlignedSeries { rows }
    }

    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn years(&self) -> Vec<YearKey> {
        self.rows.iter().map(|row| row.year).collect()
    }

    pub fn selected_values(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.selected).collect()
    }

    pub fn reference_values(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.reference).collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GrowthSummary {
    pub start_value: f64,
    pub end_value: f64,
    pub period_count: usize,
    /// `None` when the growth rate is undefined for these endpoints.
    pub cagr_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMode {
    #[default]
    Absolute,
    RelativeChange,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Population,
    Unemployment,
    Income,
    Transactions,
    RentalPrice,
    TransactionPrice,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 6] = [
        DatasetKind::Population,
        DatasetKind::Unemployment,
        DatasetKind::Income,
        DatasetKind::Transactions,
        DatasetKind::RentalPrice,
        DatasetKind::TransactionPrice,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DatasetKind::Population => "population",
            DatasetKind::Unemployment => "unemployment",
            DatasetKind::Income => "income",
            DatasetKind::Transactions => "transactions",
            DatasetKind::RentalPrice => "rental_price",
            DatasetKind::TransactionPrice => "transaction_price",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finished panel, ready for a chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanelSeries {
    pub title: String,
    pub unit_label: String,
    pub selected_name: String,
    pub reference_name: String,
    pub mode: SeriesMode,
    pub series: AlignedSeries,
    pub selected_growth: Option<GrowthSummary>,
    pub reference_growth: Option<GrowthSummary>,
    /// Some absolute value fell outside the panel's plausible range.
    pub suspicious_values: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoDataReason {
    LookupMiss { territory: String },
    /// `suspicious_values` is checked on absolute values before the length
    /// check, so a short series still reports out-of-range figures.
    AlignmentEmpty { rows: usize, suspicious_values: bool },
}

impl fmt::Display for NoDataReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoDataReason::LookupMiss { territory } => {
                write!(f, "no data for territory '{}'", territory)
            }
            NoDataReason::AlignmentEmpty { rows, .. } => {
                write!(f, "only {} aligned year(s), at least 2 required", rows)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelOutcome {
    Ready(PanelSeries),
    NoData { reason: NoDataReason },
}

impl PanelOutcome {
    pub fn no_data(reason: NoDataReason) -> Self {
        PanelOutcome::NoData { reason }
    }

    pub fn as_ready(&self) -> Option<&PanelSeries> {
        match self {
            PanelOutcome::Ready(panel) => Some(panel),
            PanelOutcome::NoData { .. } => None,
        }
    }
}

/// Outcome of one panel, tagged with the panel it belongs to.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PanelReport {
    pub panel: String,
    #[serde(flatten)]
    pub outcome: PanelOutcome,
}
