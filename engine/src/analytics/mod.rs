// Series alignment and derived metrics
pub mod align;
pub mod dataset;
pub mod growth;
pub mod relative;
pub mod roi;
pub mod year;

pub use align::{align, align_grid, relative_change, GridRow, YearGrid};
pub use dataset::DatasetSource;
pub use growth::{compute_cagr, growth_summary};
pub use relative::to_relative_change;
pub use roi::{derive_roi, RoiSource};
pub use year::canonicalize_year;

use crate::data::DataContext;
use serde_json::Value;
use shared::models::RawSeries;
use std::borrow::Cow;

// Where a panel's raw row comes from: a table as-is, or a series derived from several tables.
pub trait SeriesSource: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value;
    /// `None` when the territory has no row in a required table.
    fn resolve<'a>(&self, ctx: &'a DataContext, territory: &str) -> Option<Cow<'a, RawSeries>>;
}
