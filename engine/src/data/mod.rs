pub mod context;
pub mod csv_parser;

pub use context::{DataContext, StatTable, TerritoryRow};
pub use csv_parser::StatTableParser;
