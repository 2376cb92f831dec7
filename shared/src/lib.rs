// Domain models and formatting helpers shared across crates.
pub mod models;
pub mod utils;
