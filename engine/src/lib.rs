// District statistics engine: loads the statistical tables and turns them into
// year-aligned panel series for a selected territory and a reference territory.

pub mod analytics;
pub mod config;
pub mod data;
pub mod error;
pub mod services;
