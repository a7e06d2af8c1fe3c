pub mod analytics;
pub mod chart;
pub mod indicators;
pub mod models;
pub mod run_configs;
pub mod utils;
