pub mod dashboard_stats;
pub mod performance;
pub mod stats_calculator;
