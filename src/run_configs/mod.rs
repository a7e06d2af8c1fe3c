pub mod chart_session;
pub mod dashboard_report;
pub mod demo_data;
