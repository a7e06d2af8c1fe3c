use crate::analytics::dashboard_stats::DashboardStats;
use actix::Message;
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct GetDashboardStatsPayload;

impl Message for GetDashboardStatsPayload {
    type Result = Result<DashboardStats>;
}
