use crate::analytics::performance::PerformanceReport;
use actix::Message;
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct GetPerformancePayload;

impl Message for GetPerformancePayload {
    type Result = Result<PerformanceReport>;
}
