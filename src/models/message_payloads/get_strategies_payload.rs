use crate::models::strategy::Strategy;
use actix::Message;
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct GetStrategiesPayload;

impl Message for GetStrategiesPayload {
    type Result = Result<Vec<Strategy>>;
}
