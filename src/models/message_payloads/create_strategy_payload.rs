use crate::models::strategy::Strategy;
use actix::Message;
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct CreateStrategyPayload {
    pub strategy: Strategy,
}

impl Message for CreateStrategyPayload {
    type Result = Result<Strategy>;
}
