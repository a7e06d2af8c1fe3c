use crate::models::{strategy::Strategy, strategy_patch::StrategyPatch};
use actix::Message;
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct UpdateStrategyPayload {
    pub id: String,
    pub patch: StrategyPatch,
}

impl Message for UpdateStrategyPayload {
    type Result = Result<Strategy>;
}
