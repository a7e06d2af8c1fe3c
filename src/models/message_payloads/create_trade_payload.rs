use crate::models::trade::Trade;
use actix::Message;
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct CreateTradePayload {
    pub trade: Trade,
}

impl Message for CreateTradePayload {
    type Result = Result<Trade>;
}
