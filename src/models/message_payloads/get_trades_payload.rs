use crate::models::trade::Trade;
use actix::Message;
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct GetTradesPayload;

impl Message for GetTradesPayload {
    type Result = Result<Vec<Trade>>;
}
