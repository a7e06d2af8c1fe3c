use crate::models::trade::Trade;
use actix::Message;
use anyhow::Result;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct CloseTradePayload {
    pub id: String,
    pub exit_price: f64,
    pub exit_date: DateTime<Utc>,
}

impl Message for CloseTradePayload {
    type Result = Result<Trade>;
}
