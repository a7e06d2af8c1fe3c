pub mod database;
pub mod journal_config;
pub mod message_payloads;
pub mod strategy;
pub mod strategy_builder;
pub mod strategy_patch;
pub mod trade;
pub mod trade_builder;
pub mod trade_direction;
pub mod trade_status;
pub mod traits;
