use crate::models::{
    database::journal_db::JournalDB,
    message_payloads::{
        create_strategy_payload::CreateStrategyPayload, create_trade_payload::CreateTradePayload,
        get_strategies_payload::GetStrategiesPayload, get_trades_payload::GetTradesPayload,
    },
    strategy::Strategy,
    strategy_builder::StrategyBuilder,
    trade::Trade,
    trade_builder::TradeBuilder,
    trade_direction::TradeDirection,
};
use actix::Addr;
use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;

fn at(timestamp: &str) -> Result<DateTime<Utc>> {
    Ok(timestamp.parse::<DateTime<Utc>>()?)
}

pub fn demo_trades() -> Result<Vec<Trade>> {
    Ok(vec![
        TradeBuilder::new()
            .id("1")
            .symbol("AAPL")
            .entry_price(170.25)
            .exit_price(175.50)
            .stop_loss(168.00)
            .take_profit(178.00)
            .quantity(10.0)
            .entry_date(at("2023-10-15T09:30:00Z")?)
            .exit_date(at("2023-10-15T14:30:00Z")?)
            .notes("Bought after positive earnings. Clean breakout above resistance.")
            .tag("breakout")
            .tag("earnings")
            .strategy("Breakout Strategy")
            .chart_timeframe("1h")
            .build()?,
        TradeBuilder::new()
            .id("2")
            .symbol("MSFT")
            .entry_price(330.75)
            .exit_price(325.10)
            .stop_loss(325.00)
            .take_profit(340.00)
            .quantity(5.0)
            .entry_date(at("2023-10-18T10:15:00Z")?)
            .exit_date(at("2023-10-18T15:45:00Z")?)
            .notes("Failed breakout attempt. Market sentiment shifted during the day.")
            .tag("breakout")
            .tag("failed")
            .strategy("Breakout Strategy")
            .chart_timeframe("1d")
            .build()?,
        TradeBuilder::new()
            .id("3")
            .symbol("TSLA")
            .direction(TradeDirection::Short)
            .entry_price(242.50)
            .stop_loss(248.00)
            .take_profit(230.00)
            .quantity(8.0)
            .entry_date(at("2023-10-20T11:00:00Z")?)
            .notes("Short at resistance after double top formation.")
            .tag("resistance")
            .tag("pattern")
            .strategy("Technical Pattern")
            .chart_timeframe("4h")
            .build()?,
        TradeBuilder::new()
            .id("4")
            .symbol("AMZN")
            .entry_price(132.75)
            .exit_price(138.20)
            .stop_loss(130.00)
            .take_profit(140.00)
            .quantity(15.0)
            .entry_date(at("2023-10-12T09:45:00Z")?)
            .exit_date(at("2023-10-14T16:00:00Z")?)
            .notes("Strong support bounce with high volume.")
            .tag("support")
            .tag("volume")
            .strategy("Support Bounce")
            .chart_timeframe("1d")
            .build()?,
        TradeBuilder::new()
            .id("5")
            .symbol("META")
            .direction(TradeDirection::Short)
            .entry_price(318.25)
            .exit_price(312.50)
            .stop_loss(322.00)
            .take_profit(310.00)
            .quantity(10.0)
            .entry_date(at("2023-10-17T13:30:00Z")?)
            .exit_date(at("2023-10-17T15:45:00Z")?)
            .notes("Short after bearish engulfing pattern at resistance.")
            .tag("pattern")
            .tag("resistance")
            .strategy("Technical Pattern")
            .chart_timeframe("2h")
            .build()?,
    ])
}

pub fn demo_strategies() -> Result<Vec<Strategy>> {
    Ok(vec![
        StrategyBuilder::new()
            .id("1")
            .name("Breakout Strategy")
            .description("Trading breakouts of key support and resistance levels with confirmation.")
            .rule("Wait for price to approach key level")
            .rule("Look for consolidation before breakout")
            .rule("Enter on breakout with volume confirmation")
            .entry_condition("Price breaks above resistance or below support")
            .entry_condition("Volume increases on breakout")
            .exit_condition("Price reaches take profit target")
            .exit_condition("Price breaks back below/above breakout level")
            .timeframe("1h")
            .timeframe("4h")
            .timeframe("1d")
            .market("Stocks")
            .market("Forex")
            .market("Crypto")
            .risk_reward_ratio(2.5)
            .build()?,
        StrategyBuilder::new()
            .id("2")
            .name("Support Bounce")
            .description("Trading bounces off strong support levels in uptrends.")
            .rule("Only trade in established uptrends")
            .rule("Wait for price to reach major support level")
            .entry_condition("Price touches or slightly penetrates support")
            .entry_condition("RSI shows oversold conditions")
            .exit_condition("Price reaches previous swing high")
            .exit_condition("RSI becomes overbought")
            .timeframe("1h")
            .timeframe("4h")
            .timeframe("1d")
            .market("Stocks")
            .market("ETFs")
            .risk_reward_ratio(3.0)
            .build()?,
        StrategyBuilder::new()
            .id("3")
            .name("Technical Pattern")
            .description("Trading based on established chart patterns with high probability setups.")
            .rule("Confirm pattern completion before entry")
            .rule("Enter on breakout of pattern boundary")
            .entry_condition("Pattern fully forms and confirms")
            .entry_condition("Volume confirms the breakout")
            .exit_condition("Price reaches measured move target")
            .exit_condition("Trailing stop after partial profit taking")
            .timeframe("4h")
            .timeframe("1d")
            .timeframe("1w")
            .market("Stocks")
            .market("Forex")
            .market("Commodities")
            .market("Crypto")
            .risk_reward_ratio(2.0)
            .build()?,
    ])
}

/// Fills an empty journal with the demo strategies and trades. A journal that
/// already holds data is left alone.
pub async fn seed_if_empty(db: &Addr<JournalDB>) -> Result<()> {
    if db.send(GetStrategiesPayload).await??.is_empty() {
        for strategy in demo_strategies()? {
            db.send(CreateStrategyPayload { strategy }).await??;
        }
        info!("Seeded demo strategies");
    }

    if db.send(GetTradesPayload).await??.is_empty() {
        for trade in demo_trades()? {
            db.send(CreateTradePayload { trade }).await??;
        }
        info!("Seeded demo trades");
    }

    Ok(())
}
