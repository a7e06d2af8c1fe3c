use crate::{
    analytics::{
        dashboard_stats::DashboardStats, performance::PerformanceReport,
        stats_calculator::StatsCalculator,
    },
    models::{
        database::storage,
        message_payloads::{
            close_trade_payload::CloseTradePayload, create_strategy_payload::CreateStrategyPayload,
            create_trade_payload::CreateTradePayload,
            get_dashboard_stats_payload::GetDashboardStatsPayload,
            get_performance_payload::GetPerformancePayload,
            get_strategies_payload::GetStrategiesPayload, get_trades_payload::GetTradesPayload,
            update_strategy_payload::UpdateStrategyPayload,
        },
        strategy::Strategy,
        trade::Trade,
        traits::key_value_store::KeyValueStore,
    },
    utils::constants::{STRATEGIES_KEY, TRADES_KEY},
};
use actix::{Actor, Context, Handler};
use anyhow::{anyhow, Result};
use tracing::info;

/// Owns the trade log and strategy set. Each message reads the whole
/// collection and writes it back, one message at a time.
pub struct JournalDB {
    store: Box<dyn KeyValueStore>,
    calculator: StatsCalculator,
}

impl JournalDB {
    pub fn new(store: impl KeyValueStore + 'static, calculator: StatsCalculator) -> Self {
        Self {
            store: Box::new(store),
            calculator,
        }
    }

    fn trades(&self) -> Vec<Trade> {
        storage::load(self.store.as_ref(), TRADES_KEY, vec![])
    }

    fn strategies(&self) -> Vec<Strategy> {
        storage::load(self.store.as_ref(), STRATEGIES_KEY, vec![])
    }

    fn save_trades(&mut self, trades: &[Trade]) -> Result<()> {
        storage::save(self.store.as_mut(), TRADES_KEY, trades)
    }

    fn save_strategies(&mut self, strategies: &[Strategy]) -> Result<()> {
        storage::save(self.store.as_mut(), STRATEGIES_KEY, strategies)
    }
}

impl Actor for JournalDB {
    type Context = Context<Self>;
}

impl Handler<CreateTradePayload> for JournalDB {
    type Result = Result<Trade>;

    fn handle(&mut self, msg: CreateTradePayload, _ctx: &mut Context<Self>) -> Self::Result {
        let trade = msg.trade;
        trade.validate()?;

        let mut trades = self.trades();

        if trades.iter().any(|t| t.id == trade.id) {
            return Err(anyhow!("Trade {} already exists.", trade.id));
        }

        trades.push(trade.clone());
        self.save_trades(&trades)?;

        info!(trade_id = %trade.id, symbol = %trade.symbol, status = %trade.status, "Trade logged");
        Ok(trade)
    }
}

impl Handler<CloseTradePayload> for JournalDB {
    type Result = Result<Trade>;

    fn handle(&mut self, msg: CloseTradePayload, _ctx: &mut Context<Self>) -> Self::Result {
        let mut trades = self.trades();

        let trade = trades
            .iter_mut()
            .find(|t| t.id == msg.id)
            .ok_or(anyhow!("Trade {} not found.", msg.id))?;
        trade.close(msg.exit_price, msg.exit_date)?;
        let closed = trade.clone();

        self.save_trades(&trades)?;

        info!(
            trade_id = %closed.id,
            status = %closed.status,
            pnl = closed.pnl.unwrap_or_default(),
            "Trade closed"
        );
        Ok(closed)
    }
}

impl Handler<GetTradesPayload> for JournalDB {
    type Result = Result<Vec<Trade>>;

    fn handle(&mut self, _msg: GetTradesPayload, _ctx: &mut Context<Self>) -> Self::Result {
        Ok(self.trades())
    }
}

impl Handler<GetDashboardStatsPayload> for JournalDB {
    type Result = Result<DashboardStats>;

    fn handle(&mut self, _msg: GetDashboardStatsPayload, _ctx: &mut Context<Self>) -> Self::Result {
        Ok(self.calculator.compute(&self.trades()))
    }
}

impl Handler<CreateStrategyPayload> for JournalDB {
    type Result = Result<Strategy>;

    fn handle(&mut self, msg: CreateStrategyPayload, _ctx: &mut Context<Self>) -> Self::Result {
        let strategy = msg.strategy;
        let mut strategies = self.strategies();

        if strategies.iter().any(|s| s.id == strategy.id) {
            return Err(anyhow!("Strategy {} already exists.", strategy.id));
        }
        if strategies.iter().any(|s| s.name == strategy.name) {
            return Err(anyhow!("A strategy named '{}' already exists.", strategy.name));
        }

        strategies.push(strategy.clone());
        self.save_strategies(&strategies)?;

        info!(strategy_id = %strategy.id, name = %strategy.name, "Strategy created");
        Ok(strategy)
    }
}

impl Handler<UpdateStrategyPayload> for JournalDB {
    type Result = Result<Strategy>;

    fn handle(&mut self, msg: UpdateStrategyPayload, _ctx: &mut Context<Self>) -> Self::Result {
        let mut strategies = self.strategies();

        let index = strategies
            .iter()
            .position(|s| s.id == msg.id)
            .ok_or(anyhow!("Strategy {} not found.", msg.id))?;
        let updated = msg.patch.apply(&strategies[index])?;

        let name_taken = strategies
            .iter()
            .any(|s| s.id != updated.id && s.name == updated.name);
        if name_taken {
            return Err(anyhow!("A strategy named '{}' already exists.", updated.name));
        }

        strategies[index] = updated.clone();
        self.save_strategies(&strategies)?;

        Ok(updated)
    }
}

impl Handler<GetStrategiesPayload> for JournalDB {
    type Result = Result<Vec<Strategy>>;

    fn handle(&mut self, _msg: GetStrategiesPayload, _ctx: &mut Context<Self>) -> Self::Result {
        Ok(self.strategies())
    }
}

impl Handler<GetPerformancePayload> for JournalDB {
    type Result = Result<PerformanceReport>;

    fn handle(&mut self, _msg: GetPerformancePayload, _ctx: &mut Context<Self>) -> Self::Result {
        Ok(PerformanceReport::build(
            &self.calculator,
            &self.trades(),
            &self.strategies(),
        ))
    }
}
