use crate::{
    analytics::stats_calculator::StatsCalculator,
    models::{
        database::{journal_db::JournalDB, json_file_store::JsonFileStore},
        journal_config::JournalConfig,
        message_payloads::get_performance_payload::GetPerformancePayload,
    },
    run_configs::demo_data::seed_if_empty,
};
use actix::Actor;
use anyhow::Result;
use tracing::info;

pub async fn run(config: &JournalConfig) -> Result<()> {
    let store = JsonFileStore::new(&config.data_dir);
    info!(data_dir = %store.dir().display(), "Opening journal");

    let db = JournalDB::new(store, StatsCalculator::new(config.profit_factor_sentinel)).start();
    seed_if_empty(&db).await?;

    let report = db.send(GetPerformancePayload).await??;
    let stats = &report.stats;

    info!(
        total_trades = stats.total_trades,
        win_rate = stats.win_rate,
        profit_factor = stats.profit_factor,
        avg_win = stats.avg_win,
        avg_loss = stats.avg_loss,
        best_trade = stats.best_trade,
        worst_trade = stats.worst_trade,
        current_streak = stats.current_streak,
        longest_win_streak = stats.longest_win_streak,
        longest_loss_streak = stats.longest_loss_streak,
        "Dashboard"
    );

    for row in report.strategies.iter() {
        info!(
            strategy = %row.strategy_name,
            trades = row.total_trades,
            win_rate = row.win_rate,
            avg_pnl = row.avg_pnl,
            profit_factor = row.profit_factor,
            max_drawdown = row.max_drawdown,
            "Strategy performance"
        );
    }

    for row in report.timeframes.iter() {
        info!(
            timeframe = %row.timeframe,
            trades = row.total_trades,
            win_rate = row.win_rate,
            avg_pnl = row.avg_pnl,
            "Timeframe performance"
        );
    }

    for row in report.markets.iter() {
        info!(
            market = %row.market,
            trades = row.total_trades,
            win_rate = row.win_rate,
            avg_pnl = row.avg_pnl,
            "Market performance"
        );
    }

    for point in report.cumulative_pnl.iter() {
        info!(
            symbol = %point.symbol,
            date = ?point.date,
            pnl = point.pnl,
            cumulative = point.cumulative,
            "Cumulative P&L"
        );
    }

    Ok(())
}
