use crate::{
    analytics::{
        dashboard_stats::DashboardStats,
        stats_calculator::{closed_by_exit_date, valid_percentages, win_rate, StatsCalculator},
    },
    models::{strategy::Strategy, trade::Trade},
    utils::rounding::{mean, round_to},
};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyPerformance {
    /// Empty when trades name a strategy that is not in the journal.
    pub strategy_id: String,
    pub strategy_name: String,
    pub total_trades: usize,
    pub win_rate: f64,
    #[serde(rename = "avgPnL")]
    pub avg_pnl: f64,
    pub profit_factor: f64,
    pub max_drawdown: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframePerformance {
    pub timeframe: String,
    pub total_trades: usize,
    pub win_rate: f64,
    #[serde(rename = "avgPnL")]
    pub avg_pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPerformance {
    pub market: String,
    pub total_trades: usize,
    pub win_rate: f64,
    #[serde(rename = "avgPnL")]
    pub avg_pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativePnlPoint {
    pub date: Option<DateTime<Utc>>,
    pub symbol: String,
    pub pnl: f64,
    pub cumulative: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub stats: DashboardStats,
    pub strategies: Vec<StrategyPerformance>,
    pub timeframes: Vec<TimeframePerformance>,
    pub markets: Vec<MarketPerformance>,
    pub cumulative_pnl: Vec<CumulativePnlPoint>,
}

impl PerformanceReport {
    pub fn build(calculator: &StatsCalculator, trades: &[Trade], strategies: &[Strategy]) -> Self {
        Self {
            stats: calculator.compute(trades),
            strategies: strategy_performance(calculator, trades, strategies),
            timeframes: timeframe_performance(trades),
            markets: market_performance(trades, strategies),
            cumulative_pnl: cumulative_pnl(trades),
        }
    }
}

/// Per-strategy breakdown in journal order, followed by any strategy names
/// only found on trades. Strategies without trades are left out.
pub fn strategy_performance(
    calculator: &StatsCalculator,
    trades: &[Trade],
    strategies: &[Strategy],
) -> Vec<StrategyPerformance> {
    let mut groups: IndexMap<&str, (String, Vec<&Trade>)> = strategies
        .iter()
        .map(|s| (s.name.as_str(), (s.id.clone(), vec![])))
        .collect();

    for trade in trades {
        groups
            .entry(trade.strategy.as_str())
            .or_insert_with(|| (String::new(), vec![]))
            .1
            .push(trade);
    }

    groups
        .into_iter()
        .filter(|(_, (_, group))| !group.is_empty())
        .map(|(name, (id, group))| {
            let owned: Vec<Trade> = group.into_iter().cloned().collect();
            let closed = closed_by_exit_date(&owned);

            StrategyPerformance {
                strategy_id: id,
                strategy_name: name.to_string(),
                total_trades: owned.len(),
                win_rate: win_rate(&closed),
                avg_pnl: round_to(mean(&valid_percentages(&closed)), 2),
                profit_factor: calculator.profit_factor(&closed),
                max_drawdown: max_drawdown(&closed),
            }
        })
        .collect()
}

/// Breakdown by chart timeframe in first-seen order.
pub fn timeframe_performance(trades: &[Trade]) -> Vec<TimeframePerformance> {
    let mut groups: IndexMap<&str, Vec<Trade>> = IndexMap::new();
    for trade in trades {
        groups
            .entry(trade.chart_timeframe.as_str())
            .or_default()
            .push(trade.clone());
    }

    groups
        .into_iter()
        .map(|(timeframe, group)| {
            let (total_trades, win_rate, avg_pnl) = group_summary(&group);

            TimeframePerformance {
                timeframe: timeframe.to_string(),
                total_trades,
                win_rate,
                avg_pnl,
            }
        })
        .collect()
}

/// Breakdown by market. A trade counts towards every market its strategy
/// lists; trades of unknown strategies, or strategies without markets, are
/// left out. Markets appear in first-seen order.
pub fn market_performance(trades: &[Trade], strategies: &[Strategy]) -> Vec<MarketPerformance> {
    let mut groups: IndexMap<&str, Vec<Trade>> = IndexMap::new();
    for trade in trades {
        let Some(strategy) = strategies.iter().find(|s| s.name == trade.strategy) else {
            continue;
        };

        for market in strategy.markets.iter() {
            groups.entry(market.as_str()).or_default().push(trade.clone());
        }
    }

    groups
        .into_iter()
        .map(|(market, group)| {
            let (total_trades, win_rate, avg_pnl) = group_summary(&group);

            MarketPerformance {
                market: market.to_string(),
                total_trades,
                win_rate,
                avg_pnl,
            }
        })
        .collect()
}

/// `(total trades, win rate, average P&L %)` of a group.
fn group_summary(group: &[Trade]) -> (usize, f64, f64) {
    let closed = closed_by_exit_date(group);

    (
        group.len(),
        win_rate(&closed),
        round_to(mean(&valid_percentages(&closed)), 2),
    )
}

/// Running sum of P&L percentages over closed trades in exit date order.
/// Trades without a usable percentage are skipped.
pub fn cumulative_pnl(trades: &[Trade]) -> Vec<CumulativePnlPoint> {
    let mut cumulative = 0.0;

    closed_by_exit_date(trades)
        .into_iter()
        .filter_map(|trade| {
            let pnl = trade.valid_pnl_percentage()?;
            cumulative += pnl;

            Some(CumulativePnlPoint {
                date: trade.exit_date,
                symbol: trade.symbol.clone(),
                pnl: round_to(pnl, 2),
                cumulative: round_to(cumulative, 2),
            })
        })
        .collect()
}

/// Largest peak-to-trough drop of the cumulative percentage curve. The curve
/// starts at a peak of 0. `closed` must be in exit date order.
pub fn max_drawdown(closed: &[&Trade]) -> f64 {
    let mut cumulative = 0.0_f64;
    let mut peak = 0.0_f64;
    let mut drawdown = 0.0_f64;

    for pct in valid_percentages(closed) {
        cumulative += pct;
        peak = peak.max(cumulative);
        drawdown = drawdown.max(peak - cumulative);
    }

    round_to(drawdown, 2)
}
