use crate::{
    analytics::dashboard_stats::DashboardStats,
    models::{trade::Trade, trade_status::TradeStatus},
    utils::{
        constants::DEFAULT_PROFIT_FACTOR_SENTINEL,
        rounding::{mean, round_to},
    },
};

/// Turns a trade log into `DashboardStats`. Pure: the same log always gives
/// the same stats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsCalculator {
    profit_factor_sentinel: f64,
}

impl Default for StatsCalculator {
    fn default() -> Self {
        Self {
            profit_factor_sentinel: DEFAULT_PROFIT_FACTOR_SENTINEL,
        }
    }
}

impl StatsCalculator {
    pub fn new(profit_factor_sentinel: f64) -> Self {
        Self {
            profit_factor_sentinel,
        }
    }

    pub fn profit_factor_sentinel(&self) -> f64 {
        self.profit_factor_sentinel
    }

    pub fn compute(&self, trades: &[Trade]) -> DashboardStats {
        if trades.is_empty() {
            return DashboardStats::default();
        }

        let closed = closed_by_exit_date(trades);
        if closed.is_empty() {
            return DashboardStats {
                total_trades: trades.len(),
                ..Default::default()
            };
        }

        let wins: Vec<&Trade> = with_status(&closed, TradeStatus::Win);
        let losses: Vec<&Trade> = with_status(&closed, TradeStatus::Loss);

        let win_pcts = valid_percentages(&wins);
        let loss_pcts = valid_percentages(&losses);
        let all_pcts = valid_percentages(&closed);

        let best_trade = all_pcts.iter().copied().reduce(f64::max).unwrap_or(0.0);
        let worst_trade = all_pcts.iter().copied().reduce(f64::min).unwrap_or(0.0);

        let streaks = Streaks::walk(&closed);

        DashboardStats {
            total_trades: trades.len(),
            win_rate: win_rate(&closed),
            profit_factor: self.profit_factor(&closed),
            avg_win: round_to(mean(&win_pcts), 2),
            avg_loss: round_to(mean(&loss_pcts), 2),
            best_trade: round_to(best_trade, 2),
            worst_trade: round_to(worst_trade, 2),
            current_streak: streaks.current,
            longest_win_streak: streaks.longest_win,
            longest_loss_streak: streaks.longest_loss,
        }
    }

    /// Gross profit over gross loss magnitude, rounded to 2 decimals. With no
    /// losing P&L this is the sentinel if anything was won, else 0.
    pub fn profit_factor(&self, closed: &[&Trade]) -> f64 {
        let pnls: Vec<f64> = closed.iter().filter_map(|t| t.valid_pnl()).collect();
        let gross_profit: f64 = pnls.iter().filter(|p| **p > 0.0).sum();
        let gross_loss: f64 = pnls.iter().filter(|p| **p < 0.0).sum::<f64>().abs();

        if gross_loss == 0.0 {
            let has_wins = closed.iter().any(|t| t.status == TradeStatus::Win);
            return if has_wins {
                self.profit_factor_sentinel
            } else {
                0.0
            };
        }

        round_to(gross_profit / gross_loss, 2)
    }
}

pub fn compute_stats(trades: &[Trade]) -> DashboardStats {
    StatsCalculator::default().compute(trades)
}

/// Closed trades in ascending exit date order. Ties keep log order.
pub fn closed_by_exit_date(trades: &[Trade]) -> Vec<&Trade> {
    let mut closed: Vec<&Trade> = trades.iter().filter(|t| t.status.is_closed()).collect();
    closed.sort_by_key(|t| t.exit_date);
    closed
}

/// Percentage of `closed` that are wins, 1 decimal.
pub fn win_rate(closed: &[&Trade]) -> f64 {
    if closed.is_empty() {
        return 0.0;
    }

    let wins = closed.iter().filter(|t| t.status == TradeStatus::Win).count();
    round_to(100.0 * wins as f64 / closed.len() as f64, 1)
}

pub fn valid_percentages(trades: &[&Trade]) -> Vec<f64> {
    trades.iter().filter_map(|t| t.valid_pnl_percentage()).collect()
}

fn with_status<'a>(trades: &[&'a Trade], status: TradeStatus) -> Vec<&'a Trade> {
    trades.iter().copied().filter(|t| t.status == status).collect()
}

#[derive(Debug, Default, PartialEq)]
struct Streaks {
    current: i64,
    longest_win: usize,
    longest_loss: usize,
}

impl Streaks {
    /// `closed` must already be in exit date order.
    fn walk(closed: &[&Trade]) -> Self {
        let mut streaks = Streaks::default();
        let mut win_run = 0usize;
        let mut loss_run = 0usize;

        for trade in closed {
            match trade.status {
                TradeStatus::Win => {
                    win_run += 1;
                    loss_run = 0;
                    streaks.current = win_run as i64;
                    streaks.longest_win = streaks.longest_win.max(win_run);
                }
                TradeStatus::Loss => {
                    loss_run += 1;
                    win_run = 0;
                    streaks.current = -(loss_run as i64);
                    streaks.longest_loss = streaks.longest_loss.max(loss_run);
                }
                TradeStatus::Open => {}
            }
        }

        streaks
    }
}
