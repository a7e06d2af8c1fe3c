use serde::{Deserialize, Serialize};

/// Aggregate journal statistics. Always recomputed from the full trade log,
/// never stored.
///
/// `avg_win`/`avg_loss`/`best_trade`/`worst_trade` are P&L percentages.
/// `current_streak` is positive for consecutive wins and negative for
/// consecutive losses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_trades: usize,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    pub current_streak: i64,
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
}
