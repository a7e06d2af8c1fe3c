use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// `Open` iff the trade has no exit price. Closed trades are `Win` or `Loss`
/// depending on the sign of realized P&L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    #[default]
    Open,
    Win,
    Loss,
}

impl TradeStatus {
    pub fn from_pnl(pnl: f64) -> Self {
        if pnl >= 0.0 {
            TradeStatus::Win
        } else {
            TradeStatus::Loss
        }
    }

    pub fn is_closed(&self) -> bool {
        !matches!(self, TradeStatus::Open)
    }
}

impl Display for TradeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeStatus::Open => write!(f, "open"),
            TradeStatus::Win => write!(f, "win"),
            TradeStatus::Loss => write!(f, "loss"),
        }
    }
}
