use crate::{
    indicators::price_levels::PriceLevels,
    models::{trade_direction::TradeDirection, trade_status::TradeStatus},
    utils::constants::DEFAULT_TIMEFRAME,
};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single journal entry. Append-only once persisted: the only mutation is
/// closing it, which fills in the exit and the realized P&L exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub symbol: String,
    pub direction: TradeDirection,
    pub entry_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<f64>,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub quantity: f64,
    pub entry_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<DateTime<Utc>>,
    pub status: TradeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnl_percentage: Option<f64>,
    pub strategy: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_image: Option<String>,
    #[serde(default = "default_timeframe")]
    pub chart_timeframe: String,
}

fn default_timeframe() -> String {
    DEFAULT_TIMEFRAME.to_string()
}

impl Trade {
    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    /// Closes the trade at `exit_price`, deriving status from the sign of the
    /// realized P&L. Fails if the trade is already closed.
    pub fn close(&mut self, exit_price: f64, exit_date: DateTime<Utc>) -> Result<()> {
        if !self.is_open() || self.exit_price.is_some() {
            return Err(anyhow!("Trade {} is already closed.", self.id));
        }

        if !exit_price.is_finite() || exit_price <= 0.0 {
            return Err(anyhow!("Exit price must be a positive number."));
        }

        let (pnl, pnl_percentage) =
            realized_pnl(self.direction, self.entry_price, exit_price, self.quantity);

        self.exit_price = Some(exit_price);
        self.exit_date = Some(exit_date);
        self.pnl = Some(pnl);
        self.pnl_percentage = Some(pnl_percentage);
        self.status = TradeStatus::from_pnl(pnl);

        Ok(())
    }

    /// Checks the shape a stored trade must have: open exactly when there is no
    /// exit, and a closed trade carries its exit date and realized P&L.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(anyhow!("Trade {} has no symbol.", self.id));
        }
        if !(self.entry_price.is_finite() && self.entry_price != 0.0) {
            return Err(anyhow!("Trade {} has an invalid entry price.", self.id));
        }
        if !(self.quantity.is_finite() && self.quantity > 0.0) {
            return Err(anyhow!("Trade {} has an invalid quantity.", self.id));
        }

        if self.is_open() != self.exit_price.is_none() {
            return Err(anyhow!(
                "Trade {} is {} but {} an exit price.",
                self.id,
                self.status,
                if self.exit_price.is_some() { "has" } else { "has no" }
            ));
        }
        if self.exit_date.is_some() != self.exit_price.is_some() {
            return Err(anyhow!(
                "Trade {} must have both an exit price and an exit date, or neither.",
                self.id
            ));
        }
        if self.status.is_closed() && self.pnl.is_none() {
            return Err(anyhow!("Closed trade {} has no realized P&L.", self.id));
        }

        Ok(())
    }

    /// P&L percentage if present and a real number.
    pub fn valid_pnl_percentage(&self) -> Option<f64> {
        self.pnl_percentage.filter(|p| p.is_finite())
    }

    pub fn valid_pnl(&self) -> Option<f64> {
        self.pnl.filter(|p| p.is_finite())
    }

    pub fn price_levels(&self) -> PriceLevels {
        PriceLevels {
            entry: Some(self.entry_price),
            exit: self.exit_price,
            stop_loss: Some(self.stop_loss),
            take_profit: Some(self.take_profit),
        }
    }
}

/// Returns `(pnl, pnl_percentage)` for a position closed at `exit`.
pub fn realized_pnl(direction: TradeDirection, entry: f64, exit: f64, quantity: f64) -> (f64, f64) {
    let diff = match direction {
        TradeDirection::Long => exit - entry,
        TradeDirection::Short => entry - exit,
    };

    (diff * quantity, diff / entry * 100.0)
}
