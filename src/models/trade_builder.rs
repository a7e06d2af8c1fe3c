use crate::{
    models::{trade::Trade, trade_direction::TradeDirection, trade_status::TradeStatus},
    utils::constants::DEFAULT_TIMEFRAME,
};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TradeBuilder {
    pub id: String,
    pub symbol: Option<String>,
    pub direction: TradeDirection,
    pub entry_price: Option<f64>,
    pub exit_price: Option<f64>,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub quantity: Option<f64>,
    pub entry_date: Option<DateTime<Utc>>,
    pub exit_date: Option<DateTime<Utc>>,
    pub strategy: Option<String>,
    pub notes: String,
    pub tags: Vec<String>,
    pub setup_image: Option<String>,
    pub chart_timeframe: String,
}

impl TradeBuilder {
    pub fn new() -> Self {
        TradeBuilder {
            id: Uuid::new_v4().to_string(),
            symbol: None,
            direction: TradeDirection::Long,
            entry_price: None,
            exit_price: None,
            stop_loss: 0.0,
            take_profit: 0.0,
            quantity: None,
            entry_date: None,
            exit_date: None,
            strategy: None,
            notes: String::new(),
            tags: vec![],
            setup_image: None,
            chart_timeframe: DEFAULT_TIMEFRAME.to_string(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn direction(mut self, direction: TradeDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn entry_price(mut self, entry_price: f64) -> Self {
        self.entry_price = Some(entry_price);
        self
    }

    pub fn exit_price(mut self, exit_price: f64) -> Self {
        self.exit_price = Some(exit_price);
        self
    }

    pub fn stop_loss(mut self, stop_loss: f64) -> Self {
        self.stop_loss = stop_loss;
        self
    }

    pub fn take_profit(mut self, take_profit: f64) -> Self {
        self.take_profit = take_profit;
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn entry_date(mut self, entry_date: DateTime<Utc>) -> Self {
        self.entry_date = Some(entry_date);
        self
    }

    pub fn exit_date(mut self, exit_date: DateTime<Utc>) -> Self {
        self.exit_date = Some(exit_date);
        self
    }

    pub fn strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn setup_image(mut self, setup_image: impl Into<String>) -> Self {
        self.setup_image = Some(setup_image.into());
        self
    }

    pub fn chart_timeframe(mut self, chart_timeframe: impl Into<String>) -> Self {
        self.chart_timeframe = chart_timeframe.into();
        self
    }

    pub fn build(&self) -> Result<Trade> {
        let symbol = self
            .symbol
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or(anyhow!("Symbol is required to build Trade."))?;
        let entry_price = self
            .entry_price
            .filter(|p| p.is_finite() && *p != 0.0)
            .ok_or(anyhow!("Entry price is required to build Trade."))?;
        let strategy = self
            .strategy
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or(anyhow!("Strategy is required to build Trade."))?;
        let quantity = self
            .quantity
            .ok_or(anyhow!("Quantity is required to build Trade."))?;

        if !(quantity.is_finite() && quantity > 0.0) {
            return Err(anyhow!("Quantity must be a positive number."));
        }

        let mut trade = Trade {
            id: self.id.clone(),
            symbol,
            direction: self.direction,
            entry_price,
            exit_price: None,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
            quantity,
            entry_date: self.entry_date.unwrap_or_else(Utc::now),
            exit_date: None,
            status: TradeStatus::Open,
            pnl: None,
            pnl_percentage: None,
            strategy,
            notes: self.notes.clone(),
            tags: self.tags.clone(),
            setup_image: self.setup_image.clone(),
            chart_timeframe: self.chart_timeframe.clone(),
        };

        // A zero exit price is the form's "not set" value.
        if let Some(exit_price) = self.exit_price.filter(|p| *p != 0.0) {
            trade.close(exit_price, self.exit_date.unwrap_or_else(Utc::now))?;
        }

        Ok(trade)
    }
}

impl Default for TradeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
