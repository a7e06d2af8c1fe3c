use crate::{
    models::{strategy::Strategy, strategy_patch::StrategyPatch},
    utils::constants::{DEFAULT_RISK_REWARD_RATIO, UNTITLED_STRATEGY},
};
use anyhow::{anyhow, Result};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct StrategyBuilder {
    pub id: Option<String>,
    pub fields: StrategyPatch,
}

impl StrategyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.fields.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.fields.description = Some(description.into());
        self
    }

    pub fn rule(mut self, rule: impl Into<String>) -> Self {
        self.fields.rules.get_or_insert_with(Vec::new).push(rule.into());
        self
    }

    pub fn entry_condition(mut self, condition: impl Into<String>) -> Self {
        self.fields
            .entry_conditions
            .get_or_insert_with(Vec::new)
            .push(condition.into());
        self
    }

    pub fn exit_condition(mut self, condition: impl Into<String>) -> Self {
        self.fields
            .exit_conditions
            .get_or_insert_with(Vec::new)
            .push(condition.into());
        self
    }

    pub fn timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.fields
            .timeframes
            .get_or_insert_with(Vec::new)
            .push(timeframe.into());
        self
    }

    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.fields.markets.get_or_insert_with(Vec::new).push(market.into());
        self
    }

    pub fn risk_reward_ratio(mut self, ratio: f64) -> Self {
        self.fields.risk_reward_ratio = Some(ratio);
        self
    }

    /// Starts from a partial set of fields, e.g. a submitted form.
    pub fn from_patch(patch: StrategyPatch) -> Self {
        Self {
            id: None,
            fields: patch,
        }
    }

    pub fn build(&self) -> Result<Strategy> {
        let fields = self.fields.clone();
        let risk_reward_ratio = fields
            .risk_reward_ratio
            .filter(|r| *r != 0.0)
            .unwrap_or(DEFAULT_RISK_REWARD_RATIO);

        if !(risk_reward_ratio.is_finite() && risk_reward_ratio > 0.0) {
            return Err(anyhow!("Risk/reward ratio must be a positive number."));
        }

        let name = fields
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNTITLED_STRATEGY.to_string());

        Ok(Strategy {
            id: self
                .id
                .clone()
                .unwrap_or_else(|| format!("strategy-{}", Uuid::new_v4())),
            name,
            description: fields.description.unwrap_or_default(),
            rules: fields.rules.unwrap_or_default(),
            entry_conditions: fields.entry_conditions.unwrap_or_default(),
            exit_conditions: fields.exit_conditions.unwrap_or_default(),
            timeframes: fields.timeframes.unwrap_or_default(),
            markets: fields.markets.unwrap_or_default(),
            risk_reward_ratio,
            win_rate: Some(0.0),
            avg_pnl: None,
        })
    }
}
