use crate::models::strategy::Strategy;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Partial strategy update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rules: Option<Vec<String>>,
    pub entry_conditions: Option<Vec<String>>,
    pub exit_conditions: Option<Vec<String>>,
    pub timeframes: Option<Vec<String>>,
    pub markets: Option<Vec<String>>,
    pub risk_reward_ratio: Option<f64>,
}

impl StrategyPatch {
    pub fn apply(&self, strategy: &Strategy) -> Result<Strategy> {
        let mut updated = strategy.clone();

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(anyhow!("Strategy name cannot be empty."));
            }
            updated.name = name.clone();
        }
        if let Some(ratio) = self.risk_reward_ratio {
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(anyhow!("Risk/reward ratio must be a positive number."));
            }
            updated.risk_reward_ratio = ratio;
        }
        if let Some(description) = &self.description {
            updated.description = description.clone();
        }
        if let Some(rules) = &self.rules {
            updated.rules = rules.clone();
        }
        if let Some(conditions) = &self.entry_conditions {
            updated.entry_conditions = conditions.clone();
        }
        if let Some(conditions) = &self.exit_conditions {
            updated.exit_conditions = conditions.clone();
        }
        if let Some(timeframes) = &self.timeframes {
            updated.timeframes = timeframes.clone();
        }
        if let Some(markets) = &self.markets {
            updated.markets = markets.clone();
        }

        Ok(updated)
    }
}
