use serde::{Deserialize, Serialize};

/// A named, reusable rule set trades are attributed to. Rule and condition
/// lists keep their display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub entry_conditions: Vec<String>,
    #[serde(default)]
    pub exit_conditions: Vec<String>,
    #[serde(default)]
    pub timeframes: Vec<String>,
    #[serde(default)]
    pub markets: Vec<String>,
    pub risk_reward_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<f64>,
    #[serde(default, rename = "avgPnL", skip_serializing_if = "Option::is_none")]
    pub avg_pnl: Option<f64>,
}
