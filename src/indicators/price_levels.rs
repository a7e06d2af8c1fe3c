use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LevelLabel {
    Entry,
    StopLoss,
    TakeProfit,
    Exit,
}

impl LevelLabel {
    pub const DRAW_ORDER: [LevelLabel; 4] = [
        LevelLabel::Entry,
        LevelLabel::StopLoss,
        LevelLabel::TakeProfit,
        LevelLabel::Exit,
    ];

    /// Prefix used in the on-chart label text.
    pub fn caption(&self) -> &'static str {
        match self {
            LevelLabel::Entry => "Entry",
            LevelLabel::StopLoss => "SL",
            LevelLabel::TakeProfit => "TP",
            LevelLabel::Exit => "Exit",
        }
    }
}

impl Display for LevelLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelLabel::Entry => write!(f, "entry"),
            LevelLabel::StopLoss => write!(f, "stopLoss"),
            LevelLabel::TakeProfit => write!(f, "takeProfit"),
            LevelLabel::Exit => write!(f, "exit"),
        }
    }
}

/// Trade price levels to mark on a chart. Zero means "not set", the same as
/// an empty form field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLevels {
    pub entry: Option<f64>,
    pub exit: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
}

impl PriceLevels {
    pub fn get(&self, label: LevelLabel) -> Option<f64> {
        let raw = match label {
            LevelLabel::Entry => self.entry,
            LevelLabel::StopLoss => self.stop_loss,
            LevelLabel::TakeProfit => self.take_profit,
            LevelLabel::Exit => self.exit,
        };

        raw.filter(|price| price.is_finite() && *price != 0.0)
    }

    pub fn any_set(&self) -> bool {
        LevelLabel::DRAW_ORDER
            .iter()
            .any(|label| self.get(*label).is_some())
    }
}
