use crate::{
    indicators::price_levels::PriceLevels,
    models::{trade::Trade, trade_direction::TradeDirection},
    utils::constants::DEFAULT_INTERVAL,
};

/// What a chart shows: symbol, interval and the trade levels to overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartParams {
    pub symbol: String,
    pub interval: String,
    pub direction: TradeDirection,
    pub levels: PriceLevels,
}

impl ChartParams {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: DEFAULT_INTERVAL.to_string(),
            direction: TradeDirection::Long,
            levels: PriceLevels::default(),
        }
    }

    pub fn from_trade(trade: &Trade) -> Self {
        Self {
            symbol: trade.symbol.clone(),
            interval: widget_interval(&trade.chart_timeframe),
            direction: trade.direction,
            levels: trade.price_levels(),
        }
    }
}

/// Maps a journal timeframe (`15m`, `4h`, `1d`) to the widget's interval
/// notation. Unknown values are passed through upper-cased.
pub fn widget_interval(timeframe: &str) -> String {
    let tf = timeframe.trim().to_lowercase();

    let mapped = match tf.as_str() {
        "1m" => "1",
        "3m" => "3",
        "5m" => "5",
        "15m" => "15",
        "30m" => "30",
        "1h" => "60",
        "2h" => "120",
        "3h" => "180",
        "4h" => "240",
        "1d" | "d" => "1D",
        "1w" | "w" => "1W",
        "1mo" | "1mth" => "1M",
        "" => DEFAULT_INTERVAL,
        _ => return timeframe.trim().to_uppercase(),
    };

    mapped.to_string()
}
