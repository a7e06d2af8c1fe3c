pub const DEFAULT_SYMBOL: &str = "AAPL";
pub const DEFAULT_INTERVAL: &str = "1D";
pub const DEFAULT_TIMEFRAME: &str = "1d";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const CHART_SCRIPT_URL: &str = "https://s3.tradingview.com/tv.js";
pub const CONTAINER_ID_PREFIX: &str = "tradingview";
pub const CONTAINER_ID_SUFFIX_LEN: usize = 9;
pub const DEFAULT_STUDIES: [&str; 2] = ["RSI@tv-basicstudies", "MACD@tv-basicstudies"];

pub const STRATEGIES_KEY: &str = "strategies";
pub const TRADES_KEY: &str = "trades";

/// Profit factor reported when there are wins but no losing P&L to divide by.
pub const DEFAULT_PROFIT_FACTOR_SENTINEL: f64 = 999.0;

pub const DEFAULT_RISK_REWARD_RATIO: f64 = 2.0;
pub const UNTITLED_STRATEGY: &str = "Untitled Strategy";
