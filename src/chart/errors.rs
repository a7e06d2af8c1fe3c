use crate::indicators::price_levels::LevelLabel;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptLoadError {
    #[error("failed to load charting library from {url}: {reason}")]
    Network { url: String, reason: String },
    #[error("charting library did not load within {0:?}")]
    TimedOut(Duration),
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("chart widget construction failed: {0}")]
pub struct WidgetConstructionError(pub String);

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unable to draw {label} line: {reason}")]
pub struct OverlayDrawError {
    pub label: LevelLabel,
    pub reason: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("chart widget teardown failed: {0}")]
pub struct WidgetTeardownError(pub String);

/// Errors that put a chart session into the visible error state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error(transparent)]
    ScriptLoad(#[from] ScriptLoadError),
    #[error(transparent)]
    Construction(#[from] WidgetConstructionError),
}
