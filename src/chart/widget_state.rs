use crate::chart::{
    errors::ChartError,
    widget_session::{WidgetKey, WidgetStatus},
};
use actix::MessageResponse;

/// Snapshot of a manager for the presentation layer.
#[derive(Debug, Clone, PartialEq, MessageResponse)]
pub struct WidgetState {
    pub status: WidgetStatus,
    pub widget_key: Option<WidgetKey>,
    pub container_id: String,
    pub symbol: String,
    pub loading: bool,
    pub error: bool,
    pub last_error: Option<ChartError>,
    pub has_widget: bool,
}
