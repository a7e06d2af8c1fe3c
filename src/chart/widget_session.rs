use crate::{chart::errors::ChartError, models::traits::chart_library::ChartWidget};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Identifies one initialization attempt. Millisecond timestamp, strictly
/// increasing per manager.
pub type WidgetKey = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WidgetStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

impl Display for WidgetStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetStatus::Idle => write!(f, "Idle"),
            WidgetStatus::Loading => write!(f, "Loading"),
            WidgetStatus::Ready => write!(f, "Ready"),
            WidgetStatus::Error => write!(f, "Error"),
        }
    }
}

/// State of the current initialization attempt. Owns the widget handle; the
/// handle only leaves through `take_widget` on teardown.
pub struct WidgetSession {
    pub widget_key: WidgetKey,
    pub container_id: String,
    pub loading: bool,
    pub error: Option<ChartError>,
    widget: Option<Box<dyn ChartWidget>>,
}

impl WidgetSession {
    pub fn new(widget_key: WidgetKey, container_id: String) -> Self {
        Self {
            widget_key,
            container_id,
            loading: true,
            error: None,
            widget: None,
        }
    }

    pub fn status(&self) -> WidgetStatus {
        if self.error.is_some() {
            WidgetStatus::Error
        } else if self.loading {
            WidgetStatus::Loading
        } else {
            WidgetStatus::Ready
        }
    }

    pub fn attach(&mut self, widget: Box<dyn ChartWidget>) {
        self.widget = Some(widget);
    }

    pub fn widget_mut(&mut self) -> Option<&mut (dyn ChartWidget + 'static)> {
        self.widget.as_deref_mut()
    }

    pub fn take_widget(&mut self) -> Option<Box<dyn ChartWidget>> {
        self.widget.take()
    }

    pub fn has_widget(&self) -> bool {
        self.widget.is_some()
    }

    pub fn mark_ready(&mut self) {
        self.loading = false;
    }

    pub fn fail(&mut self, error: ChartError) {
        self.loading = false;
        self.error = Some(error);
    }
}
