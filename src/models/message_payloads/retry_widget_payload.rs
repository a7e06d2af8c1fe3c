use crate::chart::widget_session::WidgetKey;
use actix::Message;

#[derive(Debug, Clone)]
pub struct RetryWidgetPayload;

impl Message for RetryWidgetPayload {
    type Result = Option<WidgetKey>;
}
