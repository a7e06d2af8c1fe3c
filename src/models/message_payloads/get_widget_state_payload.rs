use crate::chart::widget_state::WidgetState;
use actix::Message;

#[derive(Debug, Clone)]
pub struct GetWidgetStatePayload;

impl Message for GetWidgetStatePayload {
    type Result = WidgetState;
}
