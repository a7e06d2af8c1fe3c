use actix::Message;

#[derive(Debug, Clone)]
pub struct DisposeWidgetPayload;

impl Message for DisposeWidgetPayload {
    type Result = ();
}
