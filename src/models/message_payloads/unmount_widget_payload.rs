use actix::Message;

#[derive(Debug, Clone)]
pub struct UnmountWidgetPayload;

impl Message for UnmountWidgetPayload {
    type Result = ();
}
