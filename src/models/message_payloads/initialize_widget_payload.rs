use crate::{chart::widget_session::WidgetKey, models::traits::mount_point::MountPoint};
use actix::Message;
use std::sync::Arc;

pub struct InitializeWidgetPayload {
    pub container: Arc<dyn MountPoint>,
}

impl Message for InitializeWidgetPayload {
    type Result = WidgetKey;
}
