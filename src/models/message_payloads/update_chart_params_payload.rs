use crate::chart::{chart_params::ChartParams, widget_session::WidgetKey};
use actix::Message;

#[derive(Debug, Clone)]
pub struct UpdateChartParamsPayload {
    pub params: ChartParams,
}

impl Message for UpdateChartParamsPayload {
    type Result = Option<WidgetKey>;
}
