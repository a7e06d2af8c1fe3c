use crate::{
    chart::{ready_signal::ReadyNotifier, widget_config::WidgetConfig},
    indicators::shape::{ShapeOptions, ShapePoint, VisibleRange},
};
use anyhow::Result;
use futures_util::future::BoxFuture;

/// The external charting library. Implementations wrap whatever actually
/// renders charts; nothing here draws by itself.
pub trait ChartLibrary: Send + Sync {
    /// True if the library is already available, e.g. injected by an earlier
    /// session.
    fn is_loaded(&self) -> bool;

    /// Where the library is fetched from. Used in load errors.
    fn script_url(&self) -> String;

    /// Fetches and injects the library. Called at most once per successful
    /// load by `ScriptLoader`.
    fn load_script(&self) -> BoxFuture<'static, Result<()>>;

    /// Constructs a widget bound to `config.container_id`. The library must
    /// fire `on_ready` once the chart can be drawn on, or fail it.
    fn create_widget(
        &self,
        config: WidgetConfig,
        on_ready: ReadyNotifier,
    ) -> Result<Box<dyn ChartWidget>>;
}

/// Handle to one constructed widget.
pub trait ChartWidget {
    fn chart(&mut self) -> &mut dyn ChartApi;

    fn remove(&mut self) -> Result<()>;
}

pub trait ChartApi {
    fn visible_range(&self) -> VisibleRange;

    fn create_multipoint_shape(
        &mut self,
        points: &[ShapePoint],
        options: &ShapeOptions,
    ) -> Result<()>;
}
