use crate::{
    chart::{ready_signal::ReadyNotifier, widget_config::WidgetConfig},
    indicators::shape::{ShapeOptions, ShapePoint, VisibleRange},
    models::traits::{
        chart_library::{ChartApi, ChartLibrary, ChartWidget},
        mount_point::MountPoint,
    },
};
use anyhow::{anyhow, Result};
use chrono::{Duration as ChronoDuration, Utc};
use futures_util::{future::BoxFuture, FutureExt};
use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::time::sleep;
use tracing::{debug, info};

/// In-process stand-in for the browser charting library. Widgets render
/// nothing; construction and every drawn shape are logged.
pub struct HeadlessChartLibrary {
    script_url: String,
    load_delay: Duration,
    loaded: Arc<AtomicBool>,
    failing_loads: Arc<AtomicUsize>,
}

impl HeadlessChartLibrary {
    pub fn new(script_url: impl Into<String>) -> Self {
        Self {
            script_url: script_url.into(),
            load_delay: Duration::from_millis(50),
            loaded: Arc::new(AtomicBool::new(false)),
            failing_loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn load_delay(mut self, load_delay: Duration) -> Self {
        self.load_delay = load_delay;
        self
    }

    /// Makes the next `n` loads fail, e.g. to exercise retry.
    pub fn failing_loads(self, n: usize) -> Self {
        self.failing_loads.store(n, Ordering::SeqCst);
        self
    }
}

impl ChartLibrary for HeadlessChartLibrary {
    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    fn script_url(&self) -> String {
        self.script_url.clone()
    }

    fn load_script(&self) -> BoxFuture<'static, Result<()>> {
        let delay = self.load_delay;
        let loaded = self.loaded.clone();
        let failing_loads = self.failing_loads.clone();

        async move {
            sleep(delay).await;

            let fail = failing_loads
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if fail {
                return Err(anyhow!("script request failed"));
            }

            loaded.store(true, Ordering::SeqCst);
            Ok(())
        }
        .boxed()
    }

    fn create_widget(
        &self,
        config: WidgetConfig,
        on_ready: ReadyNotifier,
    ) -> Result<Box<dyn ChartWidget>> {
        info!(
            symbol = %config.symbol,
            interval = %config.interval,
            container_id = %config.container_id,
            config = %serde_json::to_string(&config)?,
            "Headless widget created"
        );

        let now = Utc::now();
        let chart = HeadlessChart {
            range: VisibleRange {
                from: (now - ChronoDuration::days(30)).timestamp(),
                to: now.timestamp(),
            },
        };

        on_ready.ready();

        Ok(Box::new(HeadlessWidget {
            container_id: config.container_id,
            chart,
        }))
    }
}

struct HeadlessWidget {
    container_id: String,
    chart: HeadlessChart,
}

impl ChartWidget for HeadlessWidget {
    fn chart(&mut self) -> &mut dyn ChartApi {
        &mut self.chart
    }

    fn remove(&mut self) -> Result<()> {
        info!(container_id = %self.container_id, "Headless widget removed");
        Ok(())
    }
}

struct HeadlessChart {
    range: VisibleRange,
}

impl ChartApi for HeadlessChart {
    fn visible_range(&self) -> VisibleRange {
        self.range
    }

    fn create_multipoint_shape(&mut self, points: &[ShapePoint], options: &ShapeOptions) -> Result<()> {
        info!(
            text = %options.text,
            color = %options.overrides.linecolor,
            style = options.overrides.linestyle as u8,
            points = points.len(),
            "Shape drawn"
        );
        Ok(())
    }
}

/// Mount point with nothing underneath it.
pub struct HeadlessMountPoint {
    pub name: String,
}

impl MountPoint for HeadlessMountPoint {
    fn clear(&self) {
        debug!(name = %self.name, "Mount point cleared");
    }
}
