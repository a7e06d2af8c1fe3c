use crate::{
    chart::{ready_signal::ReadyNotifier, widget_config::WidgetConfig},
    indicators::shape::{ShapeOptions, ShapePoint, VisibleRange},
    models::traits::{
        chart_library::{ChartApi, ChartLibrary, ChartWidget},
        mount_point::MountPoint,
    },
};
use anyhow::{anyhow, Result};
use futures_util::{future, FutureExt};
use std::{
    collections::{HashSet, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
use tokio::sync::oneshot;

pub enum LoadBehaviour {
    Succeed,
    Fail(String),
    /// Stays pending until `resolve_loads` is called.
    Manual,
}

#[derive(Default)]
pub struct LibraryLog {
    pub configs: Vec<WidgetConfig>,
    pub live: HashSet<usize>,
    pub removed: Vec<usize>,
    pub double_removals: usize,
    pub shapes: Vec<(usize, ShapeOptions)>,
}

#[derive(Default)]
pub struct FakeChartLibrary {
    log: Arc<Mutex<LibraryLog>>,
    load_calls: AtomicUsize,
    preloaded: Mutex<bool>,
    loads: Mutex<VecDeque<LoadBehaviour>>,
    pending_loads: Mutex<Vec<oneshot::Sender<Result<(), String>>>>,
    manual_ready: Mutex<bool>,
    pending_ready: Mutex<Vec<ReadyNotifier>>,
    fail_construction: Mutex<bool>,
    failing_removal: Mutex<bool>,
}

impl FakeChartLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_load(&self, behaviour: LoadBehaviour) {
        self.loads.lock().unwrap().push_back(behaviour);
    }

    pub fn resolve_loads(&self, result: Result<(), String>) {
        for tx in self.pending_loads.lock().unwrap().drain(..) {
            let _ = tx.send(result.clone());
        }
    }

    pub fn set_preloaded(&self, preloaded: bool) {
        *self.preloaded.lock().unwrap() = preloaded;
    }

    pub fn set_manual_ready(&self, manual: bool) {
        *self.manual_ready.lock().unwrap() = manual;
    }

    pub fn fire_ready(&self) {
        for notifier in self.pending_ready.lock().unwrap().drain(..) {
            notifier.ready();
        }
    }

    pub fn fail_ready(&self, reason: &str) {
        for notifier in self.pending_ready.lock().unwrap().drain(..) {
            notifier.fail(reason);
        }
    }

    pub fn fail_next_construction(&self) {
        *self.fail_construction.lock().unwrap() = true;
    }

    pub fn set_failing_removal(&self, failing: bool) {
        *self.failing_removal.lock().unwrap() = failing;
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> usize {
        self.log.lock().unwrap().configs.len()
    }

    pub fn configs(&self) -> Vec<WidgetConfig> {
        self.log.lock().unwrap().configs.clone()
    }

    pub fn live(&self) -> usize {
        self.log.lock().unwrap().live.len()
    }

    pub fn removed(&self) -> Vec<usize> {
        self.log.lock().unwrap().removed.clone()
    }

    pub fn double_removals(&self) -> usize {
        self.log.lock().unwrap().double_removals
    }

    /// Drawn shapes as `(widget index, options)`.
    pub fn shapes(&self) -> Vec<(usize, ShapeOptions)> {
        self.log.lock().unwrap().shapes.clone()
    }
}

impl ChartLibrary for FakeChartLibrary {
    fn is_loaded(&self) -> bool {
        *self.preloaded.lock().unwrap()
    }

    fn script_url(&self) -> String {
        "https://charts.test/tv.js".to_string()
    }

    fn load_script(&self) -> future::BoxFuture<'static, Result<()>> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);

        let behaviour = self
            .loads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(LoadBehaviour::Succeed);

        match behaviour {
            LoadBehaviour::Succeed => future::ready(Ok(())).boxed(),
            LoadBehaviour::Fail(reason) => future::ready(Err(anyhow!(reason))).boxed(),
            LoadBehaviour::Manual => {
                let (tx, rx) = oneshot::channel();
                self.pending_loads.lock().unwrap().push(tx);
                async move {
                    rx.await
                        .map_err(|_| anyhow!("load abandoned"))?
                        .map_err(|reason| anyhow!(reason))
                }
                .boxed()
            }
        }
    }

    fn create_widget(
        &self,
        config: WidgetConfig,
        on_ready: ReadyNotifier,
    ) -> Result<Box<dyn ChartWidget>> {
        {
            let mut fail = self.fail_construction.lock().unwrap();
            if *fail {
                *fail = false;
                return Err(anyhow!("TradingView is not a constructor"));
            }
        }

        let id = {
            let mut log = self.log.lock().unwrap();
            log.configs.push(config);
            let id = log.configs.len() - 1;
            log.live.insert(id);
            id
        };

        if *self.manual_ready.lock().unwrap() {
            self.pending_ready.lock().unwrap().push(on_ready);
        } else {
            on_ready.ready();
        }

        Ok(Box::new(FakeWidget {
            id,
            log: self.log.clone(),
            failing_removal: *self.failing_removal.lock().unwrap(),
            chart: FakeChart {
                id,
                log: self.log.clone(),
            },
        }))
    }
}

struct FakeWidget {
    id: usize,
    log: Arc<Mutex<LibraryLog>>,
    failing_removal: bool,
    chart: FakeChart,
}

impl ChartWidget for FakeWidget {
    fn chart(&mut self) -> &mut dyn ChartApi {
        &mut self.chart
    }

    fn remove(&mut self) -> Result<()> {
        let mut log = self.log.lock().unwrap();

        if log.removed.contains(&self.id) {
            log.double_removals += 1;
        }
        log.removed.push(self.id);
        log.live.remove(&self.id);

        if self.failing_removal {
            return Err(anyhow!("Cannot read properties of null (reading 'parentNode')"));
        }

        Ok(())
    }
}

struct FakeChart {
    id: usize,
    log: Arc<Mutex<LibraryLog>>,
}

impl ChartApi for FakeChart {
    fn visible_range(&self) -> VisibleRange {
        VisibleRange {
            from: 1_697_000_000,
            to: 1_697_600_000,
        }
    }

    fn create_multipoint_shape(&mut self, _points: &[ShapePoint], options: &ShapeOptions) -> Result<()> {
        self.log.lock().unwrap().shapes.push((self.id, options.clone()));
        Ok(())
    }
}

/// Standalone chart that records shapes and can reject lines by text prefix.
#[derive(Default)]
pub struct RecordingChart {
    shapes: Vec<(Vec<ShapePoint>, ShapeOptions)>,
    fail_prefix: Option<String>,
}

impl RecordingChart {
    pub fn failing_on(prefix: &str) -> Self {
        Self {
            shapes: vec![],
            fail_prefix: Some(prefix.to_string()),
        }
    }

    pub fn shapes(&self) -> Vec<(Vec<ShapePoint>, ShapeOptions)> {
        self.shapes.clone()
    }
}

impl ChartApi for RecordingChart {
    fn visible_range(&self) -> VisibleRange {
        VisibleRange { from: 0, to: 1 }
    }

    fn create_multipoint_shape(&mut self, points: &[ShapePoint], options: &ShapeOptions) -> Result<()> {
        if let Some(prefix) = &self.fail_prefix {
            if options.text.starts_with(prefix.as_str()) {
                return Err(anyhow!("shape rejected"));
            }
        }

        self.shapes.push((points.to_vec(), options.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingMountPoint {
    clears: AtomicUsize,
}

impl RecordingMountPoint {
    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl MountPoint for RecordingMountPoint {
    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }
}
