use crate::{
    chart::{
        chart_params::ChartParams,
        container_identity::ContainerIdentity,
        errors::{ChartError, ScriptLoadError, WidgetConstructionError, WidgetTeardownError},
        ready_signal::{ready_channel, ReadyResult},
        script_loader::ScriptLoader,
        widget_config::WidgetConfig,
        widget_session::{WidgetKey, WidgetSession, WidgetStatus},
        widget_state::WidgetState,
    },
    indicators::indicator_overlay::IndicatorOverlay,
    models::{
        message_payloads::{
            dispose_widget_payload::DisposeWidgetPayload,
            get_widget_state_payload::GetWidgetStatePayload,
            initialize_widget_payload::InitializeWidgetPayload,
            retry_widget_payload::RetryWidgetPayload,
            unmount_widget_payload::UnmountWidgetPayload,
            update_chart_params_payload::UpdateChartParamsPayload,
        },
        traits::{chart_library::ChartLibrary, mount_point::MountPoint},
    },
};
use actix::{Actor, ActorContext, ActorFutureExt, AsyncContext, Context, Handler, WrapFuture};
use chrono::Utc;
use std::{sync::Arc, time::Duration};
use tracing::{debug, error, info, warn};

/// Owns the chart widget for one mount point.
///
/// `Idle -> Loading -> Ready | Error`, `Error -> Loading` on retry and any
/// state `-> Idle` on disposal. Every async step carries the widget key it
/// was started under and is dropped if that key is no longer current, so at
/// most one live widget exists per container.
pub struct ChartWidgetManager {
    pub(crate) library: Arc<dyn ChartLibrary>,
    pub(crate) loader: Arc<ScriptLoader>,
    pub(crate) params: ChartParams,
    pub(crate) container_id: String,
    pub(crate) container: Option<Arc<dyn MountPoint>>,
    pub(crate) session: Option<WidgetSession>,
    pub(crate) last_key: WidgetKey,
    pub(crate) load_timeout: Option<Duration>,
}

impl Actor for ChartWidgetManager {
    type Context = Context<Self>;

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.dispose();
        debug!(container_id = %self.container_id, "Chart widget manager stopped");
    }
}

impl ChartWidgetManager {
    pub fn state(&self) -> WidgetState {
        let session = self.session.as_ref();

        WidgetState {
            status: session.map_or(WidgetStatus::Idle, |s| s.status()),
            widget_key: session.map(|s| s.widget_key),
            container_id: self.container_id.clone(),
            symbol: self.params.symbol.clone(),
            loading: session.map_or(false, |s| s.loading),
            error: session.map_or(false, |s| s.error.is_some()),
            last_error: session.and_then(|s| s.error.clone()),
            has_widget: session.map_or(false, |s| s.has_widget()),
        }
    }

    fn next_widget_key(&mut self) -> WidgetKey {
        let key = Utc::now().timestamp_millis().max(self.last_key + 1);
        self.last_key = key;
        key
    }

    fn is_current(&self, widget_key: WidgetKey) -> bool {
        self.session.as_ref().map(|s| s.widget_key) == Some(widget_key)
    }

    fn initialize(&mut self, container: Arc<dyn MountPoint>, ctx: &mut Context<Self>) -> WidgetKey {
        self.dispose();
        self.container = Some(container.clone());

        let widget_key = self.next_widget_key();
        self.session = Some(WidgetSession::new(widget_key, self.container_id.clone()));

        info!(
            widget_key,
            symbol = %self.params.symbol,
            container_id = %self.container_id,
            "Loading chart widget"
        );

        let loader = self.loader.clone();
        let load_timeout = self.load_timeout;

        let fut = async move {
            match load_timeout {
                Some(limit) => loader.ensure_loaded_within(limit).await,
                None => loader.ensure_loaded().await,
            }
        };

        ctx.spawn(
            fut.into_actor(self)
                .map(move |res, act, ctx| act.on_script_loaded(widget_key, container, res, ctx)),
        );

        widget_key
    }

    fn on_script_loaded(
        &mut self,
        widget_key: WidgetKey,
        container: Arc<dyn MountPoint>,
        res: Result<(), ScriptLoadError>,
        ctx: &mut Context<Self>,
    ) {
        if !self.is_current(widget_key) {
            debug!(widget_key, "Discarding script load of superseded chart session");
            return;
        }

        if let Err(e) = res {
            error!(widget_key, error = %e, "Error loading charting library");
            self.fail_session(e.into());
            return;
        }

        container.clear();

        let config = WidgetConfig::new(&self.params.symbol, &self.params.interval, &self.container_id);
        let (notifier, listener) = ready_channel();

        match self.library.create_widget(config, notifier) {
            Ok(widget) => {
                if let Some(session) = self.session.as_mut() {
                    session.attach(widget);
                }

                ctx.spawn(
                    listener
                        .wait()
                        .into_actor(self)
                        .map(move |res, act, _ctx| act.on_widget_ready(widget_key, res)),
                );
            }
            Err(e) => {
                let err = WidgetConstructionError(format!("{:#}", e));
                error!(widget_key, error = %err, "Error initializing chart widget");
                self.fail_session(err.into());
            }
        }
    }

    fn on_widget_ready(&mut self, widget_key: WidgetKey, res: ReadyResult) {
        if !self.is_current(widget_key) {
            debug!(widget_key, "Discarding ready signal of superseded chart session");
            return;
        }

        if let Err(e) = res {
            error!(widget_key, error = %e, "Chart widget failed to become ready");
            self.teardown_widget();
            self.fail_session(e.into());
            return;
        }

        let levels = self.params.levels;
        let direction = self.params.direction;

        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.mark_ready();
        info!(widget_key, "Chart widget ready");

        if !levels.any_set() {
            return;
        }

        if let Some(widget) = session.widget_mut() {
            let chart = widget.chart();
            let range = chart.visible_range();
            IndicatorOverlay::draw(chart, range, &levels, direction);
        }
    }

    fn fail_session(&mut self, err: ChartError) {
        if let Some(session) = self.session.as_mut() {
            session.fail(err);
        }
    }

    /// Removes the current widget, if any, keeping the session.
    fn teardown_widget(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let widget_key = session.widget_key;

        if let Some(mut widget) = session.take_widget() {
            match widget.remove() {
                Ok(()) => debug!(widget_key, "Chart widget removed"),
                Err(e) => {
                    let err = WidgetTeardownError(format!("{:#}", e));
                    error!(widget_key, error = %err, "Error cleaning up chart widget");
                }
            }
        }
    }

    /// Tears down the live widget and returns to `Idle`. Any result still in
    /// flight for the old session is discarded when it arrives.
    pub(crate) fn dispose(&mut self) {
        self.teardown_widget();

        if let Some(session) = self.session.take() {
            debug!(widget_key = session.widget_key, "Chart session disposed");
        }
    }

    fn retry(&mut self, ctx: &mut Context<Self>) -> Option<WidgetKey> {
        let Some(container) = self.container.clone() else {
            warn!(symbol = %self.params.symbol, "Retry requested before chart was mounted");
            return None;
        };

        info!(symbol = %self.params.symbol, "Retrying chart widget");
        Some(self.initialize(container, ctx))
    }

    fn update_params(&mut self, params: ChartParams, ctx: &mut Context<Self>) -> Option<WidgetKey> {
        self.dispose();

        if params.symbol != self.params.symbol {
            self.container_id = ContainerIdentity::create(&params.symbol);
        }
        self.params = params;

        let container = self.container.clone()?;
        Some(self.initialize(container, ctx))
    }
}

impl Handler<InitializeWidgetPayload> for ChartWidgetManager {
    type Result = WidgetKey;

    fn handle(&mut self, msg: InitializeWidgetPayload, ctx: &mut Self::Context) -> Self::Result {
        self.initialize(msg.container, ctx)
    }
}

impl Handler<RetryWidgetPayload> for ChartWidgetManager {
    type Result = Option<WidgetKey>;

    fn handle(&mut self, _msg: RetryWidgetPayload, ctx: &mut Self::Context) -> Self::Result {
        self.retry(ctx)
    }
}

impl Handler<UpdateChartParamsPayload> for ChartWidgetManager {
    type Result = Option<WidgetKey>;

    fn handle(&mut self, msg: UpdateChartParamsPayload, ctx: &mut Self::Context) -> Self::Result {
        self.update_params(msg.params, ctx)
    }
}

impl Handler<DisposeWidgetPayload> for ChartWidgetManager {
    type Result = ();

    fn handle(&mut self, _msg: DisposeWidgetPayload, _ctx: &mut Self::Context) -> Self::Result {
        self.dispose();
    }
}

impl Handler<UnmountWidgetPayload> for ChartWidgetManager {
    type Result = ();

    fn handle(&mut self, _msg: UnmountWidgetPayload, ctx: &mut Self::Context) -> Self::Result {
        ctx.stop();
    }
}

impl Handler<GetWidgetStatePayload> for ChartWidgetManager {
    type Result = WidgetState;

    fn handle(&mut self, _msg: GetWidgetStatePayload, _ctx: &mut Self::Context) -> Self::Result {
        self.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chart::{
            test_support::{FakeChartLibrary, LoadBehaviour, RecordingMountPoint},
            widget_manager_builder::ChartWidgetManagerBuilder,
        },
        indicators::price_levels::PriceLevels,
        models::trade_direction::TradeDirection,
    };
    use actix::Addr;
    use std::collections::HashSet;

    fn params(symbol: &str) -> ChartParams {
        ChartParams {
            symbol: symbol.to_string(),
            interval: "1D".to_string(),
            direction: TradeDirection::Long,
            levels: PriceLevels {
                entry: Some(170.25),
                exit: None,
                stop_loss: Some(168.0),
                take_profit: Some(178.0),
            },
        }
    }

    fn start(library: &Arc<FakeChartLibrary>, timeout: Option<Duration>) -> Addr<ChartWidgetManager> {
        let mut builder = ChartWidgetManagerBuilder::new()
            .library(library.clone())
            .params(params("AAPL"));
        if let Some(limit) = timeout {
            builder = builder.load_timeout(limit);
        }

        builder.build().unwrap().start()
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(25)).await;
    }

    async fn state(addr: &Addr<ChartWidgetManager>) -> WidgetState {
        addr.send(GetWidgetStatePayload).await.unwrap()
    }

    #[actix::test]
    async fn initialize_reaches_ready_and_draws_levels() {
        let library = Arc::new(FakeChartLibrary::new());
        let addr = start(&library, None);
        let mount = Arc::new(RecordingMountPoint::default());

        assert_eq!(state(&addr).await.status, WidgetStatus::Idle);

        let key = addr
            .send(InitializeWidgetPayload { container: mount.clone() })
            .await
            .unwrap();
        settle().await;

        let state = state(&addr).await;
        assert_eq!(state.status, WidgetStatus::Ready);
        assert_eq!(state.widget_key, Some(key));
        assert!(!state.loading && !state.error && state.has_widget);
        assert_eq!(library.live(), 1);
        assert_eq!(library.shapes().len(), 3);
        assert_eq!(mount.clears(), 1);

        let config = &library.configs()[0];
        assert_eq!(config.symbol, "AAPL");
        assert_eq!(config.container_id, state.container_id);
        assert!(config.container_id.starts_with("tradingview_AAPL_"));
    }

    #[actix::test]
    async fn rapid_reinitialize_keeps_only_latest_session() {
        let library = Arc::new(FakeChartLibrary::new());
        library.push_load(LoadBehaviour::Manual);
        let addr = start(&library, None);
        let mount = Arc::new(RecordingMountPoint::default());

        let first = addr
            .send(InitializeWidgetPayload { container: mount.clone() })
            .await
            .unwrap();
        let second = addr
            .send(InitializeWidgetPayload { container: mount.clone() })
            .await
            .unwrap();
        assert!(second > first);
        assert_eq!(state(&addr).await.status, WidgetStatus::Loading);

        library.resolve_loads(Ok(()));
        settle().await;

        let state = state(&addr).await;
        assert_eq!(state.status, WidgetStatus::Ready);
        assert_eq!(state.widget_key, Some(second));
        assert_eq!(library.load_calls(), 1);
        assert_eq!(library.created(), 1);
        assert_eq!(library.live(), 1);

        // Exactly one overlay: the three levels, all on the one widget.
        let shapes = library.shapes();
        assert_eq!(shapes.len(), 3);
        assert!(shapes.iter().all(|(id, _)| *id == 0));
    }

    #[actix::test]
    async fn ready_after_dispose_is_ignored() {
        let library = Arc::new(FakeChartLibrary::new());
        library.set_manual_ready(true);
        let addr = start(&library, None);
        let mount = Arc::new(RecordingMountPoint::default());

        addr.send(InitializeWidgetPayload { container: mount }).await.unwrap();
        settle().await;
        assert_eq!(library.live(), 1);

        addr.send(DisposeWidgetPayload).await.unwrap();
        library.fire_ready();
        settle().await;

        let state = state(&addr).await;
        assert_eq!(state.status, WidgetStatus::Idle);
        assert!(!state.has_widget);
        assert_eq!(library.live(), 0);
        assert!(library.shapes().is_empty());
    }

    #[actix::test]
    async fn script_failure_surfaces_error_until_retry() {
        let library = Arc::new(FakeChartLibrary::new());
        library.push_load(LoadBehaviour::Fail("404".to_string()));
        let addr = start(&library, None);
        let mount = Arc::new(RecordingMountPoint::default());

        let first = addr
            .send(InitializeWidgetPayload { container: mount })
            .await
            .unwrap();
        settle().await;

        let failed = state(&addr).await;
        assert_eq!(failed.status, WidgetStatus::Error);
        assert!(failed.error && !failed.loading);
        assert!(matches!(failed.last_error, Some(ChartError::ScriptLoad(_))));
        assert_eq!(library.created(), 0);

        // Never retried on its own.
        settle().await;
        assert_eq!(library.load_calls(), 1);

        let retried = addr.send(RetryWidgetPayload).await.unwrap().unwrap();
        assert!(retried > first);
        settle().await;

        let state = state(&addr).await;
        assert_eq!(state.status, WidgetStatus::Ready);
        assert_eq!(state.last_error, None);
        assert_eq!(library.load_calls(), 2);
        assert_eq!(library.live(), 1);
    }

    #[actix::test]
    async fn construction_failure_is_an_error_state() {
        let library = Arc::new(FakeChartLibrary::new());
        library.fail_next_construction();
        let addr = start(&library, None);
        let mount = Arc::new(RecordingMountPoint::default());

        addr.send(InitializeWidgetPayload { container: mount }).await.unwrap();
        settle().await;

        let state = state(&addr).await;
        assert_eq!(state.status, WidgetStatus::Error);
        assert!(matches!(state.last_error, Some(ChartError::Construction(_))));
        assert!(!state.has_widget);

        addr.send(RetryWidgetPayload).await.unwrap();
        settle().await;
        assert_eq!(state_status(&addr).await, WidgetStatus::Ready);
    }

    async fn state_status(addr: &Addr<ChartWidgetManager>) -> WidgetStatus {
        state(addr).await.status
    }

    #[actix::test]
    async fn failed_ready_signal_removes_widget() {
        let library = Arc::new(FakeChartLibrary::new());
        library.set_manual_ready(true);
        let addr = start(&library, None);
        let mount = Arc::new(RecordingMountPoint::default());

        addr.send(InitializeWidgetPayload { container: mount }).await.unwrap();
        settle().await;
        library.fail_ready("chart pane missing");
        settle().await;

        let state = state(&addr).await;
        assert_eq!(state.status, WidgetStatus::Error);
        assert!(!state.has_widget);
        assert_eq!(library.live(), 0);
        assert!(library.shapes().is_empty());
    }

    #[actix::test]
    async fn dispose_then_initialize_never_double_tears_down() {
        let library = Arc::new(FakeChartLibrary::new());
        let addr = start(&library, None);
        let mount = Arc::new(RecordingMountPoint::default());

        addr.send(InitializeWidgetPayload { container: mount.clone() })
            .await
            .unwrap();
        settle().await;
        addr.send(DisposeWidgetPayload).await.unwrap();
        addr.send(DisposeWidgetPayload).await.unwrap();
        assert_eq!(library.live(), 0);

        addr.send(InitializeWidgetPayload { container: mount })
            .await
            .unwrap();
        settle().await;

        assert_eq!(library.removed(), vec![0]);
        assert_eq!(library.double_removals(), 0);
        assert_eq!(library.live(), 1);
        assert_eq!(state_status(&addr).await, WidgetStatus::Ready);
    }

    #[actix::test]
    async fn reinitialize_replaces_live_widget() {
        let library = Arc::new(FakeChartLibrary::new());
        let addr = start(&library, None);
        let mount = Arc::new(RecordingMountPoint::default());

        for _ in 0..3 {
            addr.send(InitializeWidgetPayload { container: mount.clone() })
                .await
                .unwrap();
            settle().await;
            assert_eq!(library.live(), 1);
        }

        assert_eq!(library.created(), 3);
        assert_eq!(library.removed(), vec![0, 1]);
    }

    #[actix::test]
    async fn teardown_errors_are_contained() {
        let library = Arc::new(FakeChartLibrary::new());
        library.set_failing_removal(true);
        let addr = start(&library, None);
        let mount = Arc::new(RecordingMountPoint::default());

        addr.send(InitializeWidgetPayload { container: mount }).await.unwrap();
        settle().await;
        addr.send(DisposeWidgetPayload).await.unwrap();

        let state = state(&addr).await;
        assert_eq!(state.status, WidgetStatus::Idle);
        assert!(!state.has_widget);
        assert_eq!(library.removed(), vec![0]);
    }

    #[actix::test]
    async fn unmount_disposes_widget() {
        let library = Arc::new(FakeChartLibrary::new());
        let addr = start(&library, None);
        let mount = Arc::new(RecordingMountPoint::default());

        addr.send(InitializeWidgetPayload { container: mount }).await.unwrap();
        settle().await;
        assert_eq!(library.live(), 1);

        addr.send(UnmountWidgetPayload).await.unwrap();
        settle().await;

        assert_eq!(library.live(), 0);
        assert!(!addr.connected());
    }

    #[actix::test]
    async fn stuck_load_times_out() {
        let library = Arc::new(FakeChartLibrary::new());
        library.push_load(LoadBehaviour::Manual);
        let addr = start(&library, Some(Duration::from_millis(30)));
        let mount = Arc::new(RecordingMountPoint::default());

        addr.send(InitializeWidgetPayload { container: mount }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;

        let state = state(&addr).await;
        assert_eq!(state.status, WidgetStatus::Error);
        assert!(matches!(
            state.last_error,
            Some(ChartError::ScriptLoad(ScriptLoadError::TimedOut(_)))
        ));
    }

    #[actix::test]
    async fn retry_after_timeout_starts_a_fresh_load() {
        let library = Arc::new(FakeChartLibrary::new());
        library.push_load(LoadBehaviour::Manual);
        let addr = start(&library, Some(Duration::from_millis(30)));
        let mount = Arc::new(RecordingMountPoint::default());

        addr.send(InitializeWidgetPayload { container: mount }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(state(&addr).await.status, WidgetStatus::Error);

        addr.send(RetryWidgetPayload).await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;

        let state = state(&addr).await;
        assert_eq!(library.load_calls(), 2);
        assert_eq!(state.status, WidgetStatus::Ready);
        assert!(state.last_error.is_none());
        assert_eq!(library.live(), 1);
    }

    #[actix::test]
    async fn symbol_change_remounts_under_new_container() {
        let library = Arc::new(FakeChartLibrary::new());
        let addr = start(&library, None);
        let mount = Arc::new(RecordingMountPoint::default());

        addr.send(InitializeWidgetPayload { container: mount }).await.unwrap();
        settle().await;
        let before = state(&addr).await;

        let key = addr
            .send(UpdateChartParamsPayload { params: params("MSFT") })
            .await
            .unwrap();
        settle().await;
        let after = state(&addr).await;

        assert_eq!(after.widget_key, key);
        assert_eq!(after.symbol, "MSFT");
        assert_ne!(after.container_id, before.container_id);
        assert!(after.container_id.starts_with("tradingview_MSFT_"));
        assert_eq!(library.live(), 1);
        assert_eq!(library.configs()[1].symbol, "MSFT");
    }

    #[actix::test]
    async fn managers_sharing_a_loader_load_once() {
        let library = Arc::new(FakeChartLibrary::new());
        let loader = Arc::new(ScriptLoader::new(library.clone()));
        let addrs: Vec<Addr<ChartWidgetManager>> = ["AAPL", "AAPL", "TSLA"]
            .iter()
            .map(|symbol| {
                ChartWidgetManagerBuilder::new()
                    .library(library.clone())
                    .loader(loader.clone())
                    .params(params(symbol))
                    .build()
                    .unwrap()
                    .start()
            })
            .collect();

        for addr in addrs.iter() {
            let mount = Arc::new(RecordingMountPoint::default());
            addr.send(InitializeWidgetPayload { container: mount }).await.unwrap();
        }
        settle().await;

        let mut container_ids = HashSet::new();
        for addr in addrs.iter() {
            let state = state(addr).await;
            assert_eq!(state.status, WidgetStatus::Ready);
            container_ids.insert(state.container_id);
        }

        assert_eq!(library.load_calls(), 1);
        assert_eq!(library.live(), 3);
        assert_eq!(container_ids.len(), 3);
    }

    #[actix::test]
    async fn retry_before_mount_does_nothing() {
        let library = Arc::new(FakeChartLibrary::new());
        let addr = start(&library, None);

        assert_eq!(addr.send(RetryWidgetPayload).await.unwrap(), None);
        assert_eq!(
            addr.send(UpdateChartParamsPayload { params: params("MSFT") })
                .await
                .unwrap(),
            None
        );
        assert_eq!(library.load_calls(), 0);
        assert_eq!(state_status(&addr).await, WidgetStatus::Idle);
    }
}
