use crate::{chart::errors::ScriptLoadError, models::traits::chart_library::ChartLibrary};
use futures_util::{
    future::{BoxFuture, Shared},
    FutureExt,
};
use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tokio::time::timeout;
use tracing::{info, warn};

type SharedLoad = Shared<BoxFuture<'static, Result<(), ScriptLoadError>>>;

#[derive(Default)]
struct LoadState {
    loaded: bool,
    attempt: u64,
    in_flight: Option<SharedLoad>,
}

/// Loads the charting library once per process. Share one instance (behind an
/// `Arc`) between every chart manager.
///
/// Concurrent callers await the same attempt. A failed attempt is forgotten,
/// so the next call starts a fresh load.
pub struct ScriptLoader {
    library: Arc<dyn ChartLibrary>,
    state: Mutex<LoadState>,
}

impl ScriptLoader {
    pub fn new(library: Arc<dyn ChartLibrary>) -> Self {
        Self {
            library,
            state: Mutex::new(LoadState::default()),
        }
    }

    pub async fn ensure_loaded(&self) -> Result<(), ScriptLoadError> {
        let Some((attempt, load)) = self.current_attempt() else {
            return Ok(());
        };

        let res = load.await;
        self.finish(attempt, &res);

        res
    }

    /// Like `ensure_loaded`, but gives up after `limit`. A timed out attempt
    /// is abandoned, so the next call starts a fresh load.
    pub async fn ensure_loaded_within(&self, limit: Duration) -> Result<(), ScriptLoadError> {
        let Some((attempt, load)) = self.current_attempt() else {
            return Ok(());
        };

        match timeout(limit, load).await {
            Ok(res) => {
                self.finish(attempt, &res);
                res
            }
            Err(_) => {
                self.abandon(attempt, limit);
                Err(ScriptLoadError::TimedOut(limit))
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().loaded
    }

    /// Returns the in-flight load, starting one if needed. `None` when the
    /// library is already available.
    fn current_attempt(&self) -> Option<(u64, SharedLoad)> {
        let mut state = self.lock();

        if state.loaded || self.library.is_loaded() {
            state.loaded = true;
            return None;
        }

        if let Some(load) = &state.in_flight {
            return Some((state.attempt, load.clone()));
        }

        let url = self.library.script_url();
        info!(%url, "Injecting charting library");

        let fut = self.library.load_script();
        let load = async move {
            fut.await.map_err(|e| ScriptLoadError::Network {
                url,
                reason: format!("{:#}", e),
            })
        }
        .boxed()
        .shared();

        state.attempt += 1;
        state.in_flight = Some(load.clone());

        Some((state.attempt, load))
    }

    fn finish(&self, attempt: u64, res: &Result<(), ScriptLoadError>) {
        let mut state = self.lock();

        // Only the first waiter to get here settles the attempt.
        if state.attempt != attempt || state.in_flight.is_none() {
            return;
        }

        state.in_flight = None;

        match res {
            Ok(()) => state.loaded = true,
            Err(e) => warn!(error = %e, attempt, "Charting library load failed"),
        }
    }

    fn abandon(&self, attempt: u64, limit: Duration) {
        let mut state = self.lock();

        if state.attempt != attempt || state.in_flight.is_none() {
            return;
        }

        state.in_flight = None;
        warn!(attempt, ?limit, "Charting library load timed out, abandoning attempt");
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LoadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
