use crate::{
    analytics::stats_calculator::StatsCalculator,
    chart::{
        chart_params::ChartParams,
        headless_library::{HeadlessChartLibrary, HeadlessMountPoint},
        script_loader::ScriptLoader,
        widget_manager::ChartWidgetManager,
        widget_manager_builder::ChartWidgetManagerBuilder,
        widget_session::WidgetStatus,
        widget_state::WidgetState,
    },
    models::{
        database::{journal_db::JournalDB, json_file_store::JsonFileStore},
        journal_config::JournalConfig,
        message_payloads::{
            get_trades_payload::GetTradesPayload, get_widget_state_payload::GetWidgetStatePayload,
            initialize_widget_payload::InitializeWidgetPayload,
            retry_widget_payload::RetryWidgetPayload,
            unmount_widget_payload::UnmountWidgetPayload,
            update_chart_params_payload::UpdateChartParamsPayload,
        },
        traits::{chart_library::ChartLibrary, mount_point::MountPoint},
    },
    run_configs::demo_data::seed_if_empty,
    utils::constants::DEFAULT_SYMBOL,
};
use actix::{Actor, Addr};
use anyhow::{anyhow, Result};
use std::{sync::Arc, time::Duration};
use tokio::time::sleep;
use tracing::{info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(25);
const MAX_POLLS: usize = 200;

/// Mounts a headless chart for `symbol`, or for the most recently entered
/// trade. The first script load is made to fail so the session goes through a
/// retry, then the interval is switched before unmounting.
pub async fn run(config: &JournalConfig, symbol: Option<String>) -> Result<()> {
    let params = match symbol {
        Some(symbol) => ChartParams::new(symbol),
        None => latest_trade_params(config).await?,
    };

    let library: Arc<dyn ChartLibrary> =
        Arc::new(HeadlessChartLibrary::new(config.chart_script_url.clone()).failing_loads(1));
    let loader = Arc::new(ScriptLoader::new(library.clone()));

    let mut builder = ChartWidgetManagerBuilder::new()
        .library(library)
        .loader(loader)
        .params(params.clone());
    if let Some(load_timeout) = config.chart_load_timeout {
        builder = builder.load_timeout(load_timeout);
    }
    let manager = builder.build()?.start();

    let container: Arc<dyn MountPoint> = Arc::new(HeadlessMountPoint {
        name: format!("chart-{}", params.symbol),
    });
    manager.send(InitializeWidgetPayload { container }).await?;

    let state = wait_settled(&manager).await?;
    if state.status == WidgetStatus::Error {
        warn!(error = ?state.last_error, "Chart failed to load, retrying");
        manager.send(RetryWidgetPayload).await?;
    }

    let state = wait_settled(&manager).await?;
    info!(status = %state.status, container_id = %state.container_id, "Chart settled");

    let mut hourly = params;
    hourly.interval = "60".to_string();
    manager.send(UpdateChartParamsPayload { params: hourly }).await?;

    let state = wait_settled(&manager).await?;
    info!(status = %state.status, widget_key = ?state.widget_key, "Chart interval switched");

    manager.send(UnmountWidgetPayload).await?;
    sleep(POLL_INTERVAL).await;

    Ok(())
}

async fn latest_trade_params(config: &JournalConfig) -> Result<ChartParams> {
    let store = JsonFileStore::new(&config.data_dir);
    let db = JournalDB::new(store, StatsCalculator::new(config.profit_factor_sentinel)).start();
    seed_if_empty(&db).await?;

    let trades = db.send(GetTradesPayload).await??;
    let params = trades
        .iter()
        .max_by_key(|t| t.entry_date)
        .map(ChartParams::from_trade)
        .unwrap_or_else(|| ChartParams::new(DEFAULT_SYMBOL));

    Ok(params)
}

/// Polls until the manager is no longer loading.
async fn wait_settled(manager: &Addr<ChartWidgetManager>) -> Result<WidgetState> {
    for _ in 0..MAX_POLLS {
        let state = manager.send(GetWidgetStatePayload).await?;
        if !state.loading {
            return Ok(state);
        }
        sleep(POLL_INTERVAL).await;
    }

    Err(anyhow!("Chart did not settle in time."))
}
