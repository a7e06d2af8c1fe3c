use anyhow::{anyhow, Result};
use dotenv::dotenv;
use std::env;
use trade_journal::{
    models::journal_config::JournalConfig,
    run_configs::{chart_session, dashboard_report},
    utils::logging::init_tracing,
};

#[actix::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = JournalConfig::from_env()?;
    init_tracing(Some(&config.log_level));

    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "report".to_string());

    match command.as_str() {
        "report" => dashboard_report::run(&config).await,
        "chart" => chart_session::run(&config, args.next()).await,
        other => Err(anyhow!("Unknown command '{}'. Use 'report' or 'chart [SYMBOL]'.", other)),
    }
}
