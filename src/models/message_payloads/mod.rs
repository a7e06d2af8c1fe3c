pub mod close_trade_payload;
pub mod create_strategy_payload;
pub mod create_trade_payload;
pub mod dispose_widget_payload;
pub mod get_dashboard_stats_payload;
pub mod get_performance_payload;
pub mod get_strategies_payload;
pub mod get_trades_payload;
pub mod get_widget_state_payload;
pub mod initialize_widget_payload;
pub mod retry_widget_payload;
pub mod unmount_widget_payload;
pub mod update_chart_params_payload;
pub mod update_strategy_payload;
