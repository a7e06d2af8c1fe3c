pub mod chart_params;
pub mod container_identity;
pub mod errors;
pub mod headless_library;
pub mod ready_signal;
pub mod script_loader;
pub mod widget_config;
pub mod widget_manager;
pub mod widget_manager_builder;
pub mod widget_session;
pub mod widget_state;

#[cfg(test)]
pub mod test_support;
