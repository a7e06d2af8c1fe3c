pub mod chart_library;
pub mod key_value_store;
pub mod mount_point;
