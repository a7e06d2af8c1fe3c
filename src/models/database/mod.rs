pub mod journal_db;
pub mod json_file_store;
pub mod memory_store;
pub mod storage;
