pub mod api;
pub mod config;
pub mod reading_cache;
pub mod store;
