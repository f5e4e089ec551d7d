pub mod config;
pub mod drop_cache;
pub mod i18n;
pub mod logging;
pub mod meminfo;
