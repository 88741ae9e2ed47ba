pub mod check_plugin;
pub mod config;
pub mod version;
