pub mod fetch;
pub mod show_config;
