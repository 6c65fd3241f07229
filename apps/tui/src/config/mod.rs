mod config;

pub use config::{init_app_config, AppConfig, DEFAULT_API_BASE_URL};
