use std::env;
use std::path::PathBuf;

use color_eyre::Result;
use dotenv::dotenv;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:10000";

/// Runtime configuration resolved from `.env` / environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub export_dir: PathBuf,
    pub debug: bool,
}

/// Initializes the application configuration.
///
/// `API_BASE_URL` points at the detection backend, `EXPORT_DIR` is where CSV
/// reports are written (created if missing), `DEBUG` enables verbose stderr
/// logging. CLI flags override these via [`crate::cli::CliArgs`].
pub fn init_app_config() -> Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let api_base_url =
        env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

    let export_dir = env::var("EXPORT_DIR").map_or_else(|_| PathBuf::from("."), PathBuf::from);
    if !export_dir.exists() {
        std::fs::create_dir_all(&export_dir)?;
    }

    let debug = env::var("DEBUG").is_ok_and(|value| value == "1");

    Ok(AppConfig {
        api_base_url,
        export_dir,
        debug,
    })
}
