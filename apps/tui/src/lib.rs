// Export our modules for use in binaries and tests
pub mod animation;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod event;
pub mod export;
pub mod feed;
pub mod filter;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use cli::CliArgs;
pub use domain::{RiskLevel, ThreatAction};
