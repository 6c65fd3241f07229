use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "clickshield", version, about = "ClickShield fraud forensics TUI")]
pub struct CliArgs {
    /// Print a fraud summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the backend base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the CSV report output directory
    #[arg(long = "export-dir", value_name = "PATH")]
    pub export_dir: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("API_BASE_URL", url);
        }
        if let Some(dir) = &self.export_dir {
            std::env::set_var("EXPORT_DIR", dir);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
