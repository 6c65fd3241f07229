use clap::Parser;
use color_eyre::Result;

use clickshield_tui::{event, terminal, App, CliArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    // Initialize application state
    let mut app = App::new();

    // Headless mode: explicit flag, or stdout is not a terminal
    if args.headless || !is_terminal() {
        return event::run_headless(&mut app, args.json).await;
    }

    // Connect to the backend; the UI still comes up with error panels if
    // the backend is down.
    if let Err(e) = app.initialize().await {
        eprintln!("Error initializing backend connection: {e}");
        eprintln!("Will continue with limited functionality");
    }

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
