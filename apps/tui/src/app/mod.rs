// App module for clickshield-tui
// Handles application state and input handling

pub mod actions;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppScreen, UploadEvent, UploadPhase};
