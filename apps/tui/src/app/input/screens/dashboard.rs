use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    if key == KeyCode::Esc {
        // Dashboard is the root view; Esc exits.
        app.running = false;
    }
}
