use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_analysis_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('e') => app.export_forensics(),
        KeyCode::Esc => app.switch_screen(AppScreen::Dashboard),
        _ => {}
    }
}
