use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen, UploadPhase};
use crossterm::event::KeyCode;

mod analysis;
mod dashboard;
mod results;
mod upload;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if handle_global(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Dashboard => dashboard::handle_dashboard_input(app, key),
        AppScreen::Analysis => analysis::handle_analysis_input(app, key),
        AppScreen::Results => results::handle_results_input(app, key),
        AppScreen::Upload => upload::handle_upload_input(app, key),
    }
}

const SCREEN_ORDER: [AppScreen; 4] = [
    AppScreen::Dashboard,
    AppScreen::Analysis,
    AppScreen::Results,
    AppScreen::Upload,
];

/// Navigation shared by every view. Character shortcuts are suppressed
/// while a text field is capturing keystrokes.
fn handle_global(app: &mut App, key: KeyCode) -> bool {
    let typing = (app.screen == AppScreen::Results && app.search_active)
        || (app.screen == AppScreen::Upload && app.upload.phase == UploadPhase::Idle);

    match key {
        KeyCode::Tab => {
            app.switch_screen(SCREEN_ORDER[wrap_increment(screen_index(app.screen), SCREEN_ORDER.len())]);
            true
        }
        KeyCode::BackTab => {
            app.switch_screen(SCREEN_ORDER[wrap_decrement(screen_index(app.screen), SCREEN_ORDER.len())]);
            true
        }
        KeyCode::Char(ch) if !typing => match ch {
            'q' => {
                app.running = false;
                true
            }
            '1' => {
                app.switch_screen(AppScreen::Dashboard);
                true
            }
            '2' => {
                app.switch_screen(AppScreen::Analysis);
                true
            }
            '3' => {
                app.switch_screen(AppScreen::Results);
                true
            }
            '4' => {
                app.switch_screen(AppScreen::Upload);
                true
            }
            _ => false,
        },
        _ => false,
    }
}

fn screen_index(screen: AppScreen) -> usize {
    SCREEN_ORDER
        .iter()
        .position(|&known| known == screen)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_cycles_through_every_view() {
        let mut app = App::new();
        assert_eq!(app.screen, AppScreen::Dashboard);

        for expected in [
            AppScreen::Analysis,
            AppScreen::Results,
            AppScreen::Upload,
            AppScreen::Dashboard,
        ] {
            dispatch_input(&mut app, KeyCode::Tab);
            assert_eq!(app.screen, expected);
        }
    }

    #[test]
    fn digit_shortcuts_jump_directly() {
        let mut app = App::new();
        dispatch_input(&mut app, KeyCode::Char('3'));
        assert_eq!(app.screen, AppScreen::Results);
        dispatch_input(&mut app, KeyCode::Char('1'));
        assert_eq!(app.screen, AppScreen::Dashboard);
    }

    #[test]
    fn quit_key_stops_the_loop() {
        let mut app = App::new();
        dispatch_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn search_mode_captures_the_quit_key() {
        let mut app = App::new();
        app.screen = AppScreen::Results;
        app.search_active = true;
        dispatch_input(&mut app, KeyCode::Char('q'));

        assert!(app.running);
        assert_eq!(app.search_term, "q");
    }
}
