use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_results_input(app: &mut App, key: KeyCode) {
    if app.search_active {
        handle_search_input(app, key);
        return;
    }

    let total_rows = app.filtered.len();

    match key {
        KeyCode::Char('/') => {
            app.search_active = true;
        }
        KeyCode::Char('e') => app.export_results(),
        KeyCode::Left => {
            app.campaign_index = wrap_decrement(app.campaign_index, app.campaign_options.len());
            app.apply_filters();
        }
        KeyCode::Right => {
            app.campaign_index = wrap_increment(app.campaign_index, app.campaign_options.len());
            app.apply_filters();
        }
        KeyCode::Esc => {
            if app.filter_active() {
                app.campaign_index = 0;
                app.clear_search();
            } else {
                app.switch_screen(AppScreen::Dashboard);
            }
        }
        KeyCode::Up => {
            if app.selected_record_index > 0 {
                app.selected_record_index -= 1;
            }
        }
        KeyCode::Down => {
            if total_rows > 0 && app.selected_record_index + 1 < total_rows {
                app.selected_record_index += 1;
            }
        }
        KeyCode::PageUp => {
            app.selected_record_index = app.selected_record_index.saturating_sub(5);
        }
        KeyCode::PageDown => {
            if total_rows > 0 {
                let new_index = app.selected_record_index + 5;
                app.selected_record_index = if new_index >= total_rows {
                    total_rows - 1
                } else {
                    new_index
                };
            }
        }
        KeyCode::Home => {
            app.selected_record_index = 0;
        }
        KeyCode::End => {
            if total_rows > 0 {
                app.selected_record_index = total_rows - 1;
            }
        }
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter => {
            // Keep the term, leave entry mode.
            app.search_active = false;
        }
        KeyCode::Backspace => {
            app.search_term.pop();
            app.apply_filters();
        }
        KeyCode::Char(ch) => {
            app.search_term.push(ch);
            app.apply_filters();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::FraudRecord;
    use crate::filter;

    fn record(user_id: &str, campaign: &str) -> FraudRecord {
        FraudRecord {
            user_id: user_id.to_string(),
            timestamp: "t".to_string(),
            campaign: campaign.to_string(),
            pattern: "LSTM Flagged".to_string(),
            confidence: 0.95,
        }
    }

    fn app_with_records() -> App {
        let mut app = App::new();
        app.screen = AppScreen::Results;
        app.records = vec![record("A1", "Phone"), record("B2", "Motor")];
        app.campaign_options = filter::campaign_options(&app.records);
        app.apply_filters();
        app
    }

    #[test]
    fn typed_search_narrows_the_table_live() {
        let mut app = app_with_records();
        handle_results_input(&mut app, KeyCode::Char('/'));
        assert!(app.search_active);

        handle_results_input(&mut app, KeyCode::Char('a'));
        handle_results_input(&mut app, KeyCode::Char('1'));
        assert_eq!(app.filtered.len(), 1);
        assert_eq!(app.filtered[0].user_id, "A1");

        // Enter keeps the filter but returns keys to navigation.
        handle_results_input(&mut app, KeyCode::Enter);
        assert!(!app.search_active);
        assert_eq!(app.filtered.len(), 1);
    }

    #[test]
    fn campaign_cycling_wraps_and_filters() {
        let mut app = app_with_records();
        handle_results_input(&mut app, KeyCode::Right);
        assert_eq!(app.current_campaign(), "Phone");
        assert_eq!(app.filtered.len(), 1);

        handle_results_input(&mut app, KeyCode::Left);
        assert_eq!(app.current_campaign(), "ALL");
        assert_eq!(app.filtered.len(), 2);
    }

    #[test]
    fn escape_clears_filters_before_leaving_the_view() {
        let mut app = app_with_records();
        handle_results_input(&mut app, KeyCode::Right);
        assert!(app.filter_active());

        handle_results_input(&mut app, KeyCode::Esc);
        assert!(!app.filter_active());
        assert_eq!(app.screen, AppScreen::Results);

        handle_results_input(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, AppScreen::Dashboard);
    }

    #[test]
    fn selection_stays_inside_the_filtered_window() {
        let mut app = app_with_records();
        handle_results_input(&mut app, KeyCode::Down);
        assert_eq!(app.selected_record_index, 1);
        handle_results_input(&mut app, KeyCode::Down);
        assert_eq!(app.selected_record_index, 1);

        // Narrowing the filter clamps the selection.
        handle_results_input(&mut app, KeyCode::Right);
        assert_eq!(app.selected_record_index, 0);
    }
}
