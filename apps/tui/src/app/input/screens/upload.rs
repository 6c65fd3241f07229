use std::time::Duration;

use crate::app::state::{
    App, AppScreen, UploadEvent, UploadPhase, SCAN_PIPELINE_STEPS, SCAN_STEP_DELAY_MS,
};
use crossterm::event::KeyCode;

pub fn handle_upload_input(app: &mut App, key: KeyCode) {
    match app.upload.phase {
        UploadPhase::Idle => match key {
            KeyCode::Char(ch) => app.upload.path_input.push(ch),
            KeyCode::Backspace => {
                app.upload.path_input.pop();
            }
            KeyCode::Enter => app.choose_dataset(),
            KeyCode::Esc => {
                if app.upload.path_input.is_empty() {
                    app.switch_screen(AppScreen::Dashboard);
                } else {
                    app.upload.path_input.clear();
                }
            }
            _ => {}
        },
        UploadPhase::FileSelected => match key {
            KeyCode::Enter => start_scan(app),
            KeyCode::Esc => app.upload.cancel(),
            _ => {}
        },
        UploadPhase::Scanning => {
            // Esc aborts the scripted sequence; the spawned task dies with it.
            if key == KeyCode::Esc {
                app.upload.cancel();
            }
        }
        UploadPhase::Success => {
            // Redirect back to the dashboard is already scheduled.
        }
        UploadPhase::Failure => {
            if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                app.upload.cancel();
            }
        }
    }
}

/// Kicks off the scan: scripted status lines on a fixed cadence, then the
/// actual multipart POST. Runs on its own task so the UI keeps drawing;
/// the handle stays with the upload state for cancellation.
fn start_scan(app: &mut App) {
    let Some(path) = app.upload.selected_path.clone() else {
        return;
    };
    let client = match app.actions.client_cloned() {
        Ok(client) => client,
        Err(error) => {
            app.status_message = error.to_string();
            return;
        }
    };
    if app.upload.process_event(&UploadEvent::StartScan).is_err() {
        return;
    }

    let tx = app.scan_tx.clone();
    let handle = tokio::spawn(async move {
        for step in SCAN_PIPELINE_STEPS {
            let _ = tx.send(UploadEvent::StatusLine(step.to_string()));
            tokio::time::sleep(Duration::from_millis(SCAN_STEP_DELAY_MS)).await;
        }
        match client.upload_dataset(&path).await {
            Ok(response) => {
                let _ = tx.send(UploadEvent::Completed(response));
            }
            Err(error) => {
                let _ = tx.send(UploadEvent::Failed(error.to_string()));
            }
        }
    });
    app.upload.scan_task = Some(handle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_builds_the_dataset_path() {
        let mut app = App::new();
        app.screen = AppScreen::Upload;
        for ch in "a.csv".chars() {
            handle_upload_input(&mut app, KeyCode::Char(ch));
        }
        assert_eq!(app.upload.path_input, "a.csv");

        handle_upload_input(&mut app, KeyCode::Backspace);
        assert_eq!(app.upload.path_input, "a.cs");
    }

    #[test]
    fn enter_selects_a_valid_csv() {
        let mut app = App::new();
        app.screen = AppScreen::Upload;
        app.upload.path_input = "clicks.csv".to_string();
        handle_upload_input(&mut app, KeyCode::Enter);
        assert_eq!(app.upload.phase, UploadPhase::FileSelected);
    }

    #[test]
    fn escape_from_failure_resets_for_retry() {
        let mut app = App::new();
        app.screen = AppScreen::Upload;
        app.upload.path_input = "clicks.csv".to_string();
        handle_upload_input(&mut app, KeyCode::Enter);
        app.upload
            .process_event(&UploadEvent::StartScan)
            .expect("scan start");
        app.upload
            .process_event(&UploadEvent::Failed("boom".to_string()))
            .expect("failure");

        handle_upload_input(&mut app, KeyCode::Esc);
        assert_eq!(app.upload.phase, UploadPhase::Idle);
    }
}
