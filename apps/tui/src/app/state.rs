use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use color_eyre::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tachyonfx::{fx, Effect, EffectTimer, Interpolation};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::animation::COUNTER_DURATION_MS;
use crate::api::models::{AnalysisPayload, DashboardSummary, FraudRecord, UploadResponse};
use crate::app::actions::AppActions;
use crate::export;
use crate::feed::{self, FeedEntry};
use crate::filter::{self, ALL_CAMPAIGNS};

/// Fixed status lines played while a dataset scan is in flight. Cosmetic;
/// not tied to actual backend progress.
pub const SCAN_PIPELINE_STEPS: [&str; 6] = [
    "> Allocating secure memory enclave...",
    "> Validating CSV schema mapping...",
    "> Normalizing timestamp sequences...",
    "> Pre-loading LSTM (.h5) tensor weights...",
    "> Executing behavioral inference...",
    "> Compiling threat matrix...",
];

/// Delay between scripted scan lines.
pub const SCAN_STEP_DELAY_MS: u64 = 600;
/// Delay between a successful scan and the jump back to the dashboard.
pub const REDIRECT_DELAY_MS: u64 = 800;

const SCAN_COMPLETE_LINE: &str = "> INFERENCE COMPLETE. Redirecting...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Dashboard,
    Analysis,
    Results,
    Upload,
}

// Upload pipeline states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    FileSelected,
    Scanning,
    Success,
    Failure,
}

impl fmt::Display for UploadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::FileSelected => write!(f, "FileSelected"),
            Self::Scanning => write!(f, "Scanning"),
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
        }
    }
}

// Events driving the upload pipeline
#[derive(Debug, Clone)]
pub enum UploadEvent {
    FileChosen(PathBuf),
    StartScan,
    StatusLine(String),
    Completed(UploadResponse),
    Failed(String),
    Reset,
}

impl fmt::Display for UploadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileChosen(path) => write!(f, "FileChosen({})", path.display()),
            Self::StartScan => write!(f, "StartScan"),
            Self::StatusLine(line) => write!(f, "StatusLine({line})"),
            Self::Completed(response) => write!(f, "Completed(success={})", response.success),
            Self::Failed(message) => write!(f, "Failed({message})"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug)]
pub struct UploadTransitionError {
    pub from: UploadPhase,
    pub event: UploadEvent,
}

impl fmt::Display for UploadTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for UploadTransitionError {}

/// State machine for the upload pipeline:
/// `Idle -> FileSelected -> Scanning -> {Success, Failure}`, with `Reset`
/// returning to `Idle` so a failed scan can be retried without restarting
/// the process.
pub struct UploadState {
    pub phase: UploadPhase,
    pub path_input: String,
    pub selected_path: Option<PathBuf>,
    pub selected_size_bytes: Option<u64>,
    pub terminal_lines: Vec<String>,
    pub summary: Option<UploadResponse>,
    pub redirect_at: Option<Instant>,
    /// Handle of the spawned scan task; aborted when the view is left so
    /// the timed sequence cannot outlive its owner.
    pub scan_task: Option<JoinHandle<()>>,
}

impl UploadState {
    pub fn new() -> Self {
        Self {
            phase: UploadPhase::Idle,
            path_input: String::new(),
            selected_path: None,
            selected_size_bytes: None,
            terminal_lines: Vec::new(),
            summary: None,
            redirect_at: None,
            scan_task: None,
        }
    }

    pub fn process_event(&mut self, event: &UploadEvent) -> Result<(), UploadTransitionError> {
        match (self.phase, event) {
            (UploadPhase::Idle | UploadPhase::FileSelected, UploadEvent::FileChosen(path)) => {
                self.selected_path = Some(path.clone());
                self.terminal_lines.clear();
                self.summary = None;
                self.phase = UploadPhase::FileSelected;
                Ok(())
            }
            (UploadPhase::FileSelected, UploadEvent::StartScan) => {
                self.terminal_lines.clear();
                self.phase = UploadPhase::Scanning;
                Ok(())
            }
            (UploadPhase::Scanning, UploadEvent::StatusLine(line)) => {
                self.terminal_lines.push(line.clone());
                Ok(())
            }
            (UploadPhase::Scanning, UploadEvent::Completed(response)) => {
                if response.success {
                    self.terminal_lines.push(SCAN_COMPLETE_LINE.to_string());
                    self.summary = Some(response.clone());
                    self.redirect_at =
                        Some(Instant::now() + Duration::from_millis(REDIRECT_DELAY_MS));
                    self.phase = UploadPhase::Success;
                } else {
                    let message = response
                        .message
                        .clone()
                        .unwrap_or_else(|| "scan rejected by backend".to_string());
                    self.terminal_lines.push(format!("> CRITICAL ERROR: {message}"));
                    self.phase = UploadPhase::Failure;
                }
                Ok(())
            }
            (UploadPhase::Scanning, UploadEvent::Failed(message)) => {
                self.terminal_lines.push(format!("> CRITICAL ERROR: {message}"));
                self.phase = UploadPhase::Failure;
                Ok(())
            }
            (
                UploadPhase::FileSelected
                | UploadPhase::Scanning
                | UploadPhase::Success
                | UploadPhase::Failure,
                UploadEvent::Reset,
            ) => {
                self.phase = UploadPhase::Idle;
                self.selected_path = None;
                self.selected_size_bytes = None;
                self.terminal_lines.clear();
                self.summary = None;
                self.redirect_at = None;
                Ok(())
            }
            _ => Err(UploadTransitionError {
                from: self.phase,
                event: event.clone(),
            }),
        }
    }

    /// Aborts an in-flight scan task and resets the pipeline. Called when
    /// the user leaves the upload view; timer lifetime is scoped to view
    /// lifetime.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.scan_task.take() {
            handle.abort();
        }
        if self.phase != UploadPhase::Idle {
            let _ = self.process_event(&UploadEvent::Reset);
        }
        self.path_input.clear();
    }

    pub fn redirect_due(&self) -> bool {
        self.redirect_at.is_some_and(|at| Instant::now() >= at)
    }
}

pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub actions: AppActions,
    pub status_message: String,

    // Dashboard view
    pub dashboard: Option<DashboardSummary>,
    pub dashboard_error: Option<String>,
    pub counters_started: Option<Instant>,
    pub live_feed: Vec<FeedEntry>,
    last_feed_tick: Option<Instant>,
    rng: StdRng,

    // Analysis view
    pub analysis: Option<AnalysisPayload>,
    pub analysis_error: Option<String>,

    // Results view
    pub records: Vec<FraudRecord>,
    pub results_error: Option<String>,
    pub filtered: Vec<FraudRecord>,
    pub search_term: String,
    pub search_active: bool,
    pub campaign_options: Vec<String>,
    pub campaign_index: usize,
    pub selected_record_index: usize,

    // Upload view
    pub upload: UploadState,
    pub scan_tx: UnboundedSender<UploadEvent>,
    pub scan_rx: UnboundedReceiver<UploadEvent>,

    // Frame bookkeeping
    pub last_frame: Instant,
    pub last_tick: Duration,
    pub completion_fx: Mutex<Option<Effect>>,
    pub throbber: Mutex<ThrobberState>,
}

impl App {
    pub fn new() -> Self {
        let (scan_tx, scan_rx) = unbounded_channel();
        Self {
            running: true,
            screen: AppScreen::Dashboard,
            actions: AppActions::new(),
            status_message: String::new(),
            dashboard: None,
            dashboard_error: None,
            counters_started: None,
            live_feed: Vec::new(),
            last_feed_tick: None,
            rng: StdRng::from_entropy(),
            analysis: None,
            analysis_error: None,
            records: Vec::new(),
            results_error: None,
            filtered: Vec::new(),
            search_term: String::new(),
            search_active: false,
            campaign_options: vec![ALL_CAMPAIGNS.to_string()],
            campaign_index: 0,
            selected_record_index: 0,
            upload: UploadState::new(),
            scan_tx,
            scan_rx,
            last_frame: Instant::now(),
            last_tick: Duration::ZERO,
            completion_fx: Mutex::new(None),
            throbber: Mutex::new(ThrobberState::default()),
        }
    }

    /// Connects to the backend and performs the one fetch per view that the
    /// page-load flow prescribes. Fetch failures land in per-view error
    /// slots instead of aborting startup.
    pub async fn initialize(&mut self) -> Result<()> {
        self.actions.initialize()?;
        self.refresh_data().await;
        Ok(())
    }

    pub async fn refresh_data(&mut self) {
        match self.actions.fetch_dashboard().await {
            Ok(summary) => {
                self.dashboard = Some(summary);
                self.dashboard_error = None;
                self.counters_started = Some(Instant::now());
            }
            Err(error) => self.dashboard_error = Some(error.to_string()),
        }

        match self.actions.fetch_analysis().await {
            Ok(payload) => {
                self.analysis = Some(payload);
                self.analysis_error = None;
            }
            Err(error) => self.analysis_error = Some(error.to_string()),
        }

        match self.actions.fetch_results().await {
            Ok(records) => {
                self.campaign_options = filter::campaign_options(&records);
                self.records = records;
                self.results_error = None;
                self.apply_filters();
            }
            Err(error) => self.results_error = Some(error.to_string()),
        }
    }

    /// Per-frame bookkeeping: frame delta for effects, throbber advance
    /// while scanning, and the live-feed tick. The feed timer only advances
    /// while the dashboard is the visible view.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_tick = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.upload.phase == UploadPhase::Scanning {
            if let Ok(mut state) = self.throbber.lock() {
                state.calc_next();
            }
        }

        if self.screen == AppScreen::Dashboard && self.dashboard.is_some() {
            let due = self
                .last_feed_tick
                .is_none_or(|tick| now.duration_since(tick).as_millis() >= u128::from(feed::FEED_INTERVAL_MS));
            if due {
                let entry = FeedEntry::synthesize(&mut self.rng);
                feed::push_entry(&mut self.live_feed, entry);
                self.last_feed_tick = Some(now);
            }
        } else {
            // Leaving the view releases the timer; re-entering restarts it.
            self.last_feed_tick = None;
        }
    }

    /// Progress of the counter animation in [0, 1].
    #[allow(clippy::cast_precision_loss)]
    pub fn counter_progress(&self) -> f64 {
        self.counters_started.map_or(1.0, |started| {
            (started.elapsed().as_millis() as f64 / COUNTER_DURATION_MS as f64).min(1.0)
        })
    }

    pub fn current_campaign(&self) -> &str {
        self.campaign_options
            .get(self.campaign_index)
            .map_or(ALL_CAMPAIGNS, String::as_str)
    }

    pub fn apply_filters(&mut self) {
        let campaign = self.current_campaign().to_string();
        self.filtered = filter::filter_records(&self.records, &self.search_term, &campaign);
        if self.selected_record_index >= self.filtered.len() {
            self.selected_record_index = self.filtered.len().saturating_sub(1);
        }
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.search_active = false;
        self.apply_filters();
    }

    pub fn filter_active(&self) -> bool {
        filter::is_filter_active(&self.search_term, self.current_campaign())
    }

    /// Exports either the full record set or the filtered subset, depending
    /// on whether any filter is active.
    pub fn export_results(&mut self) {
        let rows = if self.filter_active() {
            &self.filtered
        } else {
            &self.records
        };
        let csv = export::records_csv(rows);
        match export::write_report(&self.actions.export_dir, export::RECORDS_FILENAME, &csv) {
            Ok(path) => {
                self.status_message = format!("Exported {} rows to {}", rows.len(), path.display());
                self.trigger_completion_fx();
            }
            Err(error) => self.status_message = format!("Export failed: {error}"),
        }
    }

    pub fn export_forensics(&mut self) {
        let Some(analysis) = &self.analysis else {
            self.status_message = "Nothing to export yet".to_string();
            return;
        };
        let csv = export::forensics_csv(analysis);
        match export::write_report(&self.actions.export_dir, export::FORENSICS_FILENAME, &csv) {
            Ok(path) => {
                self.status_message = format!("Exported forensics report to {}", path.display());
                self.trigger_completion_fx();
            }
            Err(error) => self.status_message = format!("Export failed: {error}"),
        }
    }

    /// Validates the typed dataset path. Anything not ending in the literal
    /// suffix `.csv` is rejected and the pipeline stays in `Idle`; the check
    /// is case-sensitive, so `.CSV` is refused too.
    pub fn choose_dataset(&mut self) {
        let raw = self.upload.path_input.trim().to_string();
        if raw.is_empty() {
            return;
        }
        if !raw.ends_with(".csv") {
            self.status_message =
                "Security policy: only .csv telemetry logs are permitted".to_string();
            return;
        }
        let path = PathBuf::from(raw);
        let size = std::fs::metadata(&path).map(|meta| meta.len()).ok();
        if self
            .upload
            .process_event(&UploadEvent::FileChosen(path))
            .is_ok()
        {
            self.upload.selected_size_bytes = size;
            self.status_message.clear();
        }
    }

    pub fn switch_screen(&mut self, screen: AppScreen) {
        if self.screen == screen {
            return;
        }
        if self.screen == AppScreen::Upload && screen != AppScreen::Upload {
            self.upload.cancel();
        }
        self.screen = screen;
        self.status_message.clear();
    }

    pub fn trigger_completion_fx(&self) {
        if let Ok(mut effect) = self.completion_fx.lock() {
            *effect = Some(fx::coalesce(EffectTimer::from_ms(
                800,
                Interpolation::QuadOut,
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_response() -> UploadResponse {
        UploadResponse {
            success: true,
            message: None,
            total_records: Some(100),
            fraud_detected: Some(25),
        }
    }

    fn failed_response(message: &str) -> UploadResponse {
        UploadResponse {
            success: false,
            message: Some(message.to_string()),
            total_records: None,
            fraud_detected: None,
        }
    }

    #[test]
    fn upload_walks_the_happy_path() {
        let mut upload = UploadState::new();
        assert_eq!(upload.phase, UploadPhase::Idle);

        upload
            .process_event(&UploadEvent::FileChosen(PathBuf::from("clicks.csv")))
            .expect("file selection from idle");
        assert_eq!(upload.phase, UploadPhase::FileSelected);

        upload
            .process_event(&UploadEvent::StartScan)
            .expect("scan start");
        assert_eq!(upload.phase, UploadPhase::Scanning);

        for step in SCAN_PIPELINE_STEPS {
            upload
                .process_event(&UploadEvent::StatusLine(step.to_string()))
                .expect("status line while scanning");
        }
        assert_eq!(upload.terminal_lines.len(), SCAN_PIPELINE_STEPS.len());

        upload
            .process_event(&UploadEvent::Completed(ok_response()))
            .expect("completion");
        assert_eq!(upload.phase, UploadPhase::Success);
        assert!(upload.redirect_at.is_some());
        assert_eq!(upload.terminal_lines.len(), SCAN_PIPELINE_STEPS.len() + 1);
    }

    #[test]
    fn backend_rejection_is_a_terminal_failure() {
        let mut upload = UploadState::new();
        upload
            .process_event(&UploadEvent::FileChosen(PathBuf::from("clicks.csv")))
            .expect("file selection");
        upload
            .process_event(&UploadEvent::StartScan)
            .expect("scan start");
        upload
            .process_event(&UploadEvent::Completed(failed_response(
                "Dataset incompatible with trained model structure.",
            )))
            .expect("failed completion");

        assert_eq!(upload.phase, UploadPhase::Failure);
        assert!(upload
            .terminal_lines
            .last()
            .is_some_and(|line| line.starts_with("> CRITICAL ERROR:")));
        assert!(upload.redirect_at.is_none());
    }

    #[test]
    fn transport_failure_reaches_failure_state() {
        let mut upload = UploadState::new();
        upload
            .process_event(&UploadEvent::FileChosen(PathBuf::from("clicks.csv")))
            .expect("file selection");
        upload
            .process_event(&UploadEvent::StartScan)
            .expect("scan start");
        upload
            .process_event(&UploadEvent::Failed("connection refused".to_string()))
            .expect("transport failure");

        assert_eq!(upload.phase, UploadPhase::Failure);
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let mut upload = UploadState::new();
        // Cannot start a scan with no file selected.
        assert!(upload.process_event(&UploadEvent::StartScan).is_err());
        // Status lines outside of a scan are invalid.
        assert!(upload
            .process_event(&UploadEvent::StatusLine("> hi".to_string()))
            .is_err());
        assert_eq!(upload.phase, UploadPhase::Idle);
    }

    #[test]
    fn reset_returns_failure_to_idle_for_retry() {
        let mut upload = UploadState::new();
        upload
            .process_event(&UploadEvent::FileChosen(PathBuf::from("clicks.csv")))
            .expect("file selection");
        upload
            .process_event(&UploadEvent::StartScan)
            .expect("scan start");
        upload
            .process_event(&UploadEvent::Failed("boom".to_string()))
            .expect("failure");
        upload.process_event(&UploadEvent::Reset).expect("reset");

        assert_eq!(upload.phase, UploadPhase::Idle);
        assert!(upload.terminal_lines.is_empty());
        assert!(upload.selected_path.is_none());
    }

    #[test]
    fn csv_extension_gate_keeps_pipeline_idle() {
        let mut app = App::new();
        app.screen = AppScreen::Upload;
        app.upload.path_input = "clicks.xlsx".to_string();
        app.choose_dataset();

        assert_eq!(app.upload.phase, UploadPhase::Idle);
        assert!(app.status_message.contains("Security policy"));

        app.upload.path_input = "clicks.csv".to_string();
        app.choose_dataset();
        assert_eq!(app.upload.phase, UploadPhase::FileSelected);
    }

    #[test]
    fn csv_extension_gate_is_case_sensitive() {
        let mut app = App::new();
        app.screen = AppScreen::Upload;
        app.upload.path_input = "clicks.CSV".to_string();
        app.choose_dataset();

        assert_eq!(app.upload.phase, UploadPhase::Idle);
        assert!(app.status_message.contains("Security policy"));
    }

    #[test]
    fn leaving_upload_view_cancels_the_pipeline() {
        let mut app = App::new();
        app.screen = AppScreen::Upload;
        app.upload.path_input = "clicks.csv".to_string();
        app.choose_dataset();
        app.upload
            .process_event(&UploadEvent::StartScan)
            .expect("scan start");

        app.switch_screen(AppScreen::Dashboard);
        assert_eq!(app.upload.phase, UploadPhase::Idle);
        assert!(app.upload.scan_task.is_none());
    }

    #[test]
    fn filters_apply_to_selection_and_subset() {
        let mut app = App::new();
        app.records = vec![
            FraudRecord {
                user_id: "A1".to_string(),
                timestamp: "t".to_string(),
                campaign: "Phone".to_string(),
                pattern: "LSTM Flagged".to_string(),
                confidence: 0.95,
            },
            FraudRecord {
                user_id: "B2".to_string(),
                timestamp: "t".to_string(),
                campaign: "Motor".to_string(),
                pattern: "LSTM Flagged".to_string(),
                confidence: 0.5,
            },
        ];
        app.campaign_options = filter::campaign_options(&app.records);
        app.apply_filters();
        assert_eq!(app.filtered.len(), 2);
        assert!(!app.filter_active());

        app.search_term = "a1".to_string();
        app.apply_filters();
        assert_eq!(app.filtered.len(), 1);
        assert!(app.filter_active());
        assert_eq!(app.filtered[0].user_id, "A1");
    }
}
