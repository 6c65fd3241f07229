use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;

use crate::app::{App, AppScreen};
use crate::domain::{fraud_percent, ThreatAction};
use crate::ui;

/// Run the application in headless mode (no UI): fetch once, print a fraud
/// summary, exit.
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.initialize().await?;

    let report = build_report(app)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }

    Ok(())
}

fn build_report(app: &App) -> Result<FraudReport> {
    if let Some(error) = &app.dashboard_error {
        return Err(color_eyre::eyre::eyre!("dashboard fetch failed: {error}"));
    }
    let summary = app
        .dashboard
        .as_ref()
        .ok_or_else(|| color_eyre::eyre::eyre!("no dashboard data"))?;

    let top_campaigns = app.analysis.as_ref().map_or_else(Vec::new, |analysis| {
        analysis
            .campaigns
            .labels
            .iter()
            .zip(&analysis.campaigns.values)
            .map(|(campaign, threats)| CampaignCount {
                campaign: campaign.clone(),
                threats: *threats,
            })
            .collect()
    });

    let recent_records = app
        .records
        .iter()
        .take(5)
        .map(|record| ReportRecord {
            user_id: record.user_id.clone(),
            timestamp: record.timestamp.clone(),
            campaign: record.campaign.clone(),
            action: ThreatAction::classify(record.confidence).label().to_string(),
            confidence: record.confidence,
        })
        .collect();

    Ok(FraudReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        total_clicks: summary.total_clicks,
        fraud_count: summary.fraud_count,
        risk_level: summary.risk_level.as_str().to_string(),
        fraud_share_pct: fraud_percent(summary.fraud_count, summary.total_clicks),
        top_campaigns,
        recent_records,
    })
}

fn render_report(report: &FraudReport) {
    println!("\nClickShield Fraud Summary");
    println!("=========================");
    println!("Total clicks: {}", report.total_clicks);
    println!("Fraud detected: {}", report.fraud_count);
    println!("Risk level: {}", report.risk_level);

    if let Some(share) = report.fraud_share_pct {
        println!("Fraud share: {share:.1}%");
    } else {
        println!("Fraud share: N/A");
    }

    println!("\nThreats by Campaign:");
    for entry in &report.top_campaigns {
        println!("- {}: {}", entry.campaign, entry.threats);
    }

    println!("\nRecent Records:");
    for record in &report.recent_records {
        println!(
            "- {} | {} | {} | {}",
            record.user_id, record.campaign, record.action, record.timestamp
        );
    }
}

#[derive(serde::Serialize)]
struct FraudReport {
    generated_at: String,
    total_clicks: u64,
    fraud_count: u64,
    risk_level: String,
    fraud_share_pct: Option<f64>,
    top_campaigns: Vec<CampaignCount>,
    recent_records: Vec<ReportRecord>,
}

#[derive(serde::Serialize)]
struct CampaignCount {
    campaign: String,
    threats: u64,
}

#[derive(serde::Serialize)]
struct ReportRecord {
    user_id: String,
    timestamp: String,
    campaign: String,
    action: String,
    confidence: f64,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        // Update animations and tick-driven state
        app.update();

        // Apply scan task events to the upload pipeline
        drain_scan_events(app);

        // A finished scan navigates back to the dashboard with fresh data
        if app.upload.redirect_due() {
            let summary = app.upload.summary.take();
            app.switch_screen(AppScreen::Dashboard);
            app.refresh_data().await;
            if let Some(summary) = summary {
                let total = summary.total_records.unwrap_or_default();
                let fraud = summary.fraud_detected.unwrap_or_default();
                app.status_message = format!("Dataset scanned: {total} records, {fraud} flagged");
                app.trigger_completion_fx();
            }
        }

        // Draw the UI with better error context
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        // Handle events with improved error context
        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    crate::app::handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {
                    // Ignore non-key events
                }
            }
        }
    }
    Ok(())
}

fn drain_scan_events(app: &mut App) {
    while let Ok(scan_event) = app.scan_rx.try_recv() {
        // Late lines from an aborted scan fail the transition check and are
        // dropped here.
        let _ = app.upload.process_event(&scan_event);
    }
}
