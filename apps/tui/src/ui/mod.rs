// UI module for clickshield-tui
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tachyonfx::EffectRenderer;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Dashboard => screens::dashboard::render_dashboard(app, f),
        AppScreen::Analysis => screens::analysis::render_analysis(app, f),
        AppScreen::Results => screens::results::render_results(app, f),
        AppScreen::Upload => screens::upload::render_upload(app, f),
    }
}

/// Screen title bar with the current view highlighted.
pub fn render_title_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let tabs = [
        (AppScreen::Dashboard, "1:Dashboard"),
        (AppScreen::Analysis, "2:Analysis"),
        (AppScreen::Results, "3:Results"),
        (AppScreen::Upload, "4:Upload"),
    ];

    let mut spans = vec![
        Span::styled(
            "ClickShield ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Fraud Command Center",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ];

    for (screen, label) in tabs {
        let style = if app.screen == screen {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {label} "), style));
        spans.push(Span::raw(" "));
    }

    let paragraph = Paragraph::new(TextLine::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

/// Status area shared by all screens. Export completions run a short
/// coalesce effect over this area.
pub fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let status_text = if app.status_message.is_empty() {
        Text::from("")
    } else {
        let style = if app.status_message.starts_with("Export failed")
            || app.status_message.starts_with("Security policy")
        {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        Text::from(Span::styled(&app.status_message, style))
    };

    let status_paragraph = Paragraph::new(status_text)
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);

    if let Ok(mut effect) = app.completion_fx.lock() {
        let done = effect
            .as_mut()
            .map(|fx| {
                let buffer = f.buffer_mut();
                buffer.render_effect(fx, area, app.last_tick);
                fx.done()
            })
            .unwrap_or(false);
        if done {
            *effect = None;
        }
    }
}

/// One-line keyboard hint strip at the bottom of each screen.
pub fn render_shortcuts(f: &mut Frame<'_>, area: Rect, pairs: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (index, (key, action)) in pairs.iter().enumerate() {
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        let separator = if index + 1 == pairs.len() { "" } else { " | " };
        spans.push(Span::styled(
            format!(": {action}{separator}"),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Red-bordered panel used when a view's fetch failed.
pub fn render_error_panel(title: &str, message: &str, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let paragraph = Paragraph::new(Span::styled(
        format!("Backend unavailable: {message}"),
        Style::default().fg(Color::Red),
    ))
    .block(block)
    .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
