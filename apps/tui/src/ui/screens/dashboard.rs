use crate::animation::{counter_value, group_digits};
use crate::app::App;
use crate::domain::{fraud_percent_label, RiskLevel};
use crate::ui::widgets::charts::render_share_gauge;
use crate::ui::{render_error_panel, render_shortcuts, render_status_section, render_title_bar};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(1), // Alert banner
            Constraint::Length(5), // Counter cards
            Constraint::Min(8),    // Insights / gauge / feed
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title_bar(app, f, layout[0]);

    if let Some(error) = &app.dashboard_error {
        render_error_panel("Threat Dashboard", error, f, layout[3]);
        render_status_section(app, f, layout[4]);
        render_shortcuts(f, layout[5], SHORTCUTS);
        return;
    }

    let Some(summary) = &app.dashboard else {
        let loading = Paragraph::new("Contacting detection backend...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(loading, layout[3]);
        render_status_section(app, f, layout[4]);
        render_shortcuts(f, layout[5], SHORTCUTS);
        return;
    };

    render_alert_banner(summary.risk_level, f, layout[1]);
    render_counter_cards(app, f, layout[2]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(layout[3]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(body[0]);

    render_insights(app, f, left[0]);
    render_share_gauge(summary.fraud_count, summary.total_clicks, f, left[1]);
    render_live_feed(app, f, body[1]);

    render_status_section(app, f, layout[4]);
    render_shortcuts(f, layout[5], SHORTCUTS);
}

const SHORTCUTS: &[(&str, &str)] = &[
    ("Tab", "Next view"),
    ("1-4", "Jump to view"),
    ("q", "Quit"),
];

fn render_alert_banner(risk: RiskLevel, f: &mut Frame<'_>, area: Rect) {
    if !risk.is_alerting() {
        return;
    }
    let banner = Paragraph::new(Span::styled(
        "⚠ CRITICAL ALERT: Coordinated attack patterns detected. Review flagged traffic immediately.",
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(banner, area);
}

const fn risk_color(risk: RiskLevel) -> Color {
    match risk {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
        RiskLevel::Unknown => Color::Gray,
    }
}

/// The three stat cards. Counts run the ease-out count-up that started
/// when the summary arrived; the risk card is not animated.
fn render_counter_cards(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(summary) = &app.dashboard else {
        return;
    };

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let progress = app.counter_progress();
    let total = group_digits(counter_value(0, summary.total_clicks, progress));
    let fraud = group_digits(counter_value(0, summary.fraud_count, progress));

    render_stat_card("Total Clicks Analyzed", &total, Color::Cyan, f, cards[0]);
    render_stat_card("Fraudulent Clicks", &fraud, Color::Red, f, cards[1]);
    render_stat_card(
        "Risk Level",
        summary.risk_level.as_str(),
        risk_color(summary.risk_level),
        f,
        cards[2],
    );
}

fn render_stat_card(title: &str, value: &str, color: Color, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(Style::default().fg(Color::Gray))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(Text::from(vec![
        TextLine::from(""),
        TextLine::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ]))
    .block(block)
    .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_insights(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(summary) = &app.dashboard else {
        return;
    };

    let label_style = Style::default().fg(Color::Gray);
    let value_style = Style::default().fg(Color::Yellow);

    let lines = vec![
        TextLine::from(vec![
            Span::styled("Fraud share: ", label_style),
            Span::styled(
                fraud_percent_label(summary.fraud_count, summary.total_clicks),
                value_style,
            ),
        ]),
        TextLine::from(vec![
            Span::styled("Top attack category: ", label_style),
            Span::styled(summary.top_category_label().to_string(), value_style),
        ]),
        TextLine::from(vec![
            Span::styled("Peak fraud window: ", label_style),
            Span::styled(summary.peak_time_label().to_string(), value_style),
        ]),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" AI Insights ")
                .title_style(Style::default().fg(Color::Green))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_live_feed(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Live Interception Feed ")
        .title_style(Style::default().fg(Color::Red))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let lines: Vec<TextLine<'_>> = app
        .live_feed
        .iter()
        .map(|entry| {
            TextLine::from(vec![
                Span::styled(
                    "[BLOCKED] ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{} ", entry.source_ip), Style::default().fg(Color::White)),
                Span::styled(format!("{} ", entry.vector), Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("Conf: {:.1}%", entry.confidence),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    let paragraph = if lines.is_empty() {
        Paragraph::new(Span::styled(
            "Listening for hostile traffic...",
            Style::default().fg(Color::Gray),
        ))
        .block(block)
    } else {
        Paragraph::new(Text::from(lines)).block(block)
    };
    f.render_widget(paragraph, area);
}
