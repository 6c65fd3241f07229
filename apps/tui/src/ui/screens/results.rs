use crate::app::App;
use crate::domain::{confidence_percent, ThreatAction};
use crate::ui::widgets::tables::{confidence_bar, scroll_offset};
use crate::ui::{render_error_panel, render_shortcuts, render_status_section, render_title_bar};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

const SHORTCUTS: &[(&str, &str)] = &[
    ("/", "Search source IP"),
    ("←/→", "Campaign filter"),
    ("↑/↓", "Navigate"),
    ("e", "Export CSV"),
    ("Esc", "Clear filters / back"),
    ("q", "Quit"),
];

pub fn render_results(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Filter bar
            Constraint::Min(6),    // Records table
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title_bar(app, f, layout[0]);
    render_filter_bar(app, f, layout[1]);

    if let Some(error) = &app.results_error {
        render_error_panel("Detection Results", error, f, layout[2]);
    } else {
        render_records_table(app, f, layout[2]);
    }

    render_status_section(app, f, layout[3]);
    render_shortcuts(f, layout[4], SHORTCUTS);
}

fn render_filter_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let (search_style, cursor) = if app.search_active {
        (Style::default().fg(Color::White).bg(Color::Blue), "█")
    } else {
        (Style::default().fg(Color::White), "")
    };

    let search = Paragraph::new(TextLine::from(vec![Span::styled(
        format!("> {}{cursor}", app.search_term),
        search_style,
    )]))
    .block(
        Block::default()
            .title(" Search Source IP ")
            .title_style(Style::default().fg(Color::Green))
            .borders(Borders::ALL)
            .border_style(if app.search_active {
                Style::default().fg(Color::Blue)
            } else {
                Style::default().fg(Color::Green)
            }),
    );
    f.render_widget(search, chunks[0]);

    let campaign = Paragraph::new(TextLine::from(vec![
        Span::styled("◄ ", Style::default().fg(Color::Gray)),
        Span::styled(
            app.current_campaign().to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ►", Style::default().fg(Color::Gray)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(" Campaign ")
            .title_style(Style::default().fg(Color::Green))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    f.render_widget(campaign, chunks[1]);
}

fn render_records_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    if app.filtered.is_empty() {
        let block = Block::default()
            .title(" Flagged Traffic ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let paragraph = Paragraph::new("No matching telemetry found.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Source IP"),
        Cell::from("Timestamp"),
        Cell::from("Campaign"),
        Cell::from("Signature"),
        Cell::from("Confidence"),
        Cell::from("Action"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = app.filtered.len();
    let max_visible_rows = area.height.saturating_sub(4) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows.max(1), app.selected_record_index);

    let visible = app.filtered.iter().skip(offset).take(max_visible_rows.max(1));

    let rows = visible.enumerate().map(|(i, record)| {
        let is_selected = i + offset == app.selected_record_index;
        let action = ThreatAction::classify(record.confidence);
        let action_color = match action {
            ThreatAction::Blocked => Color::Red,
            ThreatAction::Flagged => Color::Yellow,
        };
        let base_style = if is_selected {
            Style::default()
                .bg(Color::Rgb(0, 0, 238))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let percent = confidence_percent(record.confidence);
        Row::new(vec![
            Cell::from(record.user_id.clone()),
            Cell::from(record.timestamp.clone()),
            Cell::from(record.campaign.clone()),
            Cell::from(record.pattern.clone()),
            Cell::from(format!("{percent:5.1}% {}", confidence_bar(percent, 10))),
            Cell::from(action.label()).style(base_style.fg(action_color)),
        ])
        .style(base_style)
    });

    let widths = [
        Constraint::Length(16),
        Constraint::Length(18),
        Constraint::Length(14),
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Length(8),
    ];

    let title = if app.filter_active() {
        format!(
            " Flagged Traffic ({} of {} shown, filtered) ",
            app.selected_record_index + 1,
            total_rows
        )
    } else {
        format!(
            " Flagged Traffic ({} of {}) ",
            app.selected_record_index + 1,
            total_rows
        )
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .column_spacing(1);

    f.render_widget(table, area);
}
