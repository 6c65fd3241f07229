use crate::app::state::UploadPhase;
use crate::app::App;
use crate::ui::{render_shortcuts, render_status_section, render_title_bar};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, BRAILLE_SIX};

pub fn render_upload(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(5), // Dataset selection
            Constraint::Min(8),    // Scan terminal
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title_bar(app, f, layout[0]);
    render_dataset_panel(app, f, layout[1]);
    render_scan_terminal(app, f, layout[2]);
    render_status_section(app, f, layout[3]);
    render_shortcuts(f, layout[4], shortcuts_for(app.upload.phase));
}

const fn shortcuts_for(phase: UploadPhase) -> &'static [(&'static str, &'static str)] {
    match phase {
        UploadPhase::Idle => &[
            ("Type", "Dataset path (.csv)"),
            ("Enter", "Select file"),
            ("Esc", "Clear / back"),
        ],
        UploadPhase::FileSelected => &[("Enter", "Initiate deep scan"), ("Esc", "Cancel")],
        UploadPhase::Scanning => &[("Esc", "Abort scan")],
        UploadPhase::Success => &[("Tab", "Next view")],
        UploadPhase::Failure => &[("Enter/Esc", "Reset and retry")],
    }
}

fn render_dataset_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Telemetry Dataset ")
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let lines = match app.upload.phase {
        UploadPhase::Idle => vec![
            TextLine::from(Span::styled(
                "Enter the path of a .csv telemetry log to scan:",
                Style::default().fg(Color::Gray),
            )),
            TextLine::from(Span::styled(
                format!("> {}█", app.upload.path_input),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ],
        _ => file_detail_lines(app),
    };

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

#[allow(clippy::cast_precision_loss)]
fn file_detail_lines(app: &App) -> Vec<TextLine<'_>> {
    let label_style = Style::default().fg(Color::Gray);
    let value_style = Style::default().fg(Color::Yellow);

    let name = app.upload.selected_path.as_ref().map_or_else(
        || "(none)".to_string(),
        |path| {
            path.file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
        },
    );
    let size = app.upload.selected_size_bytes.map_or_else(
        || "unknown".to_string(),
        |bytes| format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0)),
    );

    vec![
        TextLine::from(vec![
            Span::styled("File: ", label_style),
            Span::styled(name, value_style),
        ]),
        TextLine::from(vec![
            Span::styled("Size: ", label_style),
            Span::styled(size, value_style),
        ]),
    ]
}

/// Faux scan terminal: scripted pipeline lines while scanning, then the
/// completion or failure tail.
fn render_scan_terminal(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Neural Scan Console ")
        .title_style(Style::default().fg(Color::Cyan))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.upload.phase == UploadPhase::Idle || app.upload.phase == UploadPhase::FileSelected {
        let hint = match app.upload.phase {
            UploadPhase::FileSelected => "Press Enter to initiate the deep scan.",
            _ => "Awaiting dataset selection.",
        };
        let paragraph = Paragraph::new(Span::styled(hint, Style::default().fg(Color::Gray)))
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let mut lines: Vec<TextLine<'_>> = app
        .upload
        .terminal_lines
        .iter()
        .map(|line| {
            let style = if line.starts_with("> CRITICAL ERROR") {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else if line.starts_with("> INFERENCE COMPLETE") {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Green)
            };
            TextLine::from(Span::styled(line.as_str(), style))
        })
        .collect();

    if app.upload.phase == UploadPhase::Failure {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(Span::styled(
            "Press Enter to reset the pipeline and retry.",
            Style::default().fg(Color::Gray),
        )));
    }

    let inner = block.inner(area);
    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);

    if app.upload.phase == UploadPhase::Scanning {
        render_scan_throbber(app, f, inner);
    }
}

fn render_scan_throbber(app: &App, f: &mut Frame<'_>, inner: Rect) {
    let Ok(mut state) = app.throbber.lock() else {
        return;
    };

    let used = app.upload.terminal_lines.len() as u16;
    if used >= inner.height || inner.width == 0 {
        return;
    }
    let throbber_area = Rect {
        x: inner.x,
        y: inner.y + used,
        width: inner.width,
        height: 1,
    };

    let throbber = Throbber::default()
        .label("Scanning...")
        .style(Style::default().fg(Color::Cyan))
        .throbber_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .throbber_set(BRAILLE_SIX);

    f.render_stateful_widget(throbber, throbber_area, &mut *state);
}
