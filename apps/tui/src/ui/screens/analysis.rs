use crate::app::App;
use crate::ui::widgets::charts::{render_bar_series, render_line_series};
use crate::ui::{render_error_panel, render_shortcuts, render_status_section, render_title_bar};
use ratatui::layout::{Constraint, Direction, Layout, Margin};
use ratatui::Frame;

const SHORTCUTS: &[(&str, &str)] = &[
    ("e", "Export forensics report"),
    ("Tab", "Next view"),
    ("Esc", "Back to dashboard"),
    ("q", "Quit"),
];

pub fn render_analysis(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Charts
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title_bar(app, f, layout[0]);

    if let Some(error) = &app.analysis_error {
        render_error_panel("Forensic Analysis", error, f, layout[1]);
    } else {
        let charts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(layout[1]);

        let (timestamps, fraud_counts, labels, values) =
            app.analysis.as_ref().map_or_else(
                || (&[][..], &[][..], &[][..], &[][..]),
                |payload| {
                    (
                        payload.timeseries.timestamps.as_slice(),
                        payload.timeseries.fraud_counts.as_slice(),
                        payload.campaigns.labels.as_slice(),
                        payload.campaigns.values.as_slice(),
                    )
                },
            );

        render_line_series(
            " Anomalies Over Time ",
            timestamps,
            fraud_counts,
            f,
            charts[0],
        );
        render_bar_series(" Threats by Campaign ", labels, values, f, charts[1]);
    }

    render_status_section(app, f, layout[2]);
    render_shortcuts(f, layout[3], SHORTCUTS);
}
