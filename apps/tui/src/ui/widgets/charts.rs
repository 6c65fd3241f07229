//! Narrow charting interface: screens hand over labels and values, the
//! widget functions own every ratatui chart detail.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph,
};
use ratatui::Frame;

use crate::domain::fraud_percent_label;

fn empty_panel(title: &str, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new("No analysis data available")
        .block(block)
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Anomaly count over time as a line chart.
#[allow(clippy::cast_precision_loss)]
pub fn render_line_series(
    title: &str,
    labels: &[String],
    values: &[u64],
    f: &mut Frame<'_>,
    area: Rect,
) {
    if values.is_empty() {
        empty_panel(title, f, area);
        return;
    }

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64, *value as f64))
        .collect();
    let max_value = values.iter().copied().max().unwrap_or(0).max(1) as f64;
    let max_x = (points.len().saturating_sub(1)).max(1) as f64;

    let datasets = vec![Dataset::default()
        .name("Risk Spikes")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&points)];

    let first_label = labels.first().cloned().unwrap_or_default();
    let last_label = labels.last().cloned().unwrap_or_default();
    let x_labels = vec![Span::raw(first_label), Span::raw(last_label)];
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{}", max_value / 2.0)),
        Span::raw(format!("{max_value}")),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_x])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_value])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

/// Per-campaign threat totals as a bar chart.
pub fn render_bar_series(
    title: &str,
    labels: &[String],
    values: &[u64],
    f: &mut Frame<'_>,
    area: Rect,
) {
    if values.is_empty() {
        empty_panel(title, f, area);
        return;
    }

    let bars: Vec<Bar<'_>> = labels
        .iter()
        .zip(values)
        .map(|(label, value)| {
            Bar::default()
                .value(*value)
                .label(TextLine::from(label.clone()))
                .style(Style::default().fg(Color::Blue))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let max_value = values.iter().copied().max().unwrap_or(0).max(1);

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(9);

    f.render_widget(chart, area);
}

/// Legitimate-vs-fraudulent traffic share, the TUI stand-in for the
/// original doughnut chart.
#[allow(clippy::cast_precision_loss)]
pub fn render_share_gauge(fraud_count: u64, total_clicks: u64, f: &mut Frame<'_>, area: Rect) {
    let ratio = if total_clicks == 0 {
        0.0
    } else {
        (fraud_count as f64 / total_clicks as f64).clamp(0.0, 1.0)
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title("Traffic Breakdown")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .gauge_style(Style::default().fg(Color::Red).bg(Color::Green))
        .ratio(ratio)
        .label(format!(
            "{} fraudulent",
            fraud_percent_label(fraud_count, total_clicks)
        ));

    f.render_widget(gauge, area);
}
