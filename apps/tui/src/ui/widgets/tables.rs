/// First visible row index so the selection stays inside the window.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

/// Text progress bar for a confidence percentage, `width` cells wide.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn confidence_bar(percent: f64, width: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width.saturating_sub(filled)));
    bar
}

#[cfg(test)]
mod tests {
    use super::{confidence_bar, scroll_offset};

    #[test]
    fn no_scroll_when_everything_fits() {
        assert_eq!(scroll_offset(5, 10, 4), 0);
    }

    #[test]
    fn selection_below_the_window_scrolls_down() {
        assert_eq!(scroll_offset(50, 10, 9), 0);
        assert_eq!(scroll_offset(50, 10, 10), 1);
        assert_eq!(scroll_offset(50, 10, 49), 40);
    }

    #[test]
    fn selection_inside_the_first_window_never_scrolls() {
        // More rows than fit, but the selection is still visible from row 0.
        for selected in 0..10 {
            assert_eq!(scroll_offset(50, 10, selected), 0);
        }
    }

    #[test]
    fn bar_fills_proportionally_and_clamps() {
        assert_eq!(confidence_bar(0.0, 4), "░░░░");
        assert_eq!(confidence_bar(100.0, 4), "████");
        assert_eq!(confidence_bar(50.0, 4), "██░░");
        assert_eq!(confidence_bar(250.0, 4), "████");
    }
}
