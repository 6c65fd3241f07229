/// Milliseconds a dashboard counter takes to reach its target.
pub const COUNTER_DURATION_MS: u64 = 1500;

/// Ease-out-quartic curve `1 - (1 - p)^4` on clamped progress.
pub fn ease_out_quart(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(4)
}

/// Interpolated counter value at `progress` of the animation.
///
/// The curve is monotone, so repeated calls with non-decreasing progress
/// never show a smaller number. At `progress >= 1.0` the exact target is
/// returned, not a floored approximation of it.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn counter_value(start: u64, end: u64, progress: f64) -> u64 {
    if progress >= 1.0 {
        return end;
    }
    let span = end as f64 - start as f64;
    let value = (span * ease_out_quart(progress)).floor();
    if span >= 0.0 {
        start + value as u64
    } else {
        start - (-value) as u64
    }
}

/// Groups digits with commas the way the original dashboard rendered
/// counters (`1234567` -> `1,234,567`).
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
