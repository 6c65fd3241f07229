use serde::Deserialize;

/// Coarse severity bucket computed server-side; the client only displays it.
///
/// The backend reports `UNKNOWN` until a dataset has been scanned, so the
/// enum carries that variant as a catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// HIGH is the only level that raises the alert banner.
    pub const fn is_alerting(self) -> bool {
        matches!(self, Self::High)
    }
}

/// Two-bucket action classifier derived from model confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatAction {
    Flagged,
    Blocked,
}

impl ThreatAction {
    /// Classifies on the percentage shown to the user (one decimal place),
    /// strictly greater than 90.0. A confidence of exactly 0.90 stays
    /// FLAGGED; 0.901 is BLOCKED.
    pub fn classify(confidence: f64) -> Self {
        if confidence_percent(confidence) > 90.0 {
            Self::Blocked
        } else {
            Self::Flagged
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Flagged => "FLAGGED",
            Self::Blocked => "BLOCKED",
        }
    }
}

/// Model confidence as a display percentage, rounded to one decimal.
pub fn confidence_percent(confidence: f64) -> f64 {
    (confidence * 1000.0).round() / 10.0
}

/// Share of fraudulent clicks as a percentage rounded to one decimal.
/// Returns `None` when no clicks were analyzed instead of dividing by zero.
#[allow(clippy::cast_precision_loss)]
pub fn fraud_percent(fraud_count: u64, total_clicks: u64) -> Option<f64> {
    if total_clicks == 0 {
        return None;
    }
    let raw = fraud_count as f64 / total_clicks as f64 * 100.0;
    Some((raw * 10.0).round() / 10.0)
}

/// Formats the fraud share for display; the zero-clicks case reads `N/A`.
pub fn fraud_percent_label(fraud_count: u64, total_clicks: u64) -> String {
    fraud_percent(fraud_count, total_clicks)
        .map_or_else(|| "N/A".to_string(), |pct| format!("{pct:.1}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_high_risk_alerts() {
        assert!(RiskLevel::High.is_alerting());
        assert!(!RiskLevel::Medium.is_alerting());
        assert!(!RiskLevel::Low.is_alerting());
        assert!(!RiskLevel::Unknown.is_alerting());
    }

    #[test]
    fn threshold_is_strictly_greater_than_ninety_percent() {
        assert_eq!(ThreatAction::classify(0.90), ThreatAction::Flagged);
        assert_eq!(ThreatAction::classify(0.901), ThreatAction::Blocked);
        assert_eq!(ThreatAction::classify(0.95), ThreatAction::Blocked);
        assert_eq!(ThreatAction::classify(0.1), ThreatAction::Flagged);
    }

    #[test]
    fn confidence_percent_rounds_to_one_decimal() {
        assert!((confidence_percent(0.901) - 90.1).abs() < f64::EPSILON);
        assert!((confidence_percent(0.9) - 90.0).abs() < f64::EPSILON);
        assert!((confidence_percent(0.9549) - 95.5).abs() < f64::EPSILON);
    }

    #[test]
    fn fraud_percent_matches_dashboard_insight() {
        assert_eq!(fraud_percent(250, 1000), Some(25.0));
        assert_eq!(fraud_percent_label(250, 1000), "25.0%");
    }

    #[test]
    fn zero_clicks_yields_not_available_instead_of_nan() {
        assert_eq!(fraud_percent(0, 0), None);
        assert_eq!(fraud_percent_label(0, 0), "N/A");
    }
}
