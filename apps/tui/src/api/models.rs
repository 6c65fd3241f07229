use serde::{Deserialize, Deserializer};

use crate::domain::RiskLevel;

/// One fraud-detection result row as served by `/api/results`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FraudRecord {
    pub user_id: String,
    pub timestamp: String,
    pub campaign: String,
    pub pattern: String,
    pub confidence: f64,
}

/// Aggregate view served by `/api/dashboard`.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSummary {
    pub total_clicks: u64,
    pub fraud_count: u64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub top_attack_category: Option<String>,
    #[serde(default)]
    pub peak_fraud_time: Option<String>,
}

impl DashboardSummary {
    /// Insight card fallbacks match the original dashboard copy.
    pub fn top_category_label(&self) -> &str {
        self.top_attack_category.as_deref().unwrap_or("Social_Ad")
    }

    pub fn peak_time_label(&self) -> &str {
        self.peak_fraud_time.as_deref().unwrap_or("14:00 UTC")
    }
}

/// Paired series served by `/api/analysis`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisPayload {
    pub timeseries: TimeSeries,
    pub campaigns: CampaignTotals,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeSeries {
    /// The backend emits bare row indices here, not formatted timestamps,
    /// so numbers and strings are both accepted.
    #[serde(deserialize_with = "label_seq")]
    pub timestamps: Vec<String>,
    /// Rolling sums arrive as floats with zero fraction; normalized to ints.
    #[serde(deserialize_with = "count_seq")]
    pub fraud_counts: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CampaignTotals {
    pub labels: Vec<String>,
    #[serde(deserialize_with = "count_seq")]
    pub values: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultsPayload {
    pub fraud_records: Vec<FraudRecord>,
}

/// Response to the multipart upload POST. `total_records` and
/// `fraud_detected` are only present on success.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_records: Option<u64>,
    #[serde(default)]
    pub fraud_detected: Option<u64>,
}

fn label_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(f64),
    }

    let raw = Vec::<Label>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|label| match label {
            Label::Text(text) => text,
            #[allow(clippy::cast_possible_truncation)]
            Label::Number(n) if n.fract() == 0.0 => format!("{}", n as i64),
            Label::Number(n) => n.to_string(),
        })
        .collect())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_seq<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<f64>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|n| n.max(0.0).round() as u64).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;

    #[test]
    fn dashboard_summary_deserializes_backend_shape() {
        let summary: DashboardSummary = serde_json::from_str(
            r#"{"total_clicks": 1000, "fraud_count": 250, "risk_level": "HIGH"}"#,
        )
        .expect("valid payload");

        assert_eq!(summary.total_clicks, 1000);
        assert_eq!(summary.fraud_count, 250);
        assert_eq!(summary.risk_level, RiskLevel::High);
        assert_eq!(summary.top_category_label(), "Social_Ad");
        assert_eq!(summary.peak_time_label(), "14:00 UTC");
    }

    #[test]
    fn unscanned_backend_reports_unknown_risk() {
        let summary: DashboardSummary = serde_json::from_str(
            r#"{"total_clicks": 0, "fraud_count": 0, "risk_level": "UNKNOWN"}"#,
        )
        .expect("valid payload");

        assert_eq!(summary.risk_level, RiskLevel::Unknown);
    }

    #[test]
    fn analysis_accepts_numeric_timestamps_and_float_counts() {
        let payload: AnalysisPayload = serde_json::from_str(
            r#"{
                "timeseries": {"timestamps": [0, 1, 2], "fraud_counts": [0.0, 3.0, 7.0]},
                "campaigns": {"labels": ["Phone", "Motor"], "values": [12, 5]}
            }"#,
        )
        .expect("valid payload");

        assert_eq!(payload.timeseries.timestamps, vec!["0", "1", "2"]);
        assert_eq!(payload.timeseries.fraud_counts, vec![0, 3, 7]);
        assert_eq!(payload.campaigns.labels, vec!["Phone", "Motor"]);
        assert_eq!(payload.campaigns.values, vec![12, 5]);
    }

    #[test]
    fn results_payload_unwraps_record_list() {
        let payload: ResultsPayload = serde_json::from_str(
            r#"{"fraud_records": [{
                "user_id": "A1",
                "timestamp": "2026-02-01 14:00",
                "campaign": "Phone",
                "pattern": "LSTM Flagged",
                "confidence": 0.95
            }]}"#,
        )
        .expect("valid payload");

        assert_eq!(payload.fraud_records.len(), 1);
        assert_eq!(payload.fraud_records[0].user_id, "A1");
    }

    #[test]
    fn upload_response_carries_optional_fields() {
        let ok: UploadResponse =
            serde_json::from_str(r#"{"success": true, "total_records": 10, "fraud_detected": 3}"#)
                .expect("valid payload");
        assert!(ok.success);
        assert_eq!(ok.total_records, Some(10));

        let err: UploadResponse =
            serde_json::from_str(r#"{"success": false, "message": "Dataset incompatible"}"#)
                .expect("valid payload");
        assert!(!err.success);
        assert_eq!(err.message.as_deref(), Some("Dataset incompatible"));
    }
}
