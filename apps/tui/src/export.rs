use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use color_eyre::Result;

use crate::api::models::{AnalysisPayload, FraudRecord};

pub const RECORDS_HEADER: &str = "Source_IP,Timestamp,Campaign,Threat_Signature,Confidence_Score";
pub const RECORDS_FILENAME: &str = "Security_Logs_Export.csv";
pub const FORENSICS_FILENAME: &str = "Threat_Forensics_Report.csv";

/// RFC 4180 quoting: fields containing the delimiter, quotes or newlines
/// are wrapped in quotes with inner quotes doubled.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Tabular record export: one header line, one line per record, `\n`
/// terminated.
pub fn records_csv(rows: &[FraudRecord]) -> String {
    let mut csv = String::from(RECORDS_HEADER);
    csv.push('\n');
    for row in rows {
        let _ = writeln!(
            csv,
            "{},{},{},{},{}",
            csv_field(&row.user_id),
            csv_field(&row.timestamp),
            csv_field(&row.campaign),
            csv_field(&row.pattern),
            row.confidence
        );
    }
    csv
}

/// Dual-table export: the anomaly timeseries, a blank separator line, then
/// the per-campaign threat totals.
pub fn forensics_csv(analysis: &AnalysisPayload) -> String {
    let mut csv = String::from("Timestamp,Detected_Anomalies\n");
    for (timestamp, count) in analysis
        .timeseries
        .timestamps
        .iter()
        .zip(&analysis.timeseries.fraud_counts)
    {
        let _ = writeln!(csv, "{},{count}", csv_field(timestamp));
    }
    csv.push('\n');
    csv.push_str("Campaign_Name,Total_Threats\n");
    for (label, value) in analysis
        .campaigns
        .labels
        .iter()
        .zip(&analysis.campaigns.values)
    {
        let _ = writeln!(csv, "{},{value}", csv_field(label));
    }
    csv
}

/// Writes a report into the export directory. Terminal action; the caller
/// only learns the final path for the status line.
pub fn write_report(dir: &Path, filename: &str, contents: &str) -> Result<PathBuf> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    let path = dir.join(filename);
    std::fs::write(&path, contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{CampaignTotals, TimeSeries};

    fn record(user_id: &str, campaign: &str, confidence: f64) -> FraudRecord {
        FraudRecord {
            user_id: user_id.to_string(),
            timestamp: "2026-02-01 14:00".to_string(),
            campaign: campaign.to_string(),
            pattern: "LSTM Flagged".to_string(),
            confidence,
        }
    }

    #[test]
    fn record_export_has_one_header_plus_one_line_per_record() {
        let rows = vec![
            record("A1", "Phone", 0.95),
            record("B2", "Motor", 0.45),
            record("C3", "Phone", 0.91),
        ];
        let csv = records_csv(&rows);
        let lines: Vec<&str> = csv.trim_end().lines().collect();

        assert_eq!(lines.len(), rows.len() + 1);
        assert_eq!(lines[0], RECORDS_HEADER);
        assert_eq!(lines[1], "A1,2026-02-01 14:00,Phone,LSTM Flagged,0.95");
    }

    #[test]
    fn embedded_commas_and_quotes_are_escaped() {
        let rows = vec![record("A1", "Holidays, \"Summer\"", 0.5)];
        let csv = records_csv(&rows);

        assert!(csv.contains("\"Holidays, \"\"Summer\"\"\""));
        // Still exactly two lines; the comma did not split the row.
        assert_eq!(csv.trim_end().lines().count(), 2);
    }

    #[test]
    fn empty_record_set_exports_header_only() {
        let csv = records_csv(&[]);
        assert_eq!(csv, format!("{RECORDS_HEADER}\n"));
    }

    #[test]
    fn forensics_export_concatenates_both_tables() {
        let analysis = AnalysisPayload {
            timeseries: TimeSeries {
                timestamps: vec!["0".to_string(), "1".to_string()],
                fraud_counts: vec![3, 7],
            },
            campaigns: CampaignTotals {
                labels: vec!["Phone".to_string()],
                values: vec![12],
            },
        };

        let csv = forensics_csv(&analysis);
        let expected = "Timestamp,Detected_Anomalies\n0,3\n1,7\n\nCampaign_Name,Total_Threats\nPhone,12\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn report_lands_in_the_export_directory() {
        let dir = std::env::temp_dir().join("clickshield-export-test");
        let path = write_report(&dir, RECORDS_FILENAME, "header\n").expect("write succeeds");

        assert_eq!(path, dir.join(RECORDS_FILENAME));
        assert_eq!(std::fs::read_to_string(&path).expect("readable"), "header\n");
        let _ = std::fs::remove_file(path);
    }
}
