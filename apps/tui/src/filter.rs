use crate::api::models::FraudRecord;

/// Sentinel campaign value that disables the category predicate.
pub const ALL_CAMPAIGNS: &str = "ALL";

/// Stable AND-filter over the in-memory record list.
///
/// `term` is matched case-insensitively as a substring of `user_id`;
/// `category` must equal `campaign` exactly unless it is [`ALL_CAMPAIGNS`].
/// Input order is preserved and an empty result is a valid output.
pub fn filter_records(records: &[FraudRecord], term: &str, category: &str) -> Vec<FraudRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            let matches_user = needle.is_empty() || record.user_id.to_lowercase().contains(&needle);
            let matches_campaign = category == ALL_CAMPAIGNS || record.campaign == category;
            matches_user && matches_campaign
        })
        .cloned()
        .collect()
}

/// True when either predicate narrows the record set.
pub fn is_filter_active(term: &str, category: &str) -> bool {
    !term.is_empty() || category != ALL_CAMPAIGNS
}

/// `ALL` plus the distinct campaigns in first-seen order, for cycling
/// through the category filter.
pub fn campaign_options(records: &[FraudRecord]) -> Vec<String> {
    let mut options = vec![ALL_CAMPAIGNS.to_string()];
    for record in records {
        if !options.iter().any(|known| known == &record.campaign) {
            options.push(record.campaign.clone());
        }
    }
    options
}
