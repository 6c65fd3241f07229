use rand::Rng;

/// Milliseconds between synthetic feed entries.
pub const FEED_INTERVAL_MS: u64 = 2500;
/// Maximum entries kept on screen; older ones fall off the bottom.
pub const FEED_CAPACITY: usize = 6;

const ATTACK_VECTORS: [&str; 4] = ["Botnet_DDoS", "Click_Farm", "Script_Injection", "Geo_Spoof"];

/// One synthetic line of the decorative live-blocking feed. The feed does
/// not reflect backend events; it is presentation-only, like the original.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub source_ip: String,
    pub vector: &'static str,
    pub confidence: f64,
}

impl FeedEntry {
    pub fn synthesize<R: Rng>(rng: &mut R) -> Self {
        let vector = ATTACK_VECTORS[rng.gen_range(0..ATTACK_VECTORS.len())];
        Self {
            source_ip: format!(
                "{}.{}.{}.x",
                rng.gen_range(0..255),
                rng.gen_range(0..255),
                rng.gen_range(0..255)
            ),
            vector,
            confidence: 90.0 + rng.gen_range(0.0..9.0),
        }
    }
}

/// Prepends the newest entry and trims the feed to [`FEED_CAPACITY`].
pub fn push_entry(entries: &mut Vec<FeedEntry>, entry: FeedEntry) {
    entries.insert(0, entry);
    entries.truncate(FEED_CAPACITY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn synthetic_entries_stay_in_the_blocked_confidence_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let entry = FeedEntry::synthesize(&mut rng);
            assert!(entry.confidence >= 90.0 && entry.confidence < 99.0);
            assert!(entry.source_ip.ends_with(".x"));
            assert!(ATTACK_VECTORS.contains(&entry.vector));
        }
    }

    #[test]
    fn feed_is_newest_first_and_capped() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut entries = Vec::new();
        for _ in 0..10 {
            push_entry(&mut entries, FeedEntry::synthesize(&mut rng));
        }
        assert_eq!(entries.len(), FEED_CAPACITY);

        let newest = FeedEntry::synthesize(&mut rng);
        let newest_ip = newest.source_ip.clone();
        push_entry(&mut entries, newest);
        assert_eq!(entries[0].source_ip, newest_ip);
        assert_eq!(entries.len(), FEED_CAPACITY);
    }
}
