//! Frequency tables accumulated over a single pass of a log

use serde::Serialize;
use std::collections::HashMap;

use super::event::AuthEvent;

/// Key -> count mapping. Counts only ever grow, and a key is present
/// only once at least one matching line was seen for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            counts: HashMap::new(),
        }
    }

    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    fn add(&mut self, key: &str, amount: u64) {
        match self.counts.get_mut(key) {
            Some(count) => *count += amount,
            None => {
                self.counts.insert(key.to_string(), amount);
            }
        }
    }

    /// Count for `key`, zero when never seen
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Add every count from `other` into this table
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (key, count) in other.iter() {
            self.add(key, count);
        }
    }

    /// All entries ordered by count descending, then key ascending
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The `n` highest ranked entries
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries = self.ranked();
        entries.truncate(n);
        entries
    }

    /// Ranked entries whose count is at least `threshold`
    pub fn at_least(&self, threshold: u64) -> Vec<(&str, u64)> {
        self.ranked()
            .into_iter()
            .filter(|&(_, count)| count >= threshold)
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for key in iter {
            table.increment(key.as_ref());
        }
        table
    }
}

/// The three tables built by one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthStats {
    pub failed_by_ip: FrequencyTable,
    pub failed_by_user: FrequencyTable,
    pub success_by_user: FrequencyTable,
    /// Lines consumed, matching or not
    pub lines_read: u64,
    /// Lines that produced an event
    pub lines_matched: u64,
}

impl AuthStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the tables
    pub fn record(&mut self, event: &AuthEvent) {
        match event {
            AuthEvent::Failed { user, ip } => {
                self.failed_by_ip.increment(ip);
                self.failed_by_user.increment(user);
            }
            // Accepted logins are tallied by user only
            AuthEvent::Accepted { user, .. } => {
                self.success_by_user.increment(user);
            }
        }
        self.lines_matched += 1;
    }

    /// Sum another pass's counts into this one
    pub fn merge(&mut self, other: &AuthStats) {
        self.failed_by_ip.merge(&other.failed_by_ip);
        self.failed_by_user.merge(&other.failed_by_user);
        self.success_by_user.merge(&other.success_by_user);
        self.lines_read += other.lines_read;
        self.lines_matched += other.lines_matched;
    }

    pub fn total_failures(&self) -> u64 {
        self.failed_by_ip.total()
    }

    pub fn total_successes(&self) -> u64 {
        self.success_by_user.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(user: &str, ip: &str) -> AuthEvent {
        AuthEvent::Failed {
            user: user.to_string(),
            ip: ip.to_string(),
        }
    }

    #[test]
    fn test_increment_and_get() {
        let mut table = FrequencyTable::new();
        assert!(table.is_empty());
        assert_eq!(table.get("root"), 0);

        table.increment("root");
        table.increment("root");
        table.increment("admin");

        assert_eq!(table.get("root"), 2);
        assert_eq!(table.get("admin"), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_ranked_breaks_ties_by_key() {
        let table: FrequencyTable = ["b", "a", "c", "c", "b", "d"].into_iter().collect();

        assert_eq!(table.ranked(), vec![("b", 2), ("c", 2), ("a", 1), ("d", 1)]);
    }

    #[test]
    fn test_top_caps_entries() {
        let keys: Vec<String> = (0..15).map(|i| format!("user{:02}", i)).collect();
        let table: FrequencyTable = keys.iter().collect();

        let top = table.top(10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0], ("user00", 1));
        assert_eq!(top[9], ("user09", 1));

        assert_eq!(table.top(100).len(), 15);
    }

    #[test]
    fn test_at_least_is_inclusive_and_uncapped() {
        let mut table = FrequencyTable::new();
        for i in 0..12 {
            let ip = format!("10.0.0.{}", i);
            for _ in 0..(9 + i) {
                table.increment(&ip);
            }
        }

        let flagged = table.at_least(10);
        assert_eq!(flagged.len(), 11);
        assert_eq!(flagged[0], ("10.0.0.11", 20));
        assert_eq!(flagged.last(), Some(&("10.0.0.1", 10)));
        assert!(flagged.iter().all(|&(_, c)| c >= 10));
    }

    #[test]
    fn test_record_failure_updates_ip_and_user() {
        let mut stats = AuthStats::new();
        stats.record(&failed("admin", "10.0.0.5"));

        assert_eq!(stats.failed_by_ip.get("10.0.0.5"), 1);
        assert_eq!(stats.failed_by_user.get("admin"), 1);
        assert!(stats.success_by_user.is_empty());
        assert_eq!(stats.lines_matched, 1);
    }

    #[test]
    fn test_record_accepted_updates_user_only() {
        let mut stats = AuthStats::new();
        stats.record(&AuthEvent::Accepted {
            method: "publickey".to_string(),
            user: "alice".to_string(),
            ip: "10.0.0.9".to_string(),
        });

        assert_eq!(stats.success_by_user.get("alice"), 1);
        assert!(stats.failed_by_ip.is_empty());
        assert!(stats.failed_by_user.is_empty());
    }

    #[test]
    fn test_merge_sums_counts() {
        let mut a = AuthStats::new();
        a.record(&failed("root", "1.1.1.1"));
        a.lines_read = 4;

        let mut b = AuthStats::new();
        b.record(&failed("root", "1.1.1.1"));
        b.record(&failed("guest", "2.2.2.2"));
        b.lines_read = 6;

        a.merge(&b);

        assert_eq!(a.failed_by_ip.get("1.1.1.1"), 2);
        assert_eq!(a.failed_by_ip.get("2.2.2.2"), 1);
        assert_eq!(a.failed_by_user.get("root"), 2);
        assert_eq!(a.lines_read, 10);
        assert_eq!(a.lines_matched, 3);
        assert_eq!(a.total_failures(), 3);
    }
}
