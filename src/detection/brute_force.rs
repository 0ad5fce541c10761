//! Brute-force source detection
//!
//! Flags every source IP whose failure count reached the threshold. Unlike
//! the ranked report sections the result is never capped.

use crate::models::{BruteForceCandidate, FrequencyTable};

/// Default number of failures from one IP that marks it as a candidate
pub const DEFAULT_THRESHOLD: u64 = 10;

/// Every IP in `failed_by_ip` with at least `threshold` failures, ordered by
/// failures descending, then IP ascending
pub fn detect_brute_force(
    failed_by_ip: &FrequencyTable,
    threshold: u64,
) -> Vec<BruteForceCandidate> {
    failed_by_ip
        .at_least(threshold)
        .into_iter()
        .map(|(ip, failures)| BruteForceCandidate {
            ip: ip.to_string(),
            failures,
        })
        .collect()
}
