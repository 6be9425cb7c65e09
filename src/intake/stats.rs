//! Derived figures: per-submission metadata and round completion

use std::collections::BTreeMap;

use super::Rating;
use crate::roster::EmployeeId;
use crate::storage::SubmissionMetadata;

/// Count, low/high tallies and two-decimal mean of a rating map
pub fn summarize(ratings: &BTreeMap<EmployeeId, Rating>) -> SubmissionMetadata {
    let total = ratings.len();
    let sum: u64 = ratings.values().map(|r| u64::from(r.value())).sum();

    SubmissionMetadata {
        total_ratings: total,
        low_scores: ratings.values().filter(|r| r.is_low()).count(),
        high_scores: ratings.values().filter(|r| r.is_high()).count(),
        average_rating: format_ratio(sum, total as u64, 2),
    }
}

/// `100 * submitted / total` with one decimal
pub fn completion_percentage(submitted: u64, total: u64) -> String {
    format_ratio(submitted * 100, total, 1)
}

/// Format `numerator / denominator` with `decimals` places, ties rounded up
///
/// Integer arithmetic keeps `x.xx5` boundaries exact.
pub fn format_ratio(numerator: u64, denominator: u64, decimals: u32) -> String {
    let scale = 10u64.pow(decimals);
    let scaled = if denominator == 0 {
        0
    } else {
        (2 * numerator * scale + denominator) / (2 * denominator)
    };

    if decimals == 0 {
        return scaled.to_string();
    }
    format!(
        "{}.{:0width$}",
        scaled / scale,
        scaled % scale,
        width = decimals as usize
    )
}
