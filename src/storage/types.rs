//! Persisted document types

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::intake::validation::lenient_integer;
use crate::intake::Rating;
use crate::roster::EmployeeId;

/// Snapshot of the evaluator at submission time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorInfo {
    pub id: EmployeeId,
    pub name: String,
    pub number: u32,
    pub designation: String,
}

/// Figures derived from a set of ratings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionMetadata {
    pub total_ratings: usize,
    pub low_scores: usize,
    pub high_scores: usize,
    /// Mean rating with exactly two decimals, e.g. `"5.00"`
    pub average_rating: String,
}

/// One evaluator's complete submission. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: String,
    pub evaluator: EvaluatorInfo,
    /// Accepts older files that stored ratings as numeric strings
    #[serde(deserialize_with = "lenient_ratings")]
    pub ratings: BTreeMap<EmployeeId, Rating>,
    #[serde(default, deserialize_with = "lenient_reasons")]
    pub reasons: BTreeMap<EmployeeId, String>,
    /// Client-supplied timestamp, kept verbatim
    pub timestamp: serde_json::Value,
    /// Human-readable local completion time
    pub completed_at: String,
    pub server_timestamp: DateTime<Utc>,
    pub metadata: SubmissionMetadata,
}

fn lenient_ratings<'de, D>(deserializer: D) -> Result<BTreeMap<EmployeeId, Rating>, D::Error>
where
    D: Deserializer<'de>,
{
    BTreeMap::<EmployeeId, Value>::deserialize(deserializer)?
        .into_iter()
        .map(|(id, value)| {
            lenient_integer(&value)
                .and_then(Rating::new)
                .map(|rating| (id, rating))
                .ok_or_else(|| {
                    D::Error::custom(format!("invalid rating {value} for employee {id}"))
                })
        })
        .collect()
}

/// Non-string reasons and keys that are not ids carry nothing usable; drop them
fn lenient_reasons<'de, D>(deserializer: D) -> Result<BTreeMap<EmployeeId, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(BTreeMap::<String, Value>::deserialize(deserializer)?
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => key.parse::<EmployeeId>().ok().map(|id| (id, text)),
            _ => None,
        })
        .collect())
}

/// Ledger line for a single submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub submitted_at: DateTime<Utc>,
}

/// Running counter and append-only log of submissions
///
/// Denormalized from the feedback records and rebuildable from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionLedger {
    pub total_submissions: u64,
    pub submissions: Vec<LedgerEntry>,
    pub last_updated: DateTime<Utc>,
}

impl Default for SubmissionLedger {
    fn default() -> Self {
        Self {
            total_submissions: 0,
            submissions: Vec::new(),
            last_updated: Utc::now(),
        }
    }
}

impl SubmissionLedger {
    /// Append an entry and bump the counter
    pub fn record(&mut self, entry: LedgerEntry) {
        self.total_submissions += 1;
        self.submissions.push(entry);
        self.last_updated = Utc::now();
    }

    /// Regenerate the ledger from the authoritative feedback records
    pub fn rebuild_from(records: &[FeedbackRecord]) -> Self {
        let mut ledger = Self::default();
        for record in records {
            ledger.record(LedgerEntry::from(record));
        }
        ledger
    }

    /// Whether the counter agrees with the given number of records
    pub fn is_consistent_with(&self, record_count: usize) -> bool {
        self.total_submissions == record_count as u64
            && self.submissions.len() == record_count
    }
}

impl From<&FeedbackRecord> for LedgerEntry {
    fn from(record: &FeedbackRecord) -> Self {
        Self {
            employee_id: record.evaluator.id,
            employee_name: record.evaluator.name.clone(),
            submitted_at: record.server_timestamp,
        }
    }
}
