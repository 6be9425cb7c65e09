//! Persistence interface for feedback records and the submission ledger

use async_trait::async_trait;

use super::error::StorageResult;
use super::types::{FeedbackRecord, SubmissionLedger};

/// Durable home of the two documents the service maintains
///
/// Implementations only move whole documents; ordering and exclusivity of
/// read-modify-write cycles is the caller's job.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Create empty documents where none exist yet
    async fn initialize(&self) -> StorageResult<()>;

    /// Load every feedback record, oldest first
    async fn load_records(&self) -> StorageResult<Vec<FeedbackRecord>>;

    /// Replace the full list of feedback records
    async fn save_records(&self, records: &[FeedbackRecord]) -> StorageResult<()>;

    /// Load the submission ledger
    async fn load_ledger(&self) -> StorageResult<SubmissionLedger>;

    /// Replace the submission ledger
    async fn save_ledger(&self, ledger: &SubmissionLedger) -> StorageResult<()>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}
