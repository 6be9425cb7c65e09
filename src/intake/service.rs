//! Feedback intake service

use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::stats::{completion_percentage, summarize};
use super::types::{
    SubmissionAck, SubmissionRequest, SubmissionStats, SubmissionStatus, ValidatedSubmission,
};
use super::validation::validate_submission;
use crate::auth::CredentialVerifier;
use crate::error::{FeedbackError, Result};
use crate::roster::Roster;
use crate::storage::{
    EvaluatorInfo, FeedbackRecord, FeedbackStore, LedgerEntry, StorageError, SubmissionLedger,
};

/// Offset used for human-readable completion times (UTC+05:30)
pub const DEFAULT_COMPLETION_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Validates, deduplicates and records feedback submissions
///
/// Every operation that rewrites a document runs under one async mutex, so
/// the duplicate check and the append it guards cannot interleave with
/// another writer in this process.
pub struct FeedbackService {
    roster: Arc<Roster>,
    store: Arc<dyn FeedbackStore>,
    verifier: Arc<dyn CredentialVerifier>,
    completion_offset: FixedOffset,
    write_lock: Mutex<()>,
}

impl FeedbackService {
    pub fn new(
        roster: Arc<Roster>,
        store: Arc<dyn FeedbackStore>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            roster,
            store,
            verifier,
            completion_offset: FixedOffset::east_opt(DEFAULT_COMPLETION_OFFSET_SECS)
                .unwrap_or_else(|| Utc.fix()),
            write_lock: Mutex::new(()),
        }
    }

    /// Use a different offset for `completedAt` strings
    pub fn with_completion_offset(mut self, offset: FixedOffset) -> Self {
        self.completion_offset = offset;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn store(&self) -> &Arc<dyn FeedbackStore> {
        &self.store
    }

    /// Validate and persist one evaluator's feedback
    pub async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionAck> {
        let _guard = self.write_lock.lock().await;

        let submission = validate_submission(&self.roster, request).inspect_err(|e| {
            warn!("Rejected feedback submission: {}", e);
        })?;

        let mut records = self.store.load_records().await.inspect_err(|e| {
            error!("Failed to load feedback records: {}", e);
        })?;

        if let Some(existing) = records
            .iter()
            .find(|r| r.evaluator.id == submission.evaluator.id)
        {
            warn!(
                "Duplicate feedback from {} (ID: {})",
                submission.evaluator.name, submission.evaluator.id
            );
            return Err(FeedbackError::DuplicateSubmission {
                submitted_at: existing.completed_at.clone(),
            });
        }

        let record = self.build_record(submission, &records, Utc::now());
        records.push(record.clone());
        self.store.save_records(&records).await.inspect_err(|e| {
            error!("Failed to save feedback: {}", e);
        })?;

        // The record is committed; a stale ledger is repaired by reconcile_ledger
        if let Err(e) = self.append_to_ledger(&record).await {
            warn!(
                "Feedback from {} saved but ledger update failed: {}",
                record.evaluator.name, e
            );
        }

        info!(
            "Feedback submitted by {} (ID: {})",
            record.evaluator.name, record.evaluator.id
        );

        Ok(SubmissionAck {
            success: true,
            message: "Feedback submitted successfully".to_string(),
            submission_id: record.id,
            metadata: record.metadata,
        })
    }

    /// Progress of the round, from the ledger counter
    pub async fn stats(&self) -> Result<SubmissionStats> {
        let ledger = self.store.load_ledger().await?;
        let total = self.roster.len();

        Ok(SubmissionStats {
            total_employees: total,
            total_submissions: ledger.total_submissions,
            remaining: total as i64 - ledger.total_submissions as i64,
            completion_percentage: completion_percentage(ledger.total_submissions, total as u64),
            last_updated: ledger.last_updated,
        })
    }

    /// Whether the employee with `employee_number` has submitted
    pub async fn check_submission(&self, employee_number: u32) -> Result<SubmissionStatus> {
        let employee = self
            .roster
            .find_by_number(employee_number)
            .ok_or_else(|| FeedbackError::not_found("Employee not found"))?;

        let records = self.store.load_records().await?;
        let existing = records.iter().find(|r| r.evaluator.id == employee.id);

        Ok(SubmissionStatus {
            has_submitted: existing.is_some(),
            submitted_at: existing.map(|r| r.completed_at.clone()),
            employee_info: employee.into(),
        })
    }

    /// Every stored record, for holders of the admin credential
    pub async fn list_all(&self, authorization: Option<&str>) -> Result<Vec<FeedbackRecord>> {
        if !self.verifier.verify(authorization) {
            warn!("Rejected admin request with missing or invalid credentials");
            return Err(FeedbackError::Unauthorized);
        }

        Ok(self.store.load_records().await?)
    }

    /// Regenerate the ledger from the feedback records
    pub async fn rebuild_ledger(&self) -> Result<SubmissionLedger> {
        let _guard = self.write_lock.lock().await;

        let records = self.store.load_records().await?;
        let ledger = SubmissionLedger::rebuild_from(&records);
        self.store.save_ledger(&ledger).await?;

        info!("Rebuilt submission ledger from {} records", records.len());
        Ok(ledger)
    }

    /// Rebuild the ledger if it disagrees with the records; returns whether it did
    pub async fn reconcile_ledger(&self) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let records = self.store.load_records().await?;
        match self.store.load_ledger().await {
            Ok(ledger) if ledger.is_consistent_with(records.len()) => {
                debug!("Submission ledger consistent with {} records", records.len());
                return Ok(false);
            }
            Ok(ledger) => warn!(
                "Submission ledger counts {} but {} records exist; rebuilding",
                ledger.total_submissions,
                records.len()
            ),
            Err(e @ StorageError::Corrupted { .. }) => {
                warn!("Submission ledger unreadable ({}); rebuilding", e)
            }
            Err(e) => return Err(e.into()),
        }

        let ledger = SubmissionLedger::rebuild_from(&records);
        self.store.save_ledger(&ledger).await?;
        Ok(true)
    }

    async fn append_to_ledger(&self, record: &FeedbackRecord) -> Result<()> {
        let mut ledger = self.store.load_ledger().await?;
        ledger.record(LedgerEntry::from(record));
        self.store.save_ledger(&ledger).await?;
        Ok(())
    }

    fn build_record(
        &self,
        submission: ValidatedSubmission,
        existing: &[FeedbackRecord],
        now: DateTime<Utc>,
    ) -> FeedbackRecord {
        let metadata = summarize(&submission.ratings);
        let evaluator = submission.evaluator;

        FeedbackRecord {
            id: next_record_id(existing, now),
            evaluator: EvaluatorInfo {
                id: evaluator.id,
                name: evaluator.name,
                number: evaluator.number,
                designation: evaluator.designation,
            },
            ratings: submission.ratings,
            reasons: submission.reasons,
            timestamp: submission.timestamp,
            completed_at: format_completion_time(now, self.completion_offset),
            server_timestamp: now,
            metadata,
        }
    }
}

/// Millisecond timestamp id, bumped past any existing id it would collide with
fn next_record_id(existing: &[FeedbackRecord], now: DateTime<Utc>) -> String {
    let candidate = now.timestamp_millis();
    let highest = existing.iter().filter_map(|r| r.id.parse::<i64>().ok()).max();

    match highest {
        Some(highest) if highest >= candidate => (highest + 1).to_string(),
        _ => candidate.to_string(),
    }
}

/// e.g. `"Friday, 16 October 2026 at 3:04:05 pm"`
pub fn format_completion_time(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset)
        .format("%A, %-d %B %Y at %-I:%M:%S %P")
        .to_string()
}
