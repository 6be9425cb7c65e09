//! In-memory storage backend for testing and throwaway runs

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::storage::{
    error::{StorageError, StorageResult},
    traits::FeedbackStore,
    types::{FeedbackRecord, SubmissionLedger},
};

/// Keeps both documents in memory; contents vanish with the process
#[derive(Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<FeedbackRecord>>>,
    ledger: Arc<RwLock<SubmissionLedger>>,
    fail_record_writes: AtomicBool,
    fail_ledger_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `save_records` calls fail
    pub fn fail_record_writes(&self, fail: bool) {
        self.fail_record_writes.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `save_ledger` calls fail
    pub fn fail_ledger_writes(&self, fail: bool) {
        self.fail_ledger_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn load_records(&self) -> StorageResult<Vec<FeedbackRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn save_records(&self, records: &[FeedbackRecord]) -> StorageResult<()> {
        if self.fail_record_writes.load(Ordering::SeqCst) {
            return Err(StorageError::operation("feedback writes disabled"));
        }
        *self.records.write().await = records.to_vec();
        Ok(())
    }

    async fn load_ledger(&self) -> StorageResult<SubmissionLedger> {
        Ok(self.ledger.read().await.clone())
    }

    async fn save_ledger(&self, ledger: &SubmissionLedger) -> StorageResult<()> {
        if self.fail_ledger_writes.load(Ordering::SeqCst) {
            return Err(StorageError::operation("ledger writes disabled"));
        }
        *self.ledger.write().await = ledger.clone();
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
