//! JSON file storage backend

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::storage::{
    error::{StorageError, StorageResult},
    traits::FeedbackStore,
    types::{FeedbackRecord, SubmissionLedger},
};

/// File name of the feedback record list
pub const FEEDBACK_FILE: &str = "feedback.json";
/// File name of the submission ledger
pub const LEDGER_FILE: &str = "submissions.json";

/// Keeps both documents as pretty-printed JSON files in one directory
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `base_dir`; nothing touches disk until used
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn feedback_path(&self) -> PathBuf {
        self.base_dir.join(FEEDBACK_FILE)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.base_dir.join(LEDGER_FILE)
    }

    /// Read a JSON document, `None` if the file does not exist
    async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> StorageResult<Option<T>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Io(e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StorageError::corrupted(path, e))
    }

    /// Write a JSON document via a temp file and rename
    async fn write_json<T: Serialize + ?Sized>(&self, path: &Path, data: &T) -> StorageResult<()> {
        fs::create_dir_all(&self.base_dir).await?;

        let content = serde_json::to_string_pretty(data)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document");
        let temp_path = self
            .base_dir
            .join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        let written = match fs::write(&temp_path, content).await {
            Ok(()) => fs::rename(&temp_path, path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            // A partial write may have created the file
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::Io(e));
        }

        debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl FeedbackStore for JsonFileStore {
    async fn initialize(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.base_dir).await?;

        let feedback_path = self.feedback_path();
        if !fs::try_exists(&feedback_path).await? {
            self.write_json(&feedback_path, &Vec::<FeedbackRecord>::new())
                .await?;
            info!("Created empty feedback store at {}", feedback_path.display());
        }

        let ledger_path = self.ledger_path();
        if !fs::try_exists(&ledger_path).await? {
            self.write_json(&ledger_path, &SubmissionLedger::default())
                .await?;
            info!("Created empty submission ledger at {}", ledger_path.display());
        }

        Ok(())
    }

    async fn load_records(&self) -> StorageResult<Vec<FeedbackRecord>> {
        Ok(self
            .read_json(&self.feedback_path())
            .await?
            .unwrap_or_default())
    }

    async fn save_records(&self, records: &[FeedbackRecord]) -> StorageResult<()> {
        self.write_json(&self.feedback_path(), records).await
    }

    async fn load_ledger(&self) -> StorageResult<SubmissionLedger> {
        Ok(self
            .read_json(&self.ledger_path())
            .await?
            .unwrap_or_default())
    }

    async fn save_ledger(&self, ledger: &SubmissionLedger) -> StorageResult<()> {
        self.write_json(&self.ledger_path(), ledger).await
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
