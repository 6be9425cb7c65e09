//! Durable storage for feedback records and the submission ledger
//!
//! Two documents are kept: the authoritative, append-only list of
//! [`FeedbackRecord`]s and the [`SubmissionLedger`], a running counter with a
//! log of who submitted when. The ledger can always be rebuilt from the
//! records.
//!
//! Backends implement [`FeedbackStore`]:
//! - [`JsonFileStore`] - pretty-printed JSON files in a data directory
//! - [`MemoryStore`] - in-process documents for tests

pub mod backends;
pub mod error;
pub mod factory;
pub mod traits;
pub mod types;


pub use backends::{JsonFileStore, MemoryStore};
pub use error::{StorageError, StorageResult};
pub use factory::StorageFactory;
pub use traits::FeedbackStore;
pub use types::{EvaluatorInfo, FeedbackRecord, LedgerEntry, SubmissionLedger, SubmissionMetadata};
