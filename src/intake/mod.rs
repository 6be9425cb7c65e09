//! Feedback intake
//!
//! Turns a raw [`SubmissionRequest`] into a persisted [`FeedbackRecord`]:
//! the request is checked against the roster by [`validate_submission`],
//! checked for an earlier submission by the same evaluator, summarized, and
//! appended to the store together with a ledger entry. The same service
//! answers the read-side questions (progress, per-employee status, admin
//! listing).
//!
//! [`FeedbackRecord`]: crate::storage::FeedbackRecord

mod rating;
mod service;
pub mod stats;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use rating::Rating;
pub use service::{format_completion_time, FeedbackService, DEFAULT_COMPLETION_OFFSET_SECS};
pub use types::{
    EmployeeSummary, EvaluatorClaim, SubmissionAck, SubmissionRequest, SubmissionStats,
    SubmissionStatus, ValidatedSubmission,
};
pub use validation::validate_submission;
