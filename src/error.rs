use crate::storage::StorageError;
use thiserror::Error;

/// Every way a feedback operation can fail
#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("Missing required fields: evaluator, ratings, timestamp")]
    MissingFields,

    #[error("Employee number not found")]
    UnknownEmployee { number: String },

    #[error("Name does not match employee number")]
    NameMismatch { number: u32 },

    #[error("Employee id does not match employee number")]
    IdMismatch { number: u32 },

    #[error("Cannot rate yourself")]
    SelfRating,

    #[error("Expected {expected} ratings, received {received}")]
    RatingCountMismatch { expected: usize, received: usize },

    #[error("Rating submitted for unknown employee {0}")]
    UnknownRatee(String),

    #[error("Invalid rating value: {value} for employee {employee}")]
    InvalidRatingValue { employee: String, value: String },

    #[error("Reason required for {employee} (rating: {rating})")]
    MissingReason { employee: String, rating: u8 },

    #[error("Feedback already submitted by this employee")]
    DuplicateSubmission { submitted_at: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Coarse classification used by callers that only care about the category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingFields,
    IdentityInvalid,
    SelfRating,
    RatingCountMismatch,
    UnknownRatee,
    InvalidRatingValue,
    MissingReason,
    DuplicateSubmission,
    Unauthorized,
    NotFound,
    StorageFailure,
}

impl FeedbackError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFields => ErrorKind::MissingFields,
            Self::UnknownEmployee { .. } | Self::NameMismatch { .. } | Self::IdMismatch { .. } => {
                ErrorKind::IdentityInvalid
            }
            Self::SelfRating => ErrorKind::SelfRating,
            Self::RatingCountMismatch { .. } => ErrorKind::RatingCountMismatch,
            Self::UnknownRatee(_) => ErrorKind::UnknownRatee,
            Self::InvalidRatingValue { .. } => ErrorKind::InvalidRatingValue,
            Self::MissingReason { .. } => ErrorKind::MissingReason,
            Self::DuplicateSubmission { .. } => ErrorKind::DuplicateSubmission,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::StorageFailure,
        }
    }

    /// True for failures caused by the request rather than the service
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }

    pub fn not_found<E: std::fmt::Display>(what: E) -> Self {
        Self::NotFound(what.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeedbackError>;
