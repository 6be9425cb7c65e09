//! # Peer Feedback
//!
//! A small HTTP service that collects one round of peer evaluations from a
//! fixed roster of employees. Each employee submits exactly once, rating
//! every colleague from 1 to 10; extreme ratings carry a written reason.
//!
//! ## Usage
//!
//! ```bash
//! peer-feedback serve [--host 0.0.0.0] [--port 3000] [--data-dir data]
//! ```
//!
//! ## Modules
//!
//! - `auth` - Admin credential checks
//! - `config` - Layered server configuration
//! - `error` - Error types shared by the service and HTTP layer
//! - `intake` - Submission validation, deduplication and statistics
//! - `roster` - The fixed employee roster
//! - `server` - axum routes, static assets and error responses
//! - `storage` - Feedback records and the submission ledger on disk
pub mod auth;
pub mod config;
pub mod error;
pub mod intake;
pub mod roster;
pub mod server;
pub mod storage;

pub use error::{ErrorKind, FeedbackError, Result};
