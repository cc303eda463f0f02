//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("exam not found")]
    NotFound,
    #[error("question source unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted by the HTTP analytics sink.
///
/// The exam workflow swallows these after logging; they never reach the
/// session state machine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalyticsError {
    #[error("analytics sink is not configured")]
    Disabled,
    #[error("analytics request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while starting an exam session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Source(#[from] SourceError),
}
