//! Unified error types for afflink.
//!
//! Every variant renders as `CODE: message` so callers can show the message
//! and branch on [`Error::code`].

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for afflink.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Blank or whitespace-only input.
    #[error("EMPTY_INPUT: {0}")]
    EmptyInput(String),

    /// Input is not recognized as a marketplace URL.
    #[error("NOT_AMAZON_URL: {0}")]
    NotAmazonUrl(String),

    /// Input failed URL syntax parsing.
    #[error("INVALID_URL_FORMAT: {0}")]
    InvalidUrlFormat(String),

    /// Removing the existing affiliate marker failed.
    #[error("URL_PROCESSING_FAILED: {0}")]
    UrlProcessingFailed(String),

    /// Injecting the canonical affiliate marker failed.
    #[error("TAG_INJECTION_FAILED: {0}")]
    TagInjectionFailed(String),

    /// Short-link probe completed with a non-success status.
    #[error("RESOLUTION_FAILED: {0}")]
    ResolutionFailed(String),

    /// Short-link probe could not be issued at all.
    #[error("RESOLUTION_BLOCKED: {0}")]
    ResolutionBlocked(String),

    /// A shell manifest resource could not be cached during install.
    #[error("INSTALL_FAILED: {0}")]
    InstallFailed(String),

    /// Lifecycle phase requested out of order.
    #[error("LIFECYCLE_ERROR: {0}")]
    Lifecycle(String),

    /// Live network fetch failed.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Invalid input parameters.
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Invalid request key format.
    #[error("CACHE_ERROR: invalid hash format")]
    InvalidHash,

    /// Write targeted a generation that does not exist (or was deleted).
    #[error("CACHE_ERROR: unknown generation: {0}")]
    UnknownGeneration(String),

    /// Stored entry could not be decoded.
    #[error("CACHE_ERROR: corrupt entry: {0}")]
    CorruptEntry(String),
}

impl Error {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Error::EmptyInput(_) => "EMPTY_INPUT",
            Error::NotAmazonUrl(_) => "NOT_AMAZON_URL",
            Error::InvalidUrlFormat(_) => "INVALID_URL_FORMAT",
            Error::UrlProcessingFailed(_) => "URL_PROCESSING_FAILED",
            Error::TagInjectionFailed(_) => "TAG_INJECTION_FAILED",
            Error::ResolutionFailed(_) => "RESOLUTION_FAILED",
            Error::ResolutionBlocked(_) => "RESOLUTION_BLOCKED",
            Error::InstallFailed(_) => "INSTALL_FAILED",
            Error::Lifecycle(_) => "LIFECYCLE_ERROR",
            Error::HttpError(_) => "HTTP_ERROR",
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::Database(_)
            | Error::MigrationFailed(_)
            | Error::InvalidHash
            | Error::UnknownGeneration(_)
            | Error::CorruptEntry(_) => "CACHE_ERROR",
        }
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) | Error::EmptyInput(_) => -32602,
            Error::NotAmazonUrl(_) => -32001,
            Error::InvalidUrlFormat(_) => -32003,
            Error::UrlProcessingFailed(_) | Error::TagInjectionFailed(_) => -32000,
            Error::ResolutionFailed(_) => -32004,
            Error::ResolutionBlocked(_) => -32005,
            Error::HttpError(_) => -32008,
            Error::InstallFailed(_) | Error::Lifecycle(_) => -32011,
            Error::Database(_)
            | Error::MigrationFailed(_)
            | Error::InvalidHash
            | Error::UnknownGeneration(_)
            | Error::CorruptEntry(_) => -32002,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}
