//! SDK Error Types
//!
//! One variant per failure cause, grouped into configuration and I/O kinds.

use std::path::PathBuf;

/// Broad classification of an [`SdkError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The call was rejected before any I/O happened
    Config,
    /// Parsing, file, network or body-read failure
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("router cannot be empty")]
    EmptyRouter,

    #[error("unknown method: {0} (expected download/pull/post/put)")]
    UnknownMethod(String),

    #[error("incorrect params: uid is required for download")]
    MissingUid,

    #[error("file path is empty")]
    EmptyFilePath,

    #[error("url parse failed for {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to read upload file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failed to read response body after {} bytes: {source}", .partial.len())]
    BodyRead {
        partial: Vec<u8>,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to enumerate network interfaces: {0}")]
    Interfaces(String),
}

impl SdkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SdkError::EmptyRouter
            | SdkError::UnknownMethod(_)
            | SdkError::MissingUid
            | SdkError::EmptyFilePath => ErrorKind::Config,
            _ => ErrorKind::Io,
        }
    }

    /// True when the call was rejected without touching the network
    pub fn is_config_error(&self) -> bool {
        self.kind() == ErrorKind::Config
    }

    /// Bytes received before a body read failed, if any were
    pub fn partial_body(&self) -> Option<&[u8]> {
        match self {
            SdkError::BodyRead { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
