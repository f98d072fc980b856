//! Error types for schema-sync

use std::path::PathBuf;

use thiserror::Error;

/// Result type for schema-sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors raised by the download and register workflows
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("{0} is required")]
    MissingFlag(&'static str),

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create dir {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read manifest: {0}")]
    Manifest(#[from] csv::Error),

    #[error("manifest {0} has no header row")]
    EmptyManifest(PathBuf),

    #[error("failed to send request to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("got response with status: {}{}", .status, format_body(.body))]
    Status { status: reqwest::StatusCode, body: Option<String> },

    #[error("failed to download schema for subject {subject}, version {version}: {source}")]
    Download {
        subject: String,
        version: String,
        #[source]
        source: Box<SyncError>,
    },

    #[error("failed to upload the file for subject {subject} (version {version}): {source}")]
    Upload {
        subject: String,
        version: String,
        #[source]
        source: Box<SyncError>,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

fn format_body(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(". Body: {}", body),
        None => String::new(),
    }
}

impl SyncError {
    /// True when the failure came from the registry rather than local I/O
    pub fn is_remote(&self) -> bool {
        match self {
            SyncError::Request { .. } | SyncError::Body { .. } | SyncError::Status { .. } => true,
            SyncError::Download { source, .. } | SyncError::Upload { source, .. } => source.is_remote(),
            _ => false,
        }
    }
}
