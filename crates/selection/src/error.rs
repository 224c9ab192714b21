use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Result type used by the selection crate.
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Errors produced by configuration loading and backend requests.
///
/// The selection controller itself never fails; every identifier is passed
/// through to the playback surface as-is.
#[derive(Debug)]
pub enum SelectionError {
    ConfigIo {
        context: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    ConfigSerialization {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidConfig {
        reason: String,
    },
    InvalidUpload {
        reason: String,
    },
    UploadIo {
        path: PathBuf,
        source: std::io::Error,
    },
    Transport(reqwest::Error),
    UploadRejected {
        status: u16,
        message: String,
    },
    UploadResponse {
        status: u16,
        source: serde_json::Error,
    },
    ListRejected {
        status: u16,
        message: String,
    },
    ListResponse {
        status: u16,
        source: serde_json::Error,
    },
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigIo {
                context,
                path,
                source,
            } => write!(f, "{context}: {} ({source})", path.display()),
            Self::ConfigSerialization { path, source } => {
                write!(
                    f,
                    "config serialization/deserialization failed at {} ({source})",
                    path.display()
                )
            }
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
            Self::InvalidUpload { reason } => write!(f, "invalid upload request: {reason}"),
            Self::UploadIo { path, source } => {
                write!(f, "failed to read upload file {} ({source})", path.display())
            }
            Self::Transport(err) => write!(f, "backend request failed: {err}"),
            Self::UploadRejected { status, message } => {
                write!(f, "upload rejected with status {status}: {message}")
            }
            Self::UploadResponse { status, source } => {
                write!(
                    f,
                    "upload response with status {status} could not be decoded ({source})"
                )
            }
            Self::ListRejected { status, message } => {
                write!(f, "video listing rejected with status {status}: {message}")
            }
            Self::ListResponse { status, source } => {
                write!(
                    f,
                    "video listing with status {status} could not be decoded ({source})"
                )
            }
        }
    }
}

impl std::error::Error for SelectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigIo { source, .. } => Some(source),
            Self::ConfigSerialization { source, .. } => Some(source),
            Self::UploadIo { source, .. } => Some(source),
            Self::Transport(err) => Some(err),
            Self::UploadResponse { source, .. } => Some(source),
            Self::ListResponse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SelectionError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}
