use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A non-200 answer from the dashboard service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// Numeric status code, e.g. `404`.
    pub code: u16,
    /// Status line, e.g. `404 Not Found`.
    pub status: String,
    /// Message supplied by the service in a JSON `message` field, if any.
    pub message: Option<String>,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => f.write_str(message),
            _ => f.write_str(&self.status),
        }
    }
}

#[derive(Error, Debug)]
pub enum GrafctlError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Http(HttpError),

    #[error("{0}")]
    NotFound(HttpError),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),

    #[error("Unknown command '{0}'. 'help' for usage.")]
    UnknownCommand(String),

    #[error("{0}")]
    Unsupported(String),

    #[error("dashboard {slug}: {source}")]
    Dashboard {
        slug: String,
        #[source]
        source: Box<GrafctlError>,
    },

    #[error("file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<GrafctlError>,
    },
}

impl GrafctlError {
    /// Builds the error for a non-200 response, keeping 404 distinct so the
    /// push path can recognise a stale dashboard id.
    pub fn from_status(code: u16, status: String, message: Option<String>) -> Self {
        let err = HttpError {
            code,
            status,
            message,
        };
        if code == 404 {
            GrafctlError::NotFound(err)
        } else {
            GrafctlError::Http(err)
        }
    }

    /// True when the service answered 404, looking through context wrappers.
    pub fn is_not_found(&self) -> bool {
        match self {
            GrafctlError::NotFound(_) => true,
            GrafctlError::Dashboard { source, .. } | GrafctlError::File { source, .. } => {
                source.is_not_found()
            }
            _ => false,
        }
    }

    /// HTTP status code carried by the error, if it came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GrafctlError::Http(err) | GrafctlError::NotFound(err) => Some(err.code),
            GrafctlError::Dashboard { source, .. } | GrafctlError::File { source, .. } => {
                source.status_code()
            }
            _ => None,
        }
    }

    pub fn for_dashboard(self, slug: impl Into<String>) -> Self {
        GrafctlError::Dashboard {
            slug: slug.into(),
            source: Box::new(self),
        }
    }

    pub fn for_file(self, path: impl Into<PathBuf>) -> Self {
        GrafctlError::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, GrafctlError>;
