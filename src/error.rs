use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Invalid version identifier {id:?}: {reason}")]
    Parse { id: String, reason: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Expected 200 OK, got {status} {status_text} with message {body}")]
    Upstream {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid source configuration: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    Request(#[from] serde_json::Error),

    #[error("Operation not supported by this resource: {0}")]
    Unsupported(&'static str),
}

impl ResourceError {
    pub(crate) fn parse(id: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}
