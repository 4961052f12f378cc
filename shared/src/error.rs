//! Error taxonomy shared by every layer.
//!
//! Nothing in the pipeline retries or recovers: each variant describes why a
//! run stopped, and the caller decides only how to report it.

use std::path::PathBuf;
use thiserror::Error;

/// Why a dataset payload was rejected.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("dataset is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("dataset must be a JSON array of records, found {found}")]
    NotAnArray { found: &'static str },

    #[error("record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

/// Errors raised while talking to the vector store, the chat provider or the dataset source.
#[derive(Error, Debug)]
pub enum RagError {
    /// Missing or rejected credentials, unusable endpoints, bad local settings.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The remote service answered with something other than success.
    #[error("{service} returned {status}: {message}")]
    Upstream {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// The request never produced a response.
    #[error("network error talking to {service}: {message}")]
    Network {
        service: &'static str,
        message: String,
    },

    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RagError {
    /// Maps a non-success HTTP status to the taxonomy.
    ///
    /// 401/403 mean the credentials are missing or wrong, which is a
    /// configuration problem surfaced by the remote side.
    pub fn from_status(service: &'static str, status: u16, body: String) -> Self {
        match status {
            401 | 403 => RagError::Configuration(format!(
                "{service} rejected the credentials ({status}): {body}"
            )),
            _ => RagError::Upstream {
                service,
                status,
                message: body,
            },
        }
    }

    /// An upstream body that could not be understood. Status 0 marks "no status".
    pub fn malformed(service: &'static str, message: impl Into<String>) -> Self {
        RagError::Upstream {
            service,
            status: 0,
            message: message.into(),
        }
    }
}
