use thiserror::Error;

use crate::wire::InvalidField;

/// Client-side failures. Each carries the operation that failed, rendered as
/// a `failed to <operation>` prefix.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with something other than 200/201.
    #[error("failed to {operation}: {detail}")]
    Api {
        operation: &'static str,
        status: u16,
        detail: String,
    },
    #[error("failed to {operation}: {source}")]
    InvalidField {
        operation: &'static str,
        #[source]
        source: InvalidField,
    },
}

impl ClientError {
    /// HTTP status reported by the server, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub(crate) fn transport(operation: &'static str) -> impl FnOnce(reqwest::Error) -> ClientError {
    move |source| ClientError::Transport { operation, source }
}

pub(crate) fn invalid(operation: &'static str) -> impl FnOnce(InvalidField) -> ClientError {
    move |source| ClientError::InvalidField { operation, source }
}
