//! Error types and the error mapper.
//!
//! Two families live here:
//!
//! - [`Error`]: infrastructure failures: binding a port, reading
//!   configuration. These never reach a client.
//! - [`ReviewError`]: failures of a review operation. Handlers return them
//!   as plain values; the [`IntoResponse`] impl below is the only place they
//!   turn into an HTTP status and body.

use std::net::AddrParseError;

use http::StatusCode;
use thiserror::Error;
use tracing::{error, warn};

use crate::repository::StoreError;
use crate::response::{IntoResponse, Response};

/// The error type returned by the server's fallible startup operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address `{addr}`: {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: AddrParseError,
    },
}

/// Failure of a single review operation.
///
/// The `Display` text of every variant is exactly what the client receives as
/// the plain-text response body.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// One or more constraint violations, sorted and comma-joined.
    #[error("{0}")]
    Validation(String),

    /// The referenced review does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The store rejected or failed the call.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Request input that could not be decoded: a bad path parameter or a
    /// body that is not a review document.
    #[error("{0}")]
    Malformed(String),
}

impl ReviewError {
    pub fn not_found() -> Self {
        Self::NotFound("review not found".to_owned())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// HTTP status for this failure kind.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Malformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }
        Response::text(message).with_status(status)
    }
}
