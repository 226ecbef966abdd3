//! Error types shared by the token manager, the catalog client and the
//! browse service.
//!
//! Non-success responses from the token endpoint and from catalog endpoints
//! are kept apart so callers can tell a credentials problem from a failed
//! catalog fetch. Both carry the raw response body exactly as the provider
//! sent it. Neither is retried anywhere in the crate.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the catalog provider.
#[derive(Debug, Error)]
pub enum Error {
    /// The token endpoint answered with something other than `200 OK`.
    #[error("could not retrieve access token: {body}")]
    Auth { body: String },

    /// A catalog endpoint answered with something other than `200 OK`.
    #[error("error fetching data ({status}): {body}")]
    Request { status: StatusCode, body: String },

    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A `200 OK` body that does not have the expected shape.
    #[error("unexpected payload: {0}")]
    Payload(String),

    /// Required configuration is missing from the environment.
    #[error("configuration error: {0}")]
    Config(String),

    /// The token cache backend failed to read or write.
    #[error("token cache error: {0}")]
    Cache(String),
}

impl Error {
    /// Raw response body for errors that came from a provider response.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Auth { body } | Error::Request { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Payload(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Res<T> = std::result::Result<T, Error>;
