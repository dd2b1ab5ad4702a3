//! HTTP client error types.

use cart_commerce::{ProductId, UpstreamError};
use thiserror::Error;

/// Errors that can occur when calling the storefront API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to build the client or send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The API has no record for this product.
    #[error("Not found: product {0}")]
    NotFound(ProductId),

    /// HTTP error response.
    #[error("HTTP {status} for {url}")]
    HttpError { status: u16, url: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

impl From<FetchError> for UpstreamError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::NotFound(id) => UpstreamError::NotFound(id),
            FetchError::HttpError { status, url } => UpstreamError::Http { status, url },
            FetchError::ParseError(msg) => UpstreamError::Decode(msg),
            other => UpstreamError::Transport(other.to_string()),
        }
    }
}
