//! Cart error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Reasons a cart operation can be rejected.
///
/// None of these escape a [`CartStore`](crate::cart::CartStore) operation as
/// an `Err`; they are carried inside [`Outcome::Rejected`](crate::cart::Outcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Requested amount exceeds what the stock ledger reports.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Requested amount is zero or negative.
    #[error("Invalid amount for {product_id}: {amount}")]
    InvalidAmount { product_id: ProductId, amount: i64 },

    /// Catalog or stock ledger lookup failed.
    #[error("Upstream lookup failed: {0}")]
    Upstream(#[from] UpstreamError),

    /// Snapshot could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// Short machine-readable kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            CartError::NotInCart(_) => "not_in_cart",
            CartError::InsufficientStock { .. } => "insufficient_stock",
            CartError::InvalidAmount { .. } => "invalid_amount",
            CartError::Upstream(_) => "upstream",
            CartError::Storage(_) => "storage",
        }
    }
}

/// Errors returned by product catalog and stock ledger implementations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The id is unknown upstream.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Upstream answered with an error status.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// The request never completed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Errors returned by persistence channels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backend read or write failed.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Snapshot could not be encoded.
    #[error("Snapshot encoding error: {0}")]
    Encode(String),

    /// Stored snapshot is unreadable or breaks cart invariants.
    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Encode(e.to_string())
    }
}
