//! Collaborators the cart store depends on.
//!
//! The store owns none of these concerns; it is handed implementations at
//! construction time. Adapters live in `cart-data` (catalog, ledger) and
//! `cart-cache` (persistence).

use std::sync::Arc;

use async_trait::async_trait;

use crate::cart::Notice;
use crate::catalog::{Product, Stock};
use crate::error::{StorageError, UpstreamError};
use crate::ids::ProductId;

/// Source of product metadata.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch a product by id.
    async fn fetch_product(&self, id: ProductId) -> Result<Product, UpstreamError>;
}

/// Source of truth for purchasable quantities.
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Fetch the current stock count for a product.
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, UpstreamError>;
}

/// Durable storage for the serialized cart.
///
/// Writes are synchronous: a successful `save` means the snapshot is stored.
pub trait PersistenceChannel {
    /// Read the stored snapshot, `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &str) -> Result<(), StorageError>;
}

/// Surface that displays notices to the shopper.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    async fn fetch_product(&self, id: ProductId) -> Result<Product, UpstreamError> {
        (**self).fetch_product(id).await
    }
}

#[async_trait]
impl<T: StockLedger + ?Sized> StockLedger for Arc<T> {
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, UpstreamError> {
        (**self).fetch_stock(id).await
    }
}

impl<T: PersistenceChannel + ?Sized> PersistenceChannel for Arc<T> {
    fn load(&self) -> Result<Option<String>, StorageError> {
        (**self).load()
    }

    fn save(&self, snapshot: &str) -> Result<(), StorageError> {
        (**self).save(snapshot)
    }
}
