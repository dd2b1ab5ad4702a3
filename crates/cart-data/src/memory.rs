//! In-memory storefront for development and tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use cart_commerce::catalog::{Product, Stock};
use cart_commerce::ports::{ProductCatalog, StockLedger};
use cart_commerce::{ProductId, UpstreamError};
use serde::Deserialize;

#[derive(Debug, Default)]
struct Inventory {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, i64>,
}

/// Product catalog and stock ledger held in memory.
///
/// Clones share the same data, so a test can keep one handle to adjust stock
/// while the cart store owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorefront {
    inner: Arc<Mutex<Inventory>>,
}

/// Layout of a `db.json` fixture: `{ "products": [...], "stock": [...] }`.
#[derive(Debug, Deserialize)]
struct StorefrontDb {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    stock: Vec<Stock>,
}

impl InMemoryStorefront {
    /// Create an empty storefront.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `db.json` style fixture.
    pub fn from_json(db: &str) -> Result<Self, serde_json::Error> {
        let db: StorefrontDb = serde_json::from_str(db)?;
        let storefront = Self::new();
        {
            let mut inner = storefront.lock_inner();
            for product in db.products {
                inner.products.insert(product.id, product);
            }
            for stock in db.stock {
                inner.stock.insert(stock.id, stock.amount);
            }
        }
        Ok(storefront)
    }

    /// Add or replace a product.
    pub fn insert_product(&self, product: Product) {
        self.lock_inner().products.insert(product.id, product);
    }

    /// Set the stock count for a product.
    pub fn set_stock(&self, id: impl Into<ProductId>, amount: i64) {
        self.lock_inner().stock.insert(id.into(), amount);
    }

    /// Forget a product and its stock.
    pub fn remove(&self, id: impl Into<ProductId>) {
        let id = id.into();
        let mut inner = self.lock_inner();
        inner.products.remove(&id);
        inner.stock.remove(&id);
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inventory> {
        // A panic while holding the lock cannot leave the maps half-updated.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ProductCatalog for InMemoryStorefront {
    async fn fetch_product(&self, id: ProductId) -> Result<Product, UpstreamError> {
        self.lock_inner()
            .products
            .get(&id)
            .cloned()
            .ok_or(UpstreamError::NotFound(id))
    }
}

#[async_trait]
impl StockLedger for InMemoryStorefront {
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, UpstreamError> {
        self.lock_inner()
            .stock
            .get(&id)
            .map(|&amount| Stock::new(id, amount))
            .ok_or(UpstreamError::NotFound(id))
    }
}
