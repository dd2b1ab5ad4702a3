//! Shopping cart state for a storefront client.
//!
//! This crate tracks which products a shopper has selected and how many of
//! each, validates quantity changes against a stock ledger, and writes every
//! successful change to durable storage:
//!
//! - **Catalog**: `Product` metadata and `Stock` counts
//! - **Cart**: the ordered `Cart` of `CartEntry` lines and the `CartStore`
//!   that mutates it
//! - **Ports**: the `ProductCatalog`, `StockLedger`, `PersistenceChannel` and
//!   `Notifier` collaborators the store is built from
//! - **Config**: `CartConfig` for wiring adapters
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_commerce::prelude::*;
//!
//! let mut store = CartStore::open(api.clone(), api, slot);
//!
//! store.add(ProductId::new(1)).await;
//! let outcome = store.set_amount(ProductId::new(1), 3).await;
//! if let Some(notice) = outcome.notice() {
//!     eprintln!("{}", notice.message);
//! }
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod ports;

pub mod cart;
pub mod catalog;

pub use error::{CartError, StorageError, UpstreamError};
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{CartConfig, LogFormat};
    pub use crate::error::{CartError, StorageError, UpstreamError};
    pub use crate::ids::ProductId;
    pub use crate::ports::{Notifier, PersistenceChannel, ProductCatalog, StockLedger};

    // Catalog
    pub use crate::catalog::{Product, Stock};

    // Cart
    pub use crate::cart::{Cart, CartEntry, CartStore, Notice, Operation, Outcome};
}
