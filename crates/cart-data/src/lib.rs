//! Storefront API adapters for the cart.
//!
//! - [`ApiClient`] talks to the storefront's HTTP API
//!   (`GET {base}/products/{id}`, `GET {base}/stock/{id}`).
//! - [`InMemoryStorefront`] serves the same data from memory, optionally
//!   seeded from a `db.json` fixture.
//!
//! Both implement `ProductCatalog` and `StockLedger`.
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_data::ApiClient;
//!
//! let api = ApiClient::new("http://localhost:3333")?;
//! let mut store = CartStore::open(api.clone(), api, slot);
//! ```

mod client;
mod error;
mod memory;

pub use client::ApiClient;
pub use error::FetchError;
pub use memory::InMemoryStorefront;
