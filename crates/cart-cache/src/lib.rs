//! Key-value storage for cart snapshots.
//!
//! Provides local-storage style backends and the [`CartSlot`] persistence
//! channel that binds the cart snapshot to one namespaced key.
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_cache::{CartSlot, FileStore};
//!
//! let store = FileStore::open("data/storage.json")?;
//! let slot = CartSlot::with_default_key(store);
//!
//! // Hand the slot to the cart store
//! let mut cart = CartStore::open(catalog, ledger, slot);
//! ```

mod error;
mod kv;
mod slot;

pub use error::CacheError;
pub use kv::{FileStore, KvBackend, MemoryStore};
pub use slot::CartSlot;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CacheError, CartSlot, FileStore, KvBackend, MemoryStore};
}
