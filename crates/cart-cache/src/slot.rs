//! The cart snapshot slot: one namespaced key in a key-value backend.

use cart_commerce::config::{StorageConfig, DEFAULT_STORAGE_KEY};
use cart_commerce::ports::PersistenceChannel;
use cart_commerce::StorageError;
use tracing::debug;

use crate::kv::{FileStore, KvBackend, MemoryStore};
use crate::CacheError;

/// Persistence channel that stores the cart snapshot under a fixed key.
#[derive(Debug)]
pub struct CartSlot<B> {
    backend: B,
    key: String,
}

impl<B: KvBackend> CartSlot<B> {
    /// Bind `key` in `backend`.
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Bind the default cart key in `backend`.
    pub fn with_default_key(backend: B) -> Self {
        Self::new(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Drop the stored snapshot.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.backend.delete(&self.key)
    }
}

impl CartSlot<Box<dyn KvBackend>> {
    /// Open the slot described by `config`: file-backed when a path is set,
    /// in-memory otherwise.
    pub fn from_config(config: &StorageConfig) -> Result<Self, CacheError> {
        let backend: Box<dyn KvBackend> = match &config.path {
            Some(path) => Box::new(FileStore::open(path)?),
            None => Box::new(MemoryStore::new()),
        };
        Ok(Self::new(backend, config.key.clone()))
    }
}

impl<B: KvBackend> PersistenceChannel for CartSlot<B> {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.backend.get(&self.key)?)
    }

    fn save(&self, snapshot: &str) -> Result<(), StorageError> {
        self.backend.set(&self.key, snapshot)?;
        debug!(key = %self.key, bytes = snapshot.len(), "cart snapshot saved");
        Ok(())
    }
}
