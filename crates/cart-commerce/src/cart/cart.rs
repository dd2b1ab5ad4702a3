//! Cart and cart entry types.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroU32;

use crate::catalog::Product;
use crate::error::StorageError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// One product line in the cart.
///
/// Serializes as the product's fields with `amount` appended, e.g.
/// `{"id":1,"name":"…","price":179.9,"image":"…","amount":2}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    /// Product metadata, flattened into the entry.
    #[serde(flatten)]
    pub product: Product,
    /// Units held. Never zero.
    pub amount: NonZeroU32,
}

impl CartEntry {
    /// Create an entry holding a single unit.
    ///
    /// Passthrough fields named like cart-owned keys are dropped, so the
    /// entry's own `amount` is the only one in the snapshot.
    pub fn new(mut product: Product) -> Self {
        product.strip_reserved();
        Self {
            product,
            amount: NonZeroU32::MIN,
        }
    }

    /// Product this entry is keyed by.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Units held as a plain integer.
    pub fn amount(&self) -> u32 {
        self.amount.get()
    }
}

/// Ordered list of cart entries.
///
/// Entries keep the order in which products were first added, and there is
/// at most one entry per product id.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from entries, rejecting duplicate product ids.
    pub fn from_entries(entries: Vec<CartEntry>) -> Result<Self, StorageError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id()) {
                return Err(StorageError::Corrupt(format!(
                    "duplicate entry for product {}",
                    entry.id()
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Decode a persisted snapshot.
    pub fn from_snapshot(snapshot: &str) -> Result<Self, StorageError> {
        let entries: Vec<CartEntry> = serde_json::from_str(snapshot)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        Self::from_entries(entries)
    }

    /// Encode the cart as a JSON snapshot.
    pub fn to_snapshot(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Get an entry by product id.
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Units held for a product, zero when absent.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, CartEntry::amount)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all amounts.
    pub fn total_units(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.amount())).sum()
    }

    /// Product id to amount lookup, as used by product listings.
    pub fn amounts(&self) -> HashMap<ProductId, u32> {
        self.entries.iter().map(|e| (e.id(), e.amount())).collect()
    }

    /// Append a product with a single unit.
    ///
    /// Returns `false` and leaves the cart alone if the product is already present.
    pub fn push(&mut self, product: Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.entries.push(CartEntry::new(product));
        true
    }

    /// Add one unit to an existing entry, returning the new amount.
    pub fn increment(&mut self, id: ProductId) -> Option<NonZeroU32> {
        let entry = self.entries.iter_mut().find(|e| e.id() == id)?;
        entry.amount = entry.amount.checked_add(1)?;
        Some(entry.amount)
    }

    /// Set an existing entry's amount exactly.
    pub fn set_amount(&mut self, id: ProductId, amount: NonZeroU32) -> bool {
        match self.entries.iter_mut().find(|e| e.id() == id) {
            Some(entry) => {
                entry.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Remove an entry, keeping the order of the others.
    pub fn remove(&mut self, id: ProductId) -> Option<CartEntry> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        Some(self.entries.remove(index))
    }
}
