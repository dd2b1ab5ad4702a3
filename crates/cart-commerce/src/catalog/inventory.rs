//! Stock ledger records.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Available quantity for a product, as reported by the stock ledger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product the count applies to.
    pub id: ProductId,
    /// Units currently purchasable. May be zero or negative.
    pub amount: i64,
}

impl Stock {
    /// Create a stock record.
    pub fn new(id: impl Into<ProductId>, amount: i64) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }

    /// Check if at least one unit is available.
    pub fn is_available(&self) -> bool {
        self.amount > 0
    }

    /// Check if one more unit can be added on top of `held` units.
    pub fn allows_increment(&self, held: u32) -> bool {
        self.amount > i64::from(held)
    }

    /// Check if a specific quantity can be fulfilled.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.amount >= quantity
    }
}
