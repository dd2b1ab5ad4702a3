//! Operation outcomes and user-facing notices.

use crate::error::CartError;
use serde::Serialize;

/// Message shown whenever a requested quantity is above the stock count.
pub const OUT_OF_STOCK_MESSAGE: &str = "Requested quantity is out of stock";

/// The cart operation a notice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Adding a unit of a product.
    Add,
    /// Removing a product line.
    Remove,
    /// Setting a product line's amount.
    UpdateAmount,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Remove => "remove",
            Operation::UpdateAmount => "update_amount",
        }
    }

    /// Generic failure message for this operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Add => "Failed to add product",
            Operation::Remove => "Failed to remove product",
            Operation::UpdateAmount => "Failed to update product quantity",
        }
    }
}

/// A user-facing message produced when an operation is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Operation that produced the notice.
    pub operation: Operation,
    /// Text to display.
    pub message: &'static str,
}

impl Notice {
    /// Build the notice shown for `error` during `operation`.
    pub fn for_error(operation: Operation, error: &CartError) -> Self {
        let message = match error {
            CartError::InsufficientStock { .. } => OUT_OF_STOCK_MESSAGE,
            _ => operation.failure_message(),
        };
        Self { operation, message }
    }
}

/// Result of a cart operation.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The cart changed and the new snapshot was written.
    Applied,
    /// Nothing happened and nothing is reported.
    Unchanged,
    /// The operation was refused; the cart is untouched.
    Rejected { error: CartError, notice: Notice },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected { .. })
    }

    /// The rejection reason, if any.
    pub fn error(&self) -> Option<&CartError> {
        match self {
            Outcome::Rejected { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The notice to display, if any.
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Outcome::Rejected { notice, .. } => Some(notice),
            _ => None,
        }
    }
}
