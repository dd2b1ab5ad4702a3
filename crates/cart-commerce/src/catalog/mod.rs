//! Product catalog module.
//!
//! Contains the product metadata and stock records returned by the
//! storefront API.

mod inventory;
mod product;

pub use inventory::Stock;
pub use product::Product;
