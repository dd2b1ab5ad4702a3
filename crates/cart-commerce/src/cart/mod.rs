//! Shopping cart module.
//!
//! Contains the cart entry list, the store that mutates it, and the
//! outcome values reported back to the UI.

mod cart;
mod outcome;
mod store;

pub use cart::{Cart, CartEntry};
pub use outcome::{Notice, Operation, Outcome, OUT_OF_STOCK_MESSAGE};
pub use store::CartStore;
