//! Observability for the cart.
//!
//! This crate provides:
//! - `init_tracing` - installs a `tracing` subscriber from `LoggingConfig`
//! - `TracingNotifier` - a `Notifier` that writes notices to the log

mod logging;
mod notifier;

pub use logging::*;
pub use notifier::TracingNotifier;

// Re-export the config types for convenience
pub use cart_commerce::config::{LogFormat, LoggingConfig};
