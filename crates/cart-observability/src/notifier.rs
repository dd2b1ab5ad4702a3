//! Notices routed to the log.

use cart_commerce::cart::Notice;
use cart_commerce::ports::Notifier;

/// Writes every notice as a `warn` event.
///
/// Useful where no UI surface exists, such as background sync jobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        tracing::warn!(
            operation = notice.operation.as_str(),
            message = notice.message,
            "cart notice"
        );
    }
}
