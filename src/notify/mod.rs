//! User-visible notifications.
//!
//! The core never renders anything; successes and failures are reported
//! through this trait and the embedding view decides how to show them.

/// Notification sink implemented by the presentation layer.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Routes notifications into the log stream; useful headless.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!(text = message, "user notification");
    }
    fn error(&self, message: &str) {
        tracing::warn!(text = message, "user notification");
    }
}
