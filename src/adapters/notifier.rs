use crate::ports::notifier::{Notification, Notifier};

/// Logs notifications instead of delivering them. Real delivery channels
/// (mail, push) plug in behind the same port.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            recipient = notification.recipient.0,
            kind = ?notification.kind,
            "notification: {}",
            notification.message
        );
    }
}
