use serde::{Deserialize, Serialize};

use crate::domain::account::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    AccommodationRating,
    HostRating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: AccountId,
    pub kind: NotificationKind,
    pub message: String,
}

/// Fire-and-forget delivery boundary. Delivery failures are the adapter's
/// problem; the engine never waits on them.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
