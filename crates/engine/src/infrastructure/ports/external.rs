//! Outbound notification port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rpgworld_domain::PlaceId;
use serde::{Deserialize, Serialize};

use super::error::NotifyError;

/// What a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Departure,
    Arrival,
}

/// A narration line addressed to everyone in a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub place_id: PlaceId,
    pub kind: NotificationKind,
    pub text: String,
    pub emitted_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}
