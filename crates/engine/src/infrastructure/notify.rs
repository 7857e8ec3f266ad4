//! Log-only narration delivery.

use async_trait::async_trait;

use crate::infrastructure::ports::{Notification, NotificationSink, NotifyError};

/// Writes narration to the tracing output instead of a chat channel.
pub struct TracingNotificationSink;

impl TracingNotificationSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingNotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        tracing::info!(
            place_id = %notification.place_id,
            kind = ?notification.kind,
            emitted_at = %notification.emitted_at.to_rfc3339(),
            "{}",
            notification.text
        );
        Ok(())
    }
}
