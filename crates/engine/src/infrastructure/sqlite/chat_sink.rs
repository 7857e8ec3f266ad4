//! Narration delivered as Game Master chat messages.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{Notification, NotificationSink, NotifyError};

/// Chat user id reserved for the Game Master.
pub const GM_USER_ID: i64 = 2_147_483_647;
pub const GM_USER_NAME: &str = "Game Master (GM)";

const MOVEMENT_LOG_KIND: &str = "Movement";

/// Posts each notification into the place's chat channel, optionally mirroring
/// it into the public content log.
pub struct SqliteChatSink {
    pool: SqlitePool,
    public_logs: bool,
}

impl SqliteChatSink {
    pub fn new(pool: SqlitePool, public_logs: bool) -> Self {
        Self { pool, public_logs }
    }
}

#[async_trait]
impl NotificationSink for SqliteChatSink {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        let place_id = notification.place_id.get();

        let universe_id: Option<i64> =
            sqlx::query("SELECT universe_id FROM places WHERE id = ?")
                .bind(place_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(NotifyError::delivery)?
                .map(|row| row.try_get::<i64, _>("universe_id"))
                .transpose()
                .map_err(NotifyError::delivery)?;

        let universe_id = match universe_id {
            Some(id) => id,
            None => return Err(NotifyError::UnknownPlace(place_id.to_string())),
        };

        let mut tx = self.pool.begin().await.map_err(NotifyError::delivery)?;

        let chat = sqlx::query(
            r#"
            INSERT INTO chat_messages (universe_id, user_id, user_name, place_id, created_at, text)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(universe_id)
        .bind(GM_USER_ID)
        .bind(GM_USER_NAME)
        .bind(place_id)
        .bind(notification.emitted_at.to_rfc3339())
        .bind(&notification.text)
        .execute(&mut *tx)
        .await
        .map_err(NotifyError::delivery)?;

        if self.public_logs {
            sqlx::query(
                r#"
                INSERT INTO content_log (universe_id, author_id, kind, place_id, text, chat_message_id)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(universe_id)
            .bind(GM_USER_ID)
            .bind(MOVEMENT_LOG_KIND)
            .bind(place_id)
            .bind(&notification.text)
            .bind(chat.last_insert_rowid())
            .execute(&mut *tx)
            .await
            .map_err(NotifyError::delivery)?;
        }

        tx.commit().await.map_err(NotifyError::delivery)?;
        Ok(())
    }
}
