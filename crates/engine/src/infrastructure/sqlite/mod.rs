//! SQLite implementations of the world and narration ports.

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

mod chat_sink;
mod schema;
mod world_repo;

pub use chat_sink::{SqliteChatSink, GM_USER_ID, GM_USER_NAME};
pub use schema::ensure_schema;
pub use world_repo::SqliteWorldRepo;

/// Open (creating if needed) the SQLite database at `db_path`.
pub async fn connect(db_path: &str) -> Result<SqlitePool, RepoError> {
    SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .map_err(|e| RepoError::database("connect", e))
}
