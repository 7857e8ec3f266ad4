//! Table bootstrap for the world database.

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS universes (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS places (
        id INTEGER PRIMARY KEY,
        universe_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        region_id INTEGER
    )
    "#,
    "CREATE INDEX IF NOT EXISTS places_universe ON places (universe_id)",
    r#"
    CREATE TABLE IF NOT EXISTS exits (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        place_id INTEGER NOT NULL,
        direction TEXT NOT NULL,
        destination_id INTEGER NOT NULL,
        mode TEXT NOT NULL DEFAULT 'normal'
    )
    "#,
    "CREATE INDEX IF NOT EXISTS exits_place ON exits (place_id)",
    r#"
    CREATE TABLE IF NOT EXISTS characters (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        location_id INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vehicle_instances (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        location_id INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS mob_instances (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        location_id INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS chat_messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        universe_id INTEGER,
        user_id INTEGER NOT NULL,
        user_name TEXT NOT NULL,
        place_id INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        text TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS content_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        universe_id INTEGER,
        author_id INTEGER NOT NULL,
        kind TEXT NOT NULL,
        place_id INTEGER NOT NULL,
        text TEXT NOT NULL,
        chat_message_id INTEGER NOT NULL
    )
    "#,
];

/// Create any missing tables and indexes. Safe to run on every start.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }
    tracing::debug!(statements = STATEMENTS.len(), "World schema ensured");
    Ok(())
}
