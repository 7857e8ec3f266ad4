//! SQLite world repository.
//!
//! Places, exits and the three actor tables. Every value is bound as a
//! parameter; table names come from a closed per-kind query set.

use std::collections::HashMap;

use async_trait::async_trait;
use rpgworld_domain::{
    sort_exits, Actor, ActorId, ActorKind, Direction, Exit, ExitDirection, ExitVisibility, Place,
    PlaceId, PlaceWithExits, Universe, UniverseId,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::infrastructure::ports::{RepoError, WorldRepo};

/// Queries for one actor table.
struct ActorQueries {
    select: &'static str,
    update_location: &'static str,
}

fn actor_queries(kind: ActorKind) -> ActorQueries {
    match kind {
        ActorKind::Character => ActorQueries {
            select: "SELECT id, name, location_id FROM characters WHERE id = ?",
            update_location:
                "UPDATE characters SET location_id = ? WHERE id = ? AND location_id = ?",
        },
        ActorKind::Vehicle => ActorQueries {
            select: "SELECT id, name, location_id FROM vehicle_instances WHERE id = ?",
            update_location:
                "UPDATE vehicle_instances SET location_id = ? WHERE id = ? AND location_id = ?",
        },
        ActorKind::Mob => ActorQueries {
            select: "SELECT id, name, location_id FROM mob_instances WHERE id = ?",
            update_location:
                "UPDATE mob_instances SET location_id = ? WHERE id = ? AND location_id = ?",
        },
    }
}

// `mode` and `direction` are compared the way the domain parsers read them:
// trimmed and case-insensitive.
const NAVIGABLE_EXITS: &str = r#"
    SELECT place_id, direction, destination_id, mode FROM exits
    WHERE place_id = ?
      AND lower(trim(mode)) <> 'hidden'
      AND lower(trim(direction)) IN ('north', 'northeast', 'east', 'southeast', 'south',
                                     'southwest', 'west', 'northwest', 'up', 'down', 'in', 'out')
"#;

const FIND_EXIT: &str = r#"
    SELECT place_id, direction, destination_id, mode FROM exits
    WHERE place_id = ?
      AND lower(trim(direction)) = ?
      AND lower(trim(mode)) <> 'hidden'
    ORDER BY id
    LIMIT 1
"#;

/// Repository for places, exits and actor locations.
pub struct SqliteWorldRepo {
    pool: SqlitePool,
}

impl SqliteWorldRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn row_to_place(row: &SqliteRow) -> Result<Place, RepoError> {
        let id: i64 = row.try_get("id").map_err(|e| RepoError::database("query", e))?;
        let universe_id: i64 = row
            .try_get("universe_id")
            .map_err(|e| RepoError::database("query", e))?;
        let name: String = row.try_get("name").map_err(|e| RepoError::database("query", e))?;
        let region_id: Option<i64> = row
            .try_get("region_id")
            .map_err(|e| RepoError::database("query", e))?;

        Ok(Place {
            id: PlaceId::new(id),
            universe_id: UniverseId::new(universe_id),
            name,
            region_id: region_id.map(PlaceId::new),
        })
    }

    fn row_to_exit(row: &SqliteRow) -> Result<Exit, RepoError> {
        let place_id: i64 = row
            .try_get("place_id")
            .map_err(|e| RepoError::database("query", e))?;
        let direction: String = row
            .try_get("direction")
            .map_err(|e| RepoError::database("query", e))?;
        let destination_id: i64 = row
            .try_get("destination_id")
            .map_err(|e| RepoError::database("query", e))?;
        let mode: String = row.try_get("mode").map_err(|e| RepoError::database("query", e))?;

        let direction: ExitDirection = direction.parse().map_err(|e| {
            RepoError::serialization(format!("exit from place {}: {}", place_id, e))
        })?;
        let visibility: ExitVisibility = mode.parse().map_err(|e| {
            RepoError::serialization(format!("exit from place {}: {}", place_id, e))
        })?;

        Ok(Exit {
            place_id: PlaceId::new(place_id),
            direction,
            destination_id: PlaceId::new(destination_id),
            visibility,
        })
    }

    fn row_to_actor(row: &SqliteRow, kind: ActorKind) -> Result<Actor, RepoError> {
        let id: i64 = row.try_get("id").map_err(|e| RepoError::database("query", e))?;
        let name: String = row.try_get("name").map_err(|e| RepoError::database("query", e))?;
        let location_id: i64 = row
            .try_get("location_id")
            .map_err(|e| RepoError::database("query", e))?;

        Ok(Actor::new(
            ActorId::new(id),
            kind,
            name,
            PlaceId::new(location_id),
        ))
    }
}

#[async_trait]
impl WorldRepo for SqliteWorldRepo {
    async fn get_actor(&self, id: ActorId, kind: ActorKind) -> Result<Option<Actor>, RepoError> {
        let row = sqlx::query(actor_queries(kind).select)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_actor", e))?;

        row.map(|row| Self::row_to_actor(&row, kind)).transpose()
    }

    async fn get_actor_location(
        &self,
        id: ActorId,
        kind: ActorKind,
    ) -> Result<Option<PlaceId>, RepoError> {
        Ok(self
            .get_actor(id, kind)
            .await?
            .map(|actor| actor.current_place_id))
    }

    async fn set_actor_location(
        &self,
        id: ActorId,
        kind: ActorKind,
        expected: PlaceId,
        destination: PlaceId,
    ) -> Result<bool, RepoError> {
        let result = sqlx::query(actor_queries(kind).update_location)
            .bind(destination.get())
            .bind(id.get())
            .bind(expected.get())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("set_actor_location", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn get_place(&self, id: PlaceId) -> Result<Option<Place>, RepoError> {
        let row = sqlx::query("SELECT id, universe_id, name, region_id FROM places WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_place", e))?;

        row.map(|row| Self::row_to_place(&row)).transpose()
    }

    async fn get_universe(&self, id: UniverseId) -> Result<Option<Universe>, RepoError> {
        let row = sqlx::query("SELECT id, title FROM universes WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_universe", e))?;

        match row {
            Some(row) => {
                let title: String = row
                    .try_get("title")
                    .map_err(|e| RepoError::database("query", e))?;
                Ok(Some(Universe::new(id, title)))
            }
            None => Ok(None),
        }
    }

    async fn list_navigable_exits(&self, place_id: PlaceId) -> Result<Vec<Exit>, RepoError> {
        let rows = sqlx::query(NAVIGABLE_EXITS)
            .bind(place_id.get())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_navigable_exits", e))?;

        let mut exits = rows
            .iter()
            .map(Self::row_to_exit)
            .collect::<Result<Vec<_>, _>>()?;
        exits.retain(Exit::is_navigable);
        sort_exits(&mut exits);
        Ok(exits)
    }

    async fn find_exit(
        &self,
        place_id: PlaceId,
        direction: Direction,
    ) -> Result<Option<Exit>, RepoError> {
        let row = sqlx::query(FIND_EXIT)
            .bind(place_id.get())
            .bind(direction.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("find_exit", e))?;

        Ok(row
            .map(|row| Self::row_to_exit(&row))
            .transpose()?
            .filter(Exit::is_navigable))
    }

    async fn list_places_with_exits(
        &self,
        universe_id: UniverseId,
    ) -> Result<Vec<PlaceWithExits>, RepoError> {
        let place_rows = sqlx::query(
            "SELECT id, universe_id, name, region_id FROM places WHERE universe_id = ? ORDER BY id",
        )
        .bind(universe_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_places_with_exits", e))?;

        let exit_rows = sqlx::query(
            r#"
            SELECT e.place_id, e.direction, e.destination_id, e.mode
            FROM exits e
            INNER JOIN places p ON p.id = e.place_id
            WHERE p.universe_id = ?
            ORDER BY e.place_id, e.id
            "#,
        )
        .bind(universe_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_places_with_exits", e))?;

        let mut exits_by_place: HashMap<PlaceId, Vec<Exit>> = HashMap::new();
        for row in &exit_rows {
            let exit = Self::row_to_exit(row)?;
            exits_by_place.entry(exit.place_id).or_default().push(exit);
        }

        place_rows
            .iter()
            .map(|row| {
                let place = Self::row_to_place(row)?;
                let mut exits = exits_by_place.remove(&place.id).unwrap_or_default();
                sort_exits(&mut exits);
                Ok(PlaceWithExits::new(place, exits))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::{connect, ensure_schema};

    async fn seeded_repo(dir: &tempfile::TempDir) -> SqliteWorldRepo {
        let db_path = dir.path().join("world.db");
        let pool = connect(&db_path.to_string_lossy())
            .await
            .expect("connect");
        ensure_schema(&pool).await.expect("schema");

        for statement in [
            "INSERT INTO universes (id, title) VALUES (1, 'Aldoria')",
            "INSERT INTO places (id, universe_id, name, region_id) VALUES (3, 1, 'Cellar', 1)",
            "INSERT INTO places (id, universe_id, name, region_id) VALUES (1, 1, 'Keep', NULL)",
            "INSERT INTO places (id, universe_id, name, region_id) VALUES (2, 1, 'Yard', NULL)",
            "INSERT INTO places (id, universe_id, name, region_id) VALUES (9, 2, 'Elsewhere', NULL)",
            "INSERT INTO exits (place_id, direction, destination_id, mode) VALUES (1, 'west', 2, 'normal')",
            "INSERT INTO exits (place_id, direction, destination_id, mode) VALUES (1, 'north', 2, 'normal')",
            "INSERT INTO exits (place_id, direction, destination_id, mode) VALUES (1, 'down', 3, 'hidden')",
            "INSERT INTO exits (place_id, direction, destination_id, mode) VALUES (1, 'descend', 3, 'normal')",
            "INSERT INTO exits (place_id, direction, destination_id, mode) VALUES (3, 'ascend', 1, 'normal')",
            "INSERT INTO characters (id, name, location_id) VALUES (5, 'Mira', 1)",
            "INSERT INTO vehicle_instances (id, name, location_id) VALUES (5, 'Cart', 2)",
        ] {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .expect("seed");
        }

        SqliteWorldRepo::new(pool)
    }

    #[tokio::test]
    async fn listing_excludes_hidden_and_hierarchy_exits() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = seeded_repo(&dir).await;

        let exits = repo
            .list_navigable_exits(PlaceId::new(1))
            .await
            .expect("list exits");
        let directions: Vec<_> = exits.iter().map(|e| e.direction.as_str()).collect();
        assert_eq!(directions, vec!["north", "west"]);

        let hidden = repo
            .find_exit(PlaceId::new(1), Direction::Down)
            .await
            .expect("find exit");
        assert_eq!(hidden, None);
    }

    #[tokio::test]
    async fn conditional_write_is_rejected_for_stale_location() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = seeded_repo(&dir).await;
        let mira = ActorId::new(5);

        let applied = repo
            .set_actor_location(mira, ActorKind::Character, PlaceId::new(2), PlaceId::new(3))
            .await
            .expect("write");
        assert!(!applied);

        let applied = repo
            .set_actor_location(mira, ActorKind::Character, PlaceId::new(1), PlaceId::new(2))
            .await
            .expect("write");
        assert!(applied);

        let location = repo
            .get_actor_location(mira, ActorKind::Character)
            .await
            .expect("read");
        assert_eq!(location, Some(PlaceId::new(2)));
    }

    #[tokio::test]
    async fn actor_kind_selects_the_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = seeded_repo(&dir).await;

        let cart = repo
            .get_actor(ActorId::new(5), ActorKind::Vehicle)
            .await
            .expect("read")
            .expect("vehicle exists");
        assert_eq!(cart.name, "Cart");
        assert_eq!(cart.current_place_id, PlaceId::new(2));

        let mob = repo
            .get_actor(ActorId::new(5), ActorKind::Mob)
            .await
            .expect("read");
        assert_eq!(mob, None);
    }

    #[tokio::test]
    async fn bulk_load_orders_places_and_keeps_every_exit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = seeded_repo(&dir).await;

        let loaded = repo
            .list_places_with_exits(UniverseId::new(1))
            .await
            .expect("bulk load");

        let ids: Vec<i64> = loaded.iter().map(|p| p.place.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let keep_exits: Vec<_> = loaded[0]
            .exits
            .iter()
            .map(|e| e.direction.as_str())
            .collect();
        assert_eq!(keep_exits, vec!["north", "west", "down", "descend"]);
        assert_eq!(loaded[2].place.region_id, Some(PlaceId::new(1)));
    }

    #[tokio::test]
    async fn malformed_direction_is_a_serialization_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = seeded_repo(&dir).await;
        sqlx::query(
            "INSERT INTO exits (place_id, direction, destination_id, mode) VALUES (2, 'widdershins', 1, 'normal')",
        )
        .execute(repo.pool())
        .await
        .expect("seed");

        let err = repo
            .list_places_with_exits(UniverseId::new(1))
            .await
            .expect_err("bad direction must fail");
        assert!(matches!(err, RepoError::Serialization(_)));
    }

    #[tokio::test]
    async fn capitalized_hidden_row_never_shadows_a_visible_exit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = seeded_repo(&dir).await;
        for statement in [
            "INSERT INTO exits (place_id, direction, destination_id, mode) VALUES (2, 'North', 3, 'Hidden')",
            "INSERT INTO exits (place_id, direction, destination_id, mode) VALUES (2, 'North', 1, 'normal')",
            "INSERT INTO exits (place_id, direction, destination_id, mode) VALUES (2, 'EAST', 3, ' HIDDEN ')",
        ] {
            sqlx::query(statement)
                .execute(repo.pool())
                .await
                .expect("seed");
        }

        let listed = repo
            .list_navigable_exits(PlaceId::new(2))
            .await
            .expect("list exits");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].destination_id, PlaceId::new(1));
        assert!(listed.iter().all(Exit::is_navigable));

        let north = repo
            .find_exit(PlaceId::new(2), Direction::North)
            .await
            .expect("find exit")
            .expect("visible north exit");
        assert_eq!(north.destination_id, PlaceId::new(1));
        assert_eq!(north.visibility, ExitVisibility::Normal);

        let east = repo
            .find_exit(PlaceId::new(2), Direction::East)
            .await
            .expect("find exit");
        assert_eq!(east, None);
    }

    #[tokio::test]
    async fn every_actor_kind_moves_through_its_own_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = seeded_repo(&dir).await;
        sqlx::query("INSERT INTO mob_instances (id, name, location_id) VALUES (5, 'Rat', 3)")
            .execute(repo.pool())
            .await
            .expect("seed");

        for kind in ActorKind::ALL {
            let id = ActorId::new(5);
            let origin = repo
                .get_actor_location(id, kind)
                .await
                .expect("read")
                .expect("actor exists");

            let applied = repo
                .set_actor_location(id, kind, origin, PlaceId::new(9))
                .await
                .expect("write");
            assert!(applied, "{kind} should move");
            assert_eq!(
                repo.get_actor_location(id, kind).await.expect("read"),
                Some(PlaceId::new(9))
            );
        }
    }

    #[tokio::test]
    async fn resolve_move_commits_and_narrates_through_sqlite() {
        use std::sync::Arc;

        use chrono::{TimeZone, Utc};

        use crate::infrastructure::clock::FixedClock;
        use crate::infrastructure::sqlite::{SqliteChatSink, GM_USER_NAME};
        use crate::use_cases::movement::{MoveError, NarrationConfig, ResolveMove};

        let dir = tempfile::tempdir().expect("tempdir");
        let repo = Arc::new(seeded_repo(&dir).await);
        let pool = repo.pool().clone();
        let use_case = ResolveMove::new(
            repo.clone(),
            Arc::new(SqliteChatSink::new(pool.clone(), true)),
            Arc::new(FixedClock(
                Utc.timestamp_opt(1_700_000_000, 0)
                    .single()
                    .expect("valid timestamp"),
            )),
            NarrationConfig::default(),
        );
        let mira = ActorId::new(5);

        let moved = use_case
            .execute(mira, ActorKind::Character, "north")
            .await
            .expect("move succeeds");
        assert_eq!(moved.previous_place_id, PlaceId::new(1));
        assert_eq!(moved.place_id, PlaceId::new(2));
        assert_eq!(
            repo.get_actor_location(mira, ActorKind::Character)
                .await
                .expect("read"),
            Some(PlaceId::new(2))
        );

        let rows = sqlx::query("SELECT place_id, user_name, text FROM chat_messages ORDER BY id")
            .fetch_all(&pool)
            .await
            .expect("chat rows");
        let chat: Vec<(i64, String, String)> = rows
            .iter()
            .map(|row| (row.get("place_id"), row.get("user_name"), row.get("text")))
            .collect();
        assert_eq!(
            chat,
            vec![
                (
                    1,
                    GM_USER_NAME.to_string(),
                    "Mira leaves the area, heading north.".to_string()
                ),
                (
                    2,
                    GM_USER_NAME.to_string(),
                    "Mira arrives, coming from the south.".to_string()
                ),
            ]
        );
        let logged: i64 = sqlx::query("SELECT COUNT(*) AS n FROM content_log")
            .fetch_one(&pool)
            .await
            .expect("count")
            .get("n");
        assert_eq!(logged, 2);

        // The yard has no exits: nothing moves and nothing is posted.
        let err = use_case
            .execute(mira, ActorKind::Character, "south")
            .await
            .expect_err("no south exit from the yard");
        assert!(matches!(err, MoveError::NoExit { .. }));
        let total: i64 = sqlx::query("SELECT COUNT(*) AS n FROM chat_messages")
            .fetch_one(&pool)
            .await
            .expect("count")
            .get("n");
        assert_eq!(total, 2);
    }
}
