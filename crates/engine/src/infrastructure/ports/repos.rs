//! Repository port for world-graph access.

use async_trait::async_trait;
use rpgworld_domain::{
    Actor, ActorId, ActorKind, Direction, Exit, Place, PlaceId, PlaceWithExits, Universe,
    UniverseId,
};

use super::error::RepoError;

/// Read access to places and exits, plus the single write the engine ever
/// performs: moving an actor.
///
/// Implementations must bind every value as a query parameter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorldRepo: Send + Sync {
    // Actors
    async fn get_actor(&self, id: ActorId, kind: ActorKind) -> Result<Option<Actor>, RepoError>;
    async fn get_actor_location(
        &self,
        id: ActorId,
        kind: ActorKind,
    ) -> Result<Option<PlaceId>, RepoError>;

    /// Move an actor iff its stored location still equals `expected`.
    ///
    /// Returns `false` when the stored location differs (or the actor no
    /// longer exists); nothing is written in that case.
    async fn set_actor_location(
        &self,
        id: ActorId,
        kind: ActorKind,
        expected: PlaceId,
        destination: PlaceId,
    ) -> Result<bool, RepoError>;

    // Places
    async fn get_place(&self, id: PlaceId) -> Result<Option<Place>, RepoError>;
    async fn get_universe(&self, id: UniverseId) -> Result<Option<Universe>, RepoError>;

    // Exits (navigable only: visible, not ascend/descend)
    async fn list_navigable_exits(&self, place_id: PlaceId) -> Result<Vec<Exit>, RepoError>;
    async fn find_exit(
        &self,
        place_id: PlaceId,
        direction: Direction,
    ) -> Result<Option<Exit>, RepoError>;

    /// Every place of a universe ordered by ascending id, each with all of
    /// its exits (hidden and hierarchy exits included).
    async fn list_places_with_exits(
        &self,
        universe_id: UniverseId,
    ) -> Result<Vec<PlaceWithExits>, RepoError>;
}
