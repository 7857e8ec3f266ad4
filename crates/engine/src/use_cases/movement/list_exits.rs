//! List the exits an actor can take from a place.

use std::sync::Arc;

use rpgworld_domain::{ActorId, ActorKind, Exit, PlaceId};

use crate::infrastructure::ports::{RepoError, WorldRepo};

/// Navigable exits of a place, in canonical direction order.
///
/// Hidden exits and region hierarchy links are never listed.
pub struct ListExits {
    world: Arc<dyn WorldRepo>,
}

impl ListExits {
    pub fn new(world: Arc<dyn WorldRepo>) -> Self {
        Self { world }
    }

    pub async fn execute(&self, place_id: PlaceId) -> Result<Vec<Exit>, ListExitsError> {
        if self.world.get_place(place_id).await?.is_none() {
            return Err(ListExitsError::PlaceNotFound(place_id));
        }
        let exits = self.world.list_navigable_exits(place_id).await?;
        tracing::debug!(place_id = %place_id, count = exits.len(), "Listed exits");
        Ok(exits)
    }

    /// Exits from wherever the actor currently stands.
    pub async fn for_actor(
        &self,
        actor_id: ActorId,
        kind: ActorKind,
    ) -> Result<Vec<Exit>, ListExitsError> {
        let place_id = self
            .world
            .get_actor_location(actor_id, kind)
            .await?
            .ok_or(ListExitsError::ActorNotFound { id: actor_id, kind })?;
        self.execute(place_id).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListExitsError {
    #[error("Place not found: {0}")]
    PlaceNotFound(PlaceId),
    #[error("{kind} {id} not found")]
    ActorNotFound { id: ActorId, kind: ActorKind },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
