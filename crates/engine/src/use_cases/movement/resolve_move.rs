//! Resolve a directional move for any actor kind.
//!
//! The move is a read of the actor's location followed by one conditional
//! write against that location. A concurrent move that lands first makes the
//! write miss, which surfaces as [`MoveError::LocationConflict`] instead of a
//! lost update. Narration is emitted only after the write commits and cannot
//! undo it.

use std::sync::Arc;

use rpgworld_domain::{ActorId, ActorKind, Direction, Exit, PlaceId};

use crate::infrastructure::ports::{
    ClockPort, Notification, NotificationKind, NotificationSink, RepoError, WorldRepo,
};

use super::narration::{arrival_text, departure_text};
use super::NarrationConfig;

/// Outcome of a committed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedActor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub name: String,
    pub previous_place_id: PlaceId,
    pub place_id: PlaceId,
}

/// Moves characters, vehicles and mobs through navigable exits.
pub struct ResolveMove {
    world: Arc<dyn WorldRepo>,
    notifications: Arc<dyn NotificationSink>,
    clock: Arc<dyn ClockPort>,
    narration: NarrationConfig,
}

impl ResolveMove {
    pub fn new(
        world: Arc<dyn WorldRepo>,
        notifications: Arc<dyn NotificationSink>,
        clock: Arc<dyn ClockPort>,
        narration: NarrationConfig,
    ) -> Self {
        Self {
            world,
            notifications,
            clock,
            narration,
        }
    }

    /// Move `actor_id` one step in `direction`.
    ///
    /// # Returns
    /// * `Ok(MovedActor)` - the location change was committed
    /// * `Err(MoveError::NoExit)` - nothing was written and nobody was notified
    /// * `Err(MoveError::LocationConflict)` - another move won the race
    pub async fn execute(
        &self,
        actor_id: ActorId,
        kind: ActorKind,
        direction: &str,
    ) -> Result<MovedActor, MoveError> {
        let direction: Direction = direction
            .parse()
            .map_err(|_| MoveError::UnknownDirection(direction.to_string()))?;

        let actor = self
            .world
            .get_actor(actor_id, kind)
            .await?
            .ok_or(MoveError::ActorNotFound { id: actor_id, kind })?;
        let origin = actor.current_place_id;

        let exit = self
            .world
            .find_exit(origin, direction)
            .await?
            .filter(Exit::is_navigable);
        let Some(exit) = exit else {
            tracing::debug!(
                actor_id = %actor_id,
                kind = %kind,
                place_id = %origin,
                direction = %direction,
                "No navigable exit in requested direction"
            );
            return Err(MoveError::NoExit {
                place_id: origin,
                direction,
            });
        };
        let destination = exit.destination_id;

        if self.world.get_place(destination).await?.is_none() {
            tracing::error!(
                place_id = %origin,
                destination_id = %destination,
                direction = %direction,
                "Exit points at a place that does not exist"
            );
            return Err(MoveError::PlaceNotFound(destination));
        }

        let applied = self
            .world
            .set_actor_location(actor_id, kind, origin, destination)
            .await?;
        if !applied {
            tracing::warn!(
                actor_id = %actor_id,
                kind = %kind,
                expected = %origin,
                "Actor location changed concurrently, move rejected"
            );
            return Err(MoveError::LocationConflict {
                actor_id,
                expected: origin,
            });
        }

        tracing::info!(
            actor_id = %actor_id,
            kind = %kind,
            from = %origin,
            to = %destination,
            direction = %direction,
            "Actor moved"
        );

        if self.narration.enabled {
            let markup = self.narration.markup;
            self.announce(
                actor_id,
                origin,
                NotificationKind::Departure,
                departure_text(&actor.name, direction, markup),
            )
            .await;
            self.announce(
                actor_id,
                destination,
                NotificationKind::Arrival,
                arrival_text(&actor.name, direction, markup),
            )
            .await;
        }

        Ok(MovedActor {
            id: actor_id,
            kind,
            name: actor.name,
            previous_place_id: origin,
            place_id: destination,
        })
    }

    async fn announce(
        &self,
        actor_id: ActorId,
        place_id: PlaceId,
        kind: NotificationKind,
        text: String,
    ) {
        let notification = Notification {
            place_id,
            kind,
            text,
            emitted_at: self.clock.now(),
        };
        if let Err(e) = self.notifications.notify(notification).await {
            tracing::warn!(
                actor_id = %actor_id,
                place_id = %place_id,
                kind = ?kind,
                error = %e,
                "Failed to deliver movement narration"
            );
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    #[error("Unknown direction: {0}")]
    UnknownDirection(String),
    #[error("{kind} {id} not found")]
    ActorNotFound { id: ActorId, kind: ActorKind },
    #[error("No exit {direction} from place {place_id}")]
    NoExit {
        place_id: PlaceId,
        direction: Direction,
    },
    #[error("Place not found: {0}")]
    PlaceNotFound(PlaceId),
    #[error("Actor {actor_id} is no longer at place {expected}")]
    LocationConflict { actor_id: ActorId, expected: PlaceId },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl MoveError {
    /// Whether the caller may re-issue the same move.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LocationConflict { .. } | Self::Repo(_))
    }
}
