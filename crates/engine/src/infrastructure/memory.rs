//! In-memory world storage and notification capture.
//!
//! Backs tests and local experiments. Actor rows live in a `DashMap`, so the
//! conditional location write is a compare-and-set under the entry's shard
//! lock, matching the row-level guarantee of the SQLite adapter.

use async_trait::async_trait;
use dashmap::DashMap;
use rpgworld_domain::{
    sort_exits, Actor, ActorId, ActorKind, Direction, Exit, Place, PlaceId, PlaceWithExits,
    Universe, UniverseId,
};
use tokio::sync::Mutex;

use crate::infrastructure::ports::{
    Notification, NotificationSink, NotifyError, RepoError, WorldRepo,
};

#[derive(Default)]
pub struct InMemoryWorldRepo {
    universes: DashMap<UniverseId, Universe>,
    places: DashMap<PlaceId, Place>,
    exits: DashMap<PlaceId, Vec<Exit>>,
    actors: DashMap<(ActorKind, ActorId), Actor>,
}

impl InMemoryWorldRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_universe(&self, universe: Universe) {
        self.universes.insert(universe.id, universe);
    }

    pub fn insert_place(&self, place: Place) {
        self.places.insert(place.id, place);
    }

    pub fn insert_exit(&self, exit: Exit) {
        self.exits.entry(exit.place_id).or_default().push(exit);
    }

    pub fn insert_actor(&self, actor: Actor) {
        self.actors.insert((actor.kind, actor.id), actor);
    }

    /// Current location of an actor, bypassing the port (test assertions).
    pub fn location_of(&self, id: ActorId, kind: ActorKind) -> Option<PlaceId> {
        self.actors
            .get(&(kind, id))
            .map(|actor| actor.current_place_id)
    }

    fn exits_of(&self, place_id: PlaceId) -> Vec<Exit> {
        self.exits
            .get(&place_id)
            .map(|exits| exits.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl WorldRepo for InMemoryWorldRepo {
    async fn get_actor(&self, id: ActorId, kind: ActorKind) -> Result<Option<Actor>, RepoError> {
        Ok(self.actors.get(&(kind, id)).map(|actor| actor.clone()))
    }

    async fn get_actor_location(
        &self,
        id: ActorId,
        kind: ActorKind,
    ) -> Result<Option<PlaceId>, RepoError> {
        Ok(self.location_of(id, kind))
    }

    async fn set_actor_location(
        &self,
        id: ActorId,
        kind: ActorKind,
        expected: PlaceId,
        destination: PlaceId,
    ) -> Result<bool, RepoError> {
        match self.actors.get_mut(&(kind, id)) {
            Some(mut actor) if actor.current_place_id == expected => {
                actor.current_place_id = destination;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get_place(&self, id: PlaceId) -> Result<Option<Place>, RepoError> {
        Ok(self.places.get(&id).map(|place| place.clone()))
    }

    async fn get_universe(&self, id: UniverseId) -> Result<Option<Universe>, RepoError> {
        Ok(self.universes.get(&id).map(|universe| universe.clone()))
    }

    async fn list_navigable_exits(&self, place_id: PlaceId) -> Result<Vec<Exit>, RepoError> {
        let mut exits: Vec<Exit> = self
            .exits_of(place_id)
            .into_iter()
            .filter(Exit::is_navigable)
            .collect();
        sort_exits(&mut exits);
        Ok(exits)
    }

    async fn find_exit(
        &self,
        place_id: PlaceId,
        direction: Direction,
    ) -> Result<Option<Exit>, RepoError> {
        Ok(self
            .list_navigable_exits(place_id)
            .await?
            .into_iter()
            .find(|exit| exit.travel_direction() == Some(direction)))
    }

    async fn list_places_with_exits(
        &self,
        universe_id: UniverseId,
    ) -> Result<Vec<PlaceWithExits>, RepoError> {
        let mut places: Vec<Place> = self
            .places
            .iter()
            .filter(|entry| entry.universe_id == universe_id)
            .map(|entry| entry.value().clone())
            .collect();
        places.sort_by_key(|place| place.id);

        Ok(places
            .into_iter()
            .map(|place| {
                let mut exits = self.exits_of(place.id);
                sort_exits(&mut exits);
                PlaceWithExits::new(place, exits)
            })
            .collect())
    }
}

/// Keeps every notification it receives, in delivery order.
#[derive(Default)]
pub struct RecordingNotificationSink {
    delivered: Mutex<Vec<Notification>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().await.clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        self.delivered.lock().await.push(notification);
        Ok(())
    }
}
