//! Racing moves of the same actor.
//!
//! Both moves are forced to read the actor's location before either writes,
//! which is the interleaving the conditional write exists for.

use std::sync::Arc;

use async_trait::async_trait;
use rpgworld_domain::{
    Actor, ActorId, ActorKind, Direction, Exit, Place, PlaceId, PlaceWithExits, Universe,
    UniverseId,
};
use tokio::sync::Barrier;

use super::{MoveError, NarrationConfig, ResolveMove};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::memory::{InMemoryWorldRepo, RecordingNotificationSink};
use crate::infrastructure::ports::{RepoError, WorldRepo};

const A: PlaceId = PlaceId::new(1);
const B: PlaceId = PlaceId::new(2);
const C: PlaceId = PlaceId::new(3);
const X: ActorId = ActorId::new(7);

/// Holds each actor read until both racing moves have made theirs.
struct LockstepRepo {
    inner: InMemoryWorldRepo,
    reads: Barrier,
}

#[async_trait]
impl WorldRepo for LockstepRepo {
    async fn get_actor(&self, id: ActorId, kind: ActorKind) -> Result<Option<Actor>, RepoError> {
        let actor = self.inner.get_actor(id, kind).await?;
        self.reads.wait().await;
        Ok(actor)
    }

    async fn get_actor_location(
        &self,
        id: ActorId,
        kind: ActorKind,
    ) -> Result<Option<PlaceId>, RepoError> {
        self.inner.get_actor_location(id, kind).await
    }

    async fn set_actor_location(
        &self,
        id: ActorId,
        kind: ActorKind,
        expected: PlaceId,
        destination: PlaceId,
    ) -> Result<bool, RepoError> {
        self.inner
            .set_actor_location(id, kind, expected, destination)
            .await
    }

    async fn get_place(&self, id: PlaceId) -> Result<Option<Place>, RepoError> {
        self.inner.get_place(id).await
    }

    async fn get_universe(&self, id: UniverseId) -> Result<Option<Universe>, RepoError> {
        self.inner.get_universe(id).await
    }

    async fn list_navigable_exits(&self, place_id: PlaceId) -> Result<Vec<Exit>, RepoError> {
        self.inner.list_navigable_exits(place_id).await
    }

    async fn find_exit(
        &self,
        place_id: PlaceId,
        direction: Direction,
    ) -> Result<Option<Exit>, RepoError> {
        self.inner.find_exit(place_id, direction).await
    }

    async fn list_places_with_exits(
        &self,
        universe_id: UniverseId,
    ) -> Result<Vec<PlaceWithExits>, RepoError> {
        self.inner.list_places_with_exits(universe_id).await
    }
}

fn lockstep_world() -> Arc<LockstepRepo> {
    let inner = InMemoryWorldRepo::new();
    let universe = UniverseId::new(1);
    inner.insert_place(Place::new(A, universe, "Crossroads"));
    inner.insert_place(Place::new(B, universe, "Mill"));
    inner.insert_place(Place::new(C, universe, "Ford"));
    inner.insert_exit(Exit::new(A, Direction::North, B));
    inner.insert_exit(Exit::new(A, Direction::East, C));
    inner.insert_actor(Actor::character(X, "Wren", A));
    Arc::new(LockstepRepo {
        inner,
        reads: Barrier::new(2),
    })
}

#[tokio::test]
async fn concurrent_moves_of_one_actor_have_exactly_one_winner() {
    let world = lockstep_world();
    let sink = Arc::new(RecordingNotificationSink::new());
    let use_case = ResolveMove::new(
        world.clone(),
        sink.clone(),
        Arc::new(SystemClock::new()),
        NarrationConfig::default(),
    );

    let (north, east) = tokio::join!(
        use_case.execute(X, ActorKind::Character, "north"),
        use_case.execute(X, ActorKind::Character, "east"),
    );

    let winner = match (north, east) {
        (Ok(moved), Err(MoveError::LocationConflict { actor_id, expected }))
        | (Err(MoveError::LocationConflict { actor_id, expected }), Ok(moved)) => {
            assert_eq!(actor_id, X);
            assert_eq!(expected, A);
            moved
        }
        other => panic!("expected one success and one conflict, got {other:?}"),
    };

    assert_eq!(
        world.inner.location_of(X, ActorKind::Character),
        Some(winner.place_id)
    );
    // Only the winner narrates.
    assert_eq!(sink.delivered().await.len(), 2);
}

#[tokio::test]
async fn moves_of_different_actors_do_not_conflict() {
    let world = lockstep_world();
    world
        .inner
        .insert_actor(Actor::mob(ActorId::new(8), "Crow", A));
    let use_case = ResolveMove::new(
        world.clone(),
        Arc::new(RecordingNotificationSink::new()),
        Arc::new(SystemClock::new()),
        NarrationConfig::default(),
    );

    let (wren, crow) = tokio::join!(
        use_case.execute(X, ActorKind::Character, "north"),
        use_case.execute(ActorId::new(8), ActorKind::Mob, "north"),
    );

    assert_eq!(wren.expect("wren moves").place_id, B);
    assert_eq!(crow.expect("crow moves").place_id, B);
}
