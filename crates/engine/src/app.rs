//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, NotificationSink, WorldRepo};
use crate::use_cases;
use crate::use_cases::movement::{ListExits, NarrationConfig, ResolveMove};

/// Main application state.
///
/// Holds the ports and every use case built on them.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Port traits injected directly.
pub struct Repositories {
    pub world: Arc<dyn WorldRepo>,
    pub notifications: Arc<dyn NotificationSink>,
}

/// Container for all use cases.
pub struct UseCases {
    pub movement: use_cases::MovementUseCases,
    pub map: Arc<use_cases::ExportUniverseMap>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        world: Arc<dyn WorldRepo>,
        notifications: Arc<dyn NotificationSink>,
        clock: Arc<dyn ClockPort>,
        narration: NarrationConfig,
    ) -> Self {
        let resolve_move = Arc::new(ResolveMove::new(
            world.clone(),
            notifications.clone(),
            clock,
            narration,
        ));
        let list_exits = Arc::new(ListExits::new(world.clone()));
        let map = Arc::new(use_cases::ExportUniverseMap::new(world.clone()));

        Self {
            repositories: Repositories {
                world,
                notifications,
            },
            use_cases: UseCases {
                movement: use_cases::MovementUseCases::new(resolve_move, list_exits),
                map,
            },
        }
    }
}
