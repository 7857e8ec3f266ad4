//! Domain entities - the world graph and the things that move through it

mod actor;
mod exit;
mod place;
mod universe;

pub use actor::{Actor, ActorKind};
pub use exit::{sort_exits, Exit, ExitVisibility};
pub use place::{Place, PlaceWithExits};
pub use universe::Universe;
