//! RpgWorld domain types.
//!
//! The world graph (universes, places, exits), the actors that move through
//! it, and the direction registry used for navigation and narration. No I/O
//! lives here.

pub mod direction;
pub mod entities;
pub mod error;
pub mod ids;

pub use direction::{
    arrival_phrase_of, reciprocal_of, ArrivalPhrase, Direction, ExitDirection, Markup,
};
pub use entities::{
    sort_exits, Actor, ActorKind, Exit, ExitVisibility, Place, PlaceWithExits, Universe,
};
pub use error::DomainError;
pub use ids::{ActorId, PlaceId, UniverseId};
