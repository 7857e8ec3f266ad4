//! Movement use cases.

mod list_exits;
mod narration;
mod resolve_move;

#[cfg(test)]
mod concurrency_tests;

pub use list_exits::{ListExits, ListExitsError};
pub use narration::{arrival_text, departure_text};
pub use resolve_move::{MoveError, MovedActor, ResolveMove};

use std::sync::Arc;

use rpgworld_domain::Markup;

/// Narration toggles handed to the movement resolver at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrationConfig {
    /// Emit departure/arrival notifications after a move
    pub enabled: bool,
    pub markup: Markup,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            markup: Markup::Plain,
        }
    }
}

/// Container for movement use cases.
pub struct MovementUseCases {
    pub resolve_move: Arc<ResolveMove>,
    pub list_exits: Arc<ListExits>,
}

impl MovementUseCases {
    pub fn new(resolve_move: Arc<ResolveMove>, list_exits: Arc<ListExits>) -> Self {
        Self {
            resolve_move,
            list_exits,
        }
    }
}
