//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases depend on port traits only, never on concrete adapters.

pub mod map;
pub mod movement;

pub use map::ExportUniverseMap;
pub use movement::MovementUseCases;
