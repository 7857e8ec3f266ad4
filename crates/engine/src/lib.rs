//! RPG world engine library.
//!
//! Movement of actors through a universe's place graph, narration of those
//! moves, and export of the graph as a map.
//!
//! ## Structure
//!
//! - `use_cases/` - Movement resolution, exit listing, map export
//! - `infrastructure/` - Port traits and their adapters (SQLite, in-memory, log)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
