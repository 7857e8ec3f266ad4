//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - World storage (SQLite today, in-memory for tests)
//! - Narration delivery (chat table, log)
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;

pub use repos::WorldRepo;
pub use external::{Notification, NotificationKind, NotificationSink};
pub use testing::ClockPort;
pub use error::{NotifyError, RepoError};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::MockWorldRepo;
#[cfg(test)]
pub use external::MockNotificationSink;
#[cfg(test)]
pub use testing::MockClockPort;
