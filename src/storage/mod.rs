//! Storage abstractions for run state persistence.
//!
//! A run reads the state once at start and writes it once at the end:
//!
//! ```text
//! state.json
//! {
//!   "status": "not_found",
//!   "last_not_found_ts": "2026-01-31T18:00:00Z"
//! }
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::State;

// Re-export for convenience
pub use local::LocalStateStore;

/// Trait for run state backends.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the persisted state.
    ///
    /// A missing or unreadable record is the first-run case and yields
    /// `State::default()`.
    async fn load(&self) -> State;

    /// Replace the persisted state.
    async fn save(&self, state: &State) -> Result<()>;
}
