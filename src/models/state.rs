//! Persisted run state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the marker was on the page as of the last completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Found,
    /// Older state files spell this `not-found`.
    #[serde(alias = "not-found")]
    NotFound,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Found => "found",
            Status::NotFound => "not_found",
        }
    }
}

/// The only record that survives between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub status: Status,

    /// Last time a "still unavailable" notification went out
    #[serde(rename = "last_not_found_ts")]
    pub last_not_found_at: DateTime<Utc>,
}

impl State {
    pub fn new(status: Status, last_not_found_at: DateTime<Utc>) -> Self {
        Self {
            status,
            last_not_found_at,
        }
    }

    pub fn is_found(&self) -> bool {
        self.status == Status::Found
    }
}

impl Default for State {
    /// `not_found` with the epoch as "never notified".
    fn default() -> Self {
        Self::new(Status::NotFound, DateTime::<Utc>::UNIX_EPOCH)
    }
}
