//! State transition and notification throttling.
//!
//! Given the previous state, whether the marker is on the page now, and the
//! current time, decide which notification (if any) goes out and what the
//! next persisted state is.
//!
//! | previous  | observed | notification                         | next state            |
//! |-----------|----------|--------------------------------------|-----------------------|
//! | not_found | present  | available                            | found, ts unchanged   |
//! | found     | present  | none                                 | unchanged             |
//! | any       | absent   | still-unavailable if cooldown passed | not_found, ts = now if sent |
//!
//! The cooldown is a floor between reminders, not a schedule: runs fire at
//! whatever cadence the external scheduler uses.

use chrono::{DateTime, TimeDelta, Utc};

use crate::models::{
    Config, Messages, Notification, NotificationKind, Priority, State, Status, ViewAction,
};
use crate::utils::render;

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State to persist
    pub state: State,
    /// Zero or one notification to send
    pub notification: Option<Notification>,
}

/// Pure decision logic. Holds only the values needed to word notifications
/// and throttle reminders.
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    url: String,
    cooldown: TimeDelta,
    messages: Messages,
}

impl TransitionEngine {
    pub fn new(url: impl Into<String>, cooldown: TimeDelta, messages: Messages) -> Self {
        Self {
            url: url.into(),
            cooldown,
            messages,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.monitor.url.clone(),
            config.monitor.cooldown(),
            config.messages.clone(),
        )
    }

    pub fn cooldown(&self) -> TimeDelta {
        self.cooldown
    }

    /// Compute the next state and the notification to send.
    pub fn evaluate(
        &self,
        previous: &State,
        observed_present: bool,
        now: DateTime<Utc>,
    ) -> Transition {
        if observed_present {
            if previous.is_found() {
                return Transition {
                    state: *previous,
                    notification: None,
                };
            }
            return Transition {
                state: State::new(Status::Found, previous.last_not_found_at),
                notification: Some(self.available_notification()),
            };
        }

        // A clock that went backwards yields a negative elapsed time, which
        // never passes the cooldown, so the timestamp cannot regress.
        let elapsed = now.signed_duration_since(previous.last_not_found_at);
        if elapsed >= self.cooldown {
            Transition {
                state: State::new(Status::NotFound, now),
                notification: Some(self.unavailable_notification()),
            }
        } else {
            Transition {
                state: State::new(Status::NotFound, previous.last_not_found_at),
                notification: None,
            }
        }
    }

    /// Earliest time a "still unavailable" reminder may go out again.
    pub fn next_reminder_at(&self, state: &State) -> DateTime<Utc> {
        state
            .last_not_found_at
            .checked_add_signed(self.cooldown)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Time left before the next reminder may go out, zero once it is due.
    pub fn time_until_reminder(&self, state: &State, now: DateTime<Utc>) -> TimeDelta {
        let remaining = self.next_reminder_at(state).signed_duration_since(now);
        remaining.max(TimeDelta::zero())
    }

    fn available_notification(&self) -> Notification {
        Notification {
            kind: NotificationKind::Available,
            title: render(&self.messages.available_title, &self.url),
            message: render(&self.messages.available_body, &self.url),
            priority: Priority::Max,
            tags: self.messages.available_tags.clone(),
            action: Some(ViewAction {
                label: self.messages.available_action_label.clone(),
                url: self.url.clone(),
            }),
        }
    }

    fn unavailable_notification(&self) -> Notification {
        Notification {
            kind: NotificationKind::StillUnavailable,
            title: render(&self.messages.unavailable_title, &self.url),
            message: render(&self.messages.unavailable_body, &self.url),
            priority: Priority::Min,
            tags: Vec::new(),
            action: None,
        }
    }
}
