//! Push notification data structure.

use std::fmt;

/// Which transition produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Marker appeared after being absent
    Available,
    /// Marker still absent and the cooldown has elapsed
    StillUnavailable,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Available => f.write_str("available"),
            NotificationKind::StillUnavailable => f.write_str("still-unavailable"),
        }
    }
}

/// ntfy message priority, sent as its numeric level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Min = 1,
    Low = 2,
    Default = 3,
    High = 4,
    Max = 5,
}

impl Priority {
    pub fn level(self) -> u8 {
        self as u8
    }
}

/// A clickable "view" action attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewAction {
    pub label: String,
    pub url: String,
}

impl fmt::Display for ViewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view, {}, {}", self.label, self.url)
    }
}

/// One push message. The topic is supplied when it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub action: Option<ViewAction>,
}

impl Notification {
    /// Metadata headers in the order they are attached to the request.
    ///
    /// `Tags` and `Actions` are only present when set.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("Title", self.title.clone()),
            ("Priority", self.priority.level().to_string()),
        ];
        if !self.tags.is_empty() {
            headers.push(("Tags", self.tags.join(", ")));
        }
        if let Some(action) = &self.action {
            headers.push(("Actions", action.to_string()));
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_for_available_message() {
        let notification = Notification {
            kind: NotificationKind::Available,
            title: "Showtimes Available 🎉".to_string(),
            message: "🎬 Showtimes just appeared on https://cinema.example".to_string(),
            priority: Priority::Max,
            tags: vec!["popcorn".to_string(), "clapper".to_string()],
            action: Some(ViewAction {
                label: "Book now".to_string(),
                url: "https://cinema.example".to_string(),
            }),
        };

        let action = "view, Book now, https://cinema.example";
        assert_eq!(
            notification.headers(),
            vec![
                ("Title", "Showtimes Available 🎉".to_string()),
                ("Priority", "5".to_string()),
                ("Tags", "popcorn, clapper".to_string()),
                ("Actions", action.to_string()),
            ]
        );
    }

    #[test]
    fn headers_skip_empty_tags_and_action() {
        let notification = Notification {
            kind: NotificationKind::StillUnavailable,
            title: "No Showtimes yet".to_string(),
            message: "❌ Still no showtimes".to_string(),
            priority: Priority::Min,
            tags: Vec::new(),
            action: None,
        };

        let headers = notification.headers();
        let names: Vec<_> = headers.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec!["Title", "Priority"]);
    }

    #[test]
    fn priority_levels() {
        assert_eq!(Priority::Min.level(), 1);
        assert_eq!(Priority::Max.level(), 5);
        assert!(Priority::High > Priority::Low);
    }
}
