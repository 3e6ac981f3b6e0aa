//! Interaction policy: time windows and the reaction allow-list

use chrono::{DateTime, Duration, Utc};

/// Reactions accepted when no allow-list is configured
pub const DEFAULT_REACTIONS: [&str; 10] = [
    "😘", "☺️", "😌", "😴", "🤢", "🤣", "🥹", "😡", "🤍", "😭",
];

/// Fixed set of emoji a comment may be reacted with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionAllowList(Vec<String>);

impl ReactionAllowList {
    /// Build from configured entries, dropping blanks and duplicates.
    /// An empty result falls back to [`DEFAULT_REACTIONS`].
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if !entry.is_empty() && !list.iter().any(|e| e == entry) {
                list.push(entry.to_string());
            }
        }

        if list.is_empty() {
            Self::default()
        } else {
            Self(list)
        }
    }

    pub fn contains(&self, emoji: &str) -> bool {
        self.0.iter().any(|e| e == emoji)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Comma separated list for error messages
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl Default for ReactionAllowList {
    fn default() -> Self {
        Self(DEFAULT_REACTIONS.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Rules the engine applies to comment lifecycles and reactions
#[derive(Debug, Clone)]
pub struct CommentPolicy {
    /// How long after creation the author may edit
    pub edit_window: Duration,
    /// How long after creation a non-admin owner may delete
    pub delete_window: Duration,
    pub reactions: ReactionAllowList,
}

impl CommentPolicy {
    pub const DEFAULT_EDIT_WINDOW_SECS: i64 = 5 * 60;
    pub const DEFAULT_DELETE_WINDOW_SECS: i64 = 7 * 24 * 60 * 60;

    /// Inclusive: an edit exactly at the window edge is still allowed
    pub fn can_edit(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - created_at <= self.edit_window
    }

    /// Inclusive, like [`Self::can_edit`]
    pub fn can_delete(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - created_at <= self.delete_window
    }
}

impl Default for CommentPolicy {
    fn default() -> Self {
        Self {
            edit_window: Duration::seconds(Self::DEFAULT_EDIT_WINDOW_SECS),
            delete_window: Duration::seconds(Self::DEFAULT_DELETE_WINDOW_SECS),
            reactions: ReactionAllowList::default(),
        }
    }
}
