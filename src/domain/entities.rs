//! Domain entities. Pure data structures for the core business.
//!
//! No terminal/backend types here. Adapters map into these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A registered account. Identity is the alias; two `User` values with the
/// same alias are the same user regardless of the other fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    /// Canonical form starts with "@".
    pub alias: String,
    /// Avatar reference (URL or data URL).
    pub image_url: String,
}

impl User {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        alias: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            alias: Self::canonical_alias(&alias.into()),
            image_url: image_url.into(),
        }
    }

    /// Display name, "First Last".
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Route parameters may drop the leading "@"; put it back.
    pub fn canonical_alias(raw: &str) -> String {
        let raw = raw.trim();
        if raw.starts_with('@') {
            raw.to_string()
        } else {
            format!("@{raw}")
        }
    }

    /// "@" followed by at least one character.
    pub fn is_valid_alias(alias: &str) -> bool {
        alias.starts_with('@') && alias.chars().count() >= 2
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.alias == other.alias
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.alias.hash(state);
    }
}

/// Opaque session credential. Presenters pass it through untouched.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    token: String,
    /// Issue time, epoch millis.
    timestamp: i64,
}

impl AuthToken {
    pub fn new(token: impl Into<String>, timestamp: i64) -> Self {
        Self {
            token: token.into(),
            timestamp,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &"<redacted>")
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

/// A single post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub user: User,
    pub post: String,
    /// Epoch millis.
    pub timestamp: i64,
}

impl Status {
    pub fn new(user: User, post: impl Into<String>, timestamp: i64) -> Self {
        Self {
            user,
            post: post.into(),
            timestamp,
        }
    }

    /// e.g. "March 4, 2024, 9:05 PM" (UTC).
    pub fn formatted_date(&self) -> String {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
            .map(|dt| dt.format("%B %-d, %Y, %-I:%M %p").to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Which content stream a status list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    /// Posts from the users the displayed user follows.
    Feed,
    /// The displayed user's own posts.
    Story,
}

impl fmt::Display for FeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedMode::Feed => f.write_str("feed"),
            FeedMode::Story => f.write_str("story"),
        }
    }
}

/// Profile image attached at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Identifier of a toast shown by a view; required to delete it again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cursor-based paging position over one stream.
///
/// `has_more_items` starts `true` and only `reset()` can turn it back on
/// once a page reported the end of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    pub cursor: Option<Status>,
    pub has_more_items: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            cursor: None,
            has_more_items: true,
        }
    }
}

impl PaginationState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a successfully fetched page. An empty page keeps the cursor where it was.
    pub fn advance(&mut self, page: &[Status], has_more: bool) {
        self.has_more_items = self.has_more_items && has_more;
        if let Some(last) = page.last() {
            self.cursor = Some(last.clone());
        }
    }
}

/// Viewer's relationship to the displayed user as last pushed to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipView {
    pub is_follower: bool,
    /// `NOT_LOADED` until fetched.
    pub follower_count: i64,
    /// `NOT_LOADED` until fetched.
    pub followee_count: i64,
}

impl RelationshipView {
    pub const NOT_LOADED: i64 = -1;

    /// Counts may be rendered only once both are known.
    pub fn counts_loaded(&self) -> bool {
        self.follower_count > Self::NOT_LOADED && self.followee_count > Self::NOT_LOADED
    }
}

impl Default for RelationshipView {
    fn default() -> Self {
        Self {
            is_follower: false,
            follower_count: Self::NOT_LOADED,
            followee_count: Self::NOT_LOADED,
        }
    }
}
