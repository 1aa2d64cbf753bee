//! Deterministic in-memory data set: users, statuses, follow graph, tokens.

use crate::domain::{AuthToken, DomainError, Status, User};
use crate::ports::StatusPage;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};

/// Password of every seeded account.
pub const DEMO_PASSWORD: &str = "password";

const ROSTER: &[(&str, &str, &str)] = &[
    ("Allen", "Anderson", "@allen"),
    ("Amy", "Ames", "@amy"),
    ("Bob", "Bobson", "@bob"),
    ("Bonnie", "Beatty", "@bonnie"),
    ("Chris", "Colston", "@chris"),
    ("Cindy", "Coats", "@cindy"),
    ("Dan", "Donaldson", "@dan"),
    ("Dee", "Dempsey", "@dee"),
    ("Elliott", "Enderson", "@elliott"),
    ("Elizabeth", "Engle", "@elizabeth"),
    ("Frank", "Frandson", "@frank"),
    ("Fran", "Franklin", "@fran"),
];

const POSTS: &[&str] = &[
    "Morning run done, coffee next. Anyone up for lunch, {mention}?",
    "Reading about cursor-based pagination. Offsets are a trap.",
    "Great talk today with {mention} about async Rust.",
    "Weekend plan: hike, nap, repeat.",
    "Shipping the new build tonight. Wish me luck!",
    "Does anyone else keep tabs open for weeks? Asking for {mention}.",
];

const POSTS_PER_USER: usize = 6;
const FOLLOWS_PER_USER: usize = 5;
/// Newest seeded post; older posts step back one hour each.
const SEED_EPOCH_MS: i64 = 1_709_586_300_000;
const HOUR_MS: i64 = 3_600_000;

#[derive(Debug, Default)]
struct Inner {
    /// Roster order is preserved for deterministic output.
    users: Vec<User>,
    passwords: HashMap<String, String>,
    /// Newest first.
    statuses: Vec<Status>,
    /// alias -> aliases they follow.
    followees: HashMap<String, BTreeSet<String>>,
}

/// Shared backing store for the fake services.
#[derive(Debug)]
pub struct FakeData {
    inner: RwLock<Inner>,
}

impl Default for FakeData {
    fn default() -> Self {
        Self::seeded()
    }
}

impl FakeData {
    /// Empty store. Useful for tests that build their own world.
    pub fn empty() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// The demo world: twelve users, six posts each, everyone follows the next five.
    pub fn seeded() -> Self {
        let users: Vec<User> = ROSTER
            .iter()
            .map(|(first, last, alias)| {
                let handle = alias.trim_start_matches('@');
                User::new(
                    *first,
                    *last,
                    *alias,
                    format!("https://example.com/avatars/{handle}.png"),
                )
            })
            .collect();
        let n = users.len();

        let mut statuses = Vec::with_capacity(n * POSTS_PER_USER);
        for round in 0..POSTS_PER_USER {
            for (j, author) in users.iter().enumerate() {
                let mention = &users[(j + round + 1) % n].alias;
                let post = POSTS[(j + round) % POSTS.len()].replace("{mention}", mention);
                let age = (round * n + j) as i64;
                statuses.push(Status::new(author.clone(), post, SEED_EPOCH_MS - age * HOUR_MS));
            }
        }

        let followees = users
            .iter()
            .enumerate()
            .map(|(j, u)| {
                let follows = (1..=FOLLOWS_PER_USER)
                    .map(|k| users[(j + k) % n].alias.clone())
                    .collect();
                (u.alias.clone(), follows)
            })
            .collect();

        let passwords = users
            .iter()
            .map(|u| (u.alias.clone(), DEMO_PASSWORD.to_string()))
            .collect();

        Self {
            inner: RwLock::new(Inner {
                users,
                passwords,
                statuses,
                followees,
            }),
        }
    }

    pub fn find_user(&self, alias: &str) -> Option<User> {
        let alias = User::canonical_alias(alias);
        self.inner
            .read()
            .users
            .iter()
            .find(|u| u.alias == alias)
            .cloned()
    }

    pub fn users(&self) -> Vec<User> {
        self.inner.read().users.clone()
    }

    /// Add an account. Fails if the alias is taken.
    pub fn insert_user(&self, user: User, password: &str) -> Result<(), DomainError> {
        let mut inner = self.inner.write();
        if inner.users.iter().any(|u| u.alias == user.alias) {
            return Err(DomainError::Registration(format!(
                "Alias {} is already taken",
                user.alias
            )));
        }
        inner.passwords.insert(user.alias.clone(), password.to_string());
        inner.followees.entry(user.alias.clone()).or_default();
        inner.users.push(user);
        Ok(())
    }

    /// Add a post at the head of the timeline.
    pub fn post(&self, status: Status) {
        let mut inner = self.inner.write();
        let at = inner
            .statuses
            .iter()
            .position(|s| s.timestamp <= status.timestamp)
            .unwrap_or(inner.statuses.len());
        inner.statuses.insert(at, status);
    }

    pub fn check_password(&self, alias: &str, password: &str) -> bool {
        self.inner
            .read()
            .passwords
            .get(alias)
            .is_some_and(|p| p == password)
    }

    /// Issue a token for `alias`. The token embeds the alias so it survives a restart
    /// of this process as long as the account does.
    pub fn issue_token(&self, alias: &str, now_ms: i64) -> AuthToken {
        let value = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(alias),
            uuid::Uuid::new_v4().simple()
        );
        AuthToken::new(value, now_ms)
    }

    /// The account a token was issued for.
    pub fn resolve_token(&self, token: &AuthToken) -> Result<User, DomainError> {
        let expired = || DomainError::Auth("Session expired; please log in again".into());
        let (encoded, _) = token.as_str().split_once('.').ok_or_else(expired)?;
        let alias = URL_SAFE_NO_PAD
            .decode(encoded)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or_else(expired)?;
        self.find_user(&alias).ok_or_else(expired)
    }

    pub fn is_following(&self, viewer: &str, subject: &str) -> bool {
        self.inner
            .read()
            .followees
            .get(viewer)
            .is_some_and(|f| f.contains(subject))
    }

    pub fn followee_count(&self, alias: &str) -> i64 {
        self.inner
            .read()
            .followees
            .get(alias)
            .map_or(0, |f| f.len() as i64)
    }

    pub fn follower_count(&self, alias: &str) -> i64 {
        self.inner
            .read()
            .followees
            .values()
            .filter(|f| f.contains(alias))
            .count() as i64
    }

    /// Set whether `viewer` follows `subject`; returns the subject's
    /// `(follower_count, followee_count)` afterwards.
    pub fn set_following(&self, viewer: &str, subject: &str, follow: bool) -> (i64, i64) {
        {
            let mut inner = self.inner.write();
            let follows = inner.followees.entry(viewer.to_string()).or_default();
            if follow {
                follows.insert(subject.to_string());
            } else {
                follows.remove(subject);
            }
        }
        (self.follower_count(subject), self.followee_count(subject))
    }

    /// Posts by the users `alias` follows.
    pub fn feed_page(&self, alias: &str, page_size: usize, last: Option<&Status>) -> StatusPage {
        let inner = self.inner.read();
        let follows = inner.followees.get(alias).cloned().unwrap_or_default();
        let items: Vec<&Status> = inner
            .statuses
            .iter()
            .filter(|s| follows.contains(&s.user.alias))
            .collect();
        page_after(&items, page_size, last)
    }

    /// Posts by `alias`.
    pub fn story_page(&self, alias: &str, page_size: usize, last: Option<&Status>) -> StatusPage {
        let inner = self.inner.read();
        let items: Vec<&Status> = inner
            .statuses
            .iter()
            .filter(|s| s.user.alias == alias)
            .collect();
        page_after(&items, page_size, last)
    }
}

/// The `page_size` items after `last` (or from the start), and whether more remain.
fn page_after(items: &[&Status], page_size: usize, last: Option<&Status>) -> StatusPage {
    let start = match last {
        None => 0,
        Some(cursor) => items
            .iter()
            .position(|s| *s == cursor)
            .map(|i| i + 1)
            // Cursor no longer present: continue with anything older than it.
            .unwrap_or_else(|| {
                items
                    .iter()
                    .position(|s| s.timestamp < cursor.timestamp)
                    .unwrap_or(items.len())
            }),
    };
    let end = (start + page_size).min(items.len());
    let page = items[start..end].iter().map(|s| (*s).clone()).collect();
    (page, end < items.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let data = FakeData::seeded();
        assert_eq!(data.users().len(), ROSTER.len());
        assert_eq!(data.followee_count("@amy"), FOLLOWS_PER_USER as i64);
        assert_eq!(data.follower_count("@amy"), FOLLOWS_PER_USER as i64);
        assert!(data.is_following("@amy", "@bob"));
        assert!(!data.is_following("@bob", "@amy"));
    }

    #[test]
    fn test_story_pages_cover_all_posts_once() {
        let data = FakeData::seeded();
        let (first, more) = data.story_page("@amy", 4, None);
        assert_eq!(first.len(), 4);
        assert!(more);
        let (second, more) = data.story_page("@amy", 4, first.last());
        assert_eq!(second.len(), POSTS_PER_USER - 4);
        assert!(!more);
        assert!(first.iter().chain(&second).all(|s| s.user.alias == "@amy"));
        assert!(first[0].timestamp > second[0].timestamp);
    }

    #[test]
    fn test_feed_contains_only_followees() {
        let data = FakeData::seeded();
        let (page, _) = data.feed_page("@amy", 100, None);
        assert_eq!(page.len(), FOLLOWS_PER_USER * POSTS_PER_USER);
        assert!(page.iter().all(|s| data.is_following("@amy", &s.user.alias)));
        assert!(page.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn test_token_round_trip() {
        let data = FakeData::seeded();
        let token = data.issue_token("@bob", 1);
        assert_eq!(data.resolve_token(&token).unwrap().alias, "@bob");
        assert!(data.resolve_token(&AuthToken::new("garbage", 1)).is_err());
    }

    #[test]
    fn test_set_following_returns_subject_counts() {
        let data = FakeData::seeded();
        let before = data.follower_count("@amy");
        let (followers, followees) = data.set_following("@bob", "@amy", true);
        assert_eq!(followers, before + 1);
        assert_eq!(followees, data.followee_count("@amy"));
        let (followers, _) = data.set_following("@bob", "@amy", false);
        assert_eq!(followers, before);
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let data = FakeData::seeded();
        let err = data
            .insert_user(User::new("A", "B", "@amy", ""), "pw")
            .unwrap_err();
        assert!(matches!(err, DomainError::Registration(_)));
    }
}
