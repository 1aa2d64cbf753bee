//! Outbound ports. Presenters call into the data layer.
//!
//! Implemented by adapters. Every call may fail with `DomainError`.

use crate::domain::{AuthToken, DomainError, ImageFile, Status, User};

/// One page of statuses and whether the stream continues after it.
pub type StatusPage = (Vec<Status>, bool);

/// Account lookup and authentication.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Look up a user by alias. `Ok(None)` when no such user exists.
    async fn get_user(&self, token: &AuthToken, alias: &str) -> Result<Option<User>, DomainError>;

    /// Authenticate. Invalid credentials are an `Err`.
    async fn login(&self, alias: &str, password: &str) -> Result<(User, AuthToken), DomainError>;

    /// Create an account and log it in. The image, if any, is encoded for
    /// transfer by the implementation.
    async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        alias: &str,
        password: &str,
        image: Option<&ImageFile>,
    ) -> Result<(User, AuthToken), DomainError>;
}

/// Paged status streams, most recent first.
///
/// `last_item` is the cursor: the last status of the previous page, or
/// `None` for the first page.
#[async_trait::async_trait]
pub trait StatusService: Send + Sync {
    async fn load_more_feed(
        &self,
        token: &AuthToken,
        alias: &str,
        page_size: usize,
        last_item: Option<&Status>,
    ) -> Result<StatusPage, DomainError>;

    async fn load_more_story(
        &self,
        token: &AuthToken,
        alias: &str,
        page_size: usize,
        last_item: Option<&Status>,
    ) -> Result<StatusPage, DomainError>;
}

/// Follower relationships and counts.
#[async_trait::async_trait]
pub trait FollowService: Send + Sync {
    /// Whether `viewer` follows `subject`.
    async fn get_is_follower_status(
        &self,
        token: &AuthToken,
        viewer: &User,
        subject: &User,
    ) -> Result<bool, DomainError>;

    async fn get_followee_count(&self, token: &AuthToken, user: &User) -> Result<i64, DomainError>;

    async fn get_follower_count(&self, token: &AuthToken, user: &User) -> Result<i64, DomainError>;

    /// Follow `subject` as the token's user. Returns the subject's new
    /// `(follower_count, followee_count)`.
    async fn follow(&self, token: &AuthToken, subject: &User) -> Result<(i64, i64), DomainError>;

    /// Unfollow `subject`. Same return shape as `follow`.
    async fn unfollow(&self, token: &AuthToken, subject: &User)
    -> Result<(i64, i64), DomainError>;
}
