//! Fake follow graph. The viewer of a mutation is the token's user.

use super::{FakeData, simulate_latency};
use crate::domain::{AuthToken, DomainError, User};
use crate::ports::FollowService;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct FakeFollowService {
    data: Arc<FakeData>,
    delay: Duration,
}

impl FakeFollowService {
    pub fn new(data: Arc<FakeData>) -> Self {
        Self::with_delay(data, 0)
    }

    pub fn with_delay(data: Arc<FakeData>, delay_ms: u64) -> Self {
        Self {
            data,
            delay: Duration::from_millis(delay_ms),
        }
    }

    async fn mutate(
        &self,
        token: &AuthToken,
        subject: &User,
        follow: bool,
    ) -> Result<(i64, i64), DomainError> {
        simulate_latency(self.delay).await;
        let viewer = self.data.resolve_token(token)?;
        if viewer == *subject {
            return Err(DomainError::Transport("cannot follow yourself".into()));
        }
        if self.data.find_user(&subject.alias).is_none() {
            return Err(DomainError::Transport(format!("unknown user {}", subject.alias)));
        }
        let counts = self.data.set_following(&viewer.alias, &subject.alias, follow);
        info!(viewer = %viewer.alias, subject = %subject.alias, follow, "[FAKE] relationship updated");
        Ok(counts)
    }
}

#[async_trait::async_trait]
impl FollowService for FakeFollowService {
    async fn get_is_follower_status(
        &self,
        token: &AuthToken,
        viewer: &User,
        subject: &User,
    ) -> Result<bool, DomainError> {
        simulate_latency(self.delay).await;
        self.data.resolve_token(token)?;
        Ok(self.data.is_following(&viewer.alias, &subject.alias))
    }

    async fn get_followee_count(&self, token: &AuthToken, user: &User) -> Result<i64, DomainError> {
        simulate_latency(self.delay).await;
        self.data.resolve_token(token)?;
        Ok(self.data.followee_count(&user.alias))
    }

    async fn get_follower_count(&self, token: &AuthToken, user: &User) -> Result<i64, DomainError> {
        simulate_latency(self.delay).await;
        self.data.resolve_token(token)?;
        Ok(self.data.follower_count(&user.alias))
    }

    async fn follow(&self, token: &AuthToken, subject: &User) -> Result<(i64, i64), DomainError> {
        self.mutate(token, subject, true).await
    }

    async fn unfollow(&self, token: &AuthToken, subject: &User) -> Result<(i64, i64), DomainError> {
        self.mutate(token, subject, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_follow_then_unfollow_round_trip() {
        let data = Arc::new(FakeData::seeded());
        let service = FakeFollowService::with_delay(Arc::clone(&data), 1);
        let token = data.issue_token("@bob", 0);
        let bob = data.find_user("@bob").unwrap();
        let amy = data.find_user("@amy").unwrap();

        assert!(!service.get_is_follower_status(&token, &bob, &amy).await.unwrap());
        let before = service.get_follower_count(&token, &amy).await.unwrap();

        let (followers, followees) = service.follow(&token, &amy).await.unwrap();
        assert_eq!(followers, before + 1);
        assert_eq!(followees, service.get_followee_count(&token, &amy).await.unwrap());
        assert!(service.get_is_follower_status(&token, &bob, &amy).await.unwrap());

        let (followers, _) = service.unfollow(&token, &amy).await.unwrap();
        assert_eq!(followers, before);
    }

    #[tokio::test]
    async fn test_cannot_follow_self() {
        let data = Arc::new(FakeData::seeded());
        let service = FakeFollowService::new(Arc::clone(&data));
        let token = data.issue_token("@bob", 0);
        let bob = data.find_user("@bob").unwrap();
        assert!(service.follow(&token, &bob).await.is_err());
    }
}
