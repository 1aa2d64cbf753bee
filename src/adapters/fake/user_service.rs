//! Fake account service: lookup, login, registration.

use super::{FakeData, simulate_latency};
use crate::domain::{AuthToken, DomainError, ImageFile, User};
use crate::ports::UserService;
use crate::shared::image::encode_image;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct FakeUserService {
    data: Arc<FakeData>,
    delay: Duration,
}

impl FakeUserService {
    pub fn new(data: Arc<FakeData>) -> Self {
        Self::with_delay(data, 0)
    }

    pub fn with_delay(data: Arc<FakeData>, delay_ms: u64) -> Self {
        Self {
            data,
            delay: Duration::from_millis(delay_ms),
        }
    }
}

#[async_trait::async_trait]
impl UserService for FakeUserService {
    async fn get_user(&self, token: &AuthToken, alias: &str) -> Result<Option<User>, DomainError> {
        simulate_latency(self.delay).await;
        self.data.resolve_token(token)?;
        Ok(self.data.find_user(alias))
    }

    async fn login(&self, alias: &str, password: &str) -> Result<(User, AuthToken), DomainError> {
        simulate_latency(self.delay).await;
        let user = self
            .data
            .find_user(alias)
            .filter(|u| self.data.check_password(&u.alias, password))
            .ok_or_else(|| DomainError::Auth("Invalid alias or password".into()))?;
        let token = self.data.issue_token(&user.alias, Utc::now().timestamp_millis());
        info!(alias = %user.alias, "[FAKE] login accepted");
        Ok((user, token))
    }

    async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        alias: &str,
        password: &str,
        image: Option<&ImageFile>,
    ) -> Result<(User, AuthToken), DomainError> {
        simulate_latency(self.delay).await;
        let alias = User::canonical_alias(alias);
        if !User::is_valid_alias(&alias) || alias.contains(char::is_whitespace) {
            return Err(DomainError::Registration(format!("Invalid alias {alias}")));
        }
        let image_url = image
            .map(|file| encode_image(file).data_url())
            .unwrap_or_default();
        let user = User::new(first_name.trim(), last_name.trim(), alias, image_url);
        self.data.insert_user(user.clone(), password)?;
        let token = self.data.issue_token(&user.alias, Utc::now().timestamp_millis());
        info!(alias = %user.alias, "[FAKE] registered");
        Ok((user, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fake::DEMO_PASSWORD;

    #[tokio::test]
    async fn test_login_checks_password() {
        let service = FakeUserService::new(Arc::new(FakeData::seeded()));
        let (user, token) = service.login("@amy", DEMO_PASSWORD).await.unwrap();
        assert_eq!(user.alias, "@amy");
        assert!(!token.as_str().is_empty());

        let err = service.login("@amy", "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid alias or password");
        assert!(service.login("@nobody", DEMO_PASSWORD).await.is_err());
    }

    #[tokio::test]
    async fn test_register_stores_encoded_image() {
        let data = Arc::new(FakeData::seeded());
        let service = FakeUserService::new(Arc::clone(&data));
        let image = ImageFile::new("me.jpg", b"hi!".to_vec());
        let (user, token) = service
            .register("Zed", "Zimmer", "zed", "pw", Some(&image))
            .await
            .unwrap();

        assert_eq!(user.alias, "@zed");
        assert_eq!(user.image_url, "data:image/jpg;base64,aGkh");
        assert_eq!(service.get_user(&token, "@zed").await.unwrap(), Some(user));
        assert!(service.register("Zed", "Again", "@zed", "pw", None).await.is_err());
    }

    #[tokio::test]
    async fn test_get_user_requires_valid_token() {
        let service = FakeUserService::new(Arc::new(FakeData::seeded()));
        let bogus = AuthToken::new("bogus", 0);
        assert!(matches!(
            service.get_user(&bogus, "@amy").await,
            Err(DomainError::Auth(_))
        ));
    }
}
