//! Login form: credential validation, authentication, post-login navigation.

use crate::domain::Route;
use crate::ports::{AuthView, UserService};
use crate::presenters::guard::{BusyGuard, Lifetime};
use std::sync::Arc;
use tracing::{info, warn};

pub const CREDENTIALS_REQUIRED: &str = "Alias and password are required.";

pub struct AuthPresenter {
    view: Arc<dyn AuthView>,
    users: Arc<dyn UserService>,
    lifetime: Lifetime,
}

impl AuthPresenter {
    pub fn new(view: Arc<dyn AuthView>, users: Arc<dyn UserService>) -> Self {
        Self {
            view,
            users,
            lifetime: Lifetime::default(),
        }
    }

    pub fn detach(&self) {
        self.lifetime.cancel();
    }

    /// Log in and navigate to `original_url`, or to the user's feed when none was given.
    pub async fn login(
        &self,
        alias: &str,
        password: &str,
        remember_me: bool,
        original_url: Option<&str>,
    ) {
        if alias.trim().is_empty() || password.is_empty() {
            self.view.display_error_message(CREDENTIALS_REQUIRED);
            return;
        }

        let _busy = BusyGuard::engage(&*self.view);
        match self.lifetime.guard(self.users.login(alias, password)).await {
            None => {}
            Some(Ok((user, token))) => {
                info!(alias = %user.alias, remember_me, "logged in");
                let destination = original_url
                    .filter(|url| !url.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| Route::landing_for(&user).path());
                self.view.on_logged_in(user, token, remember_me);
                self.view.navigate_after_login(&destination);
            }
            Some(Err(e)) => {
                warn!(alias, error = %e, "login failed");
                self.view.display_error_message(&e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::presenters::test_support::{RecordingView, StubUserService, ViewEvent, user};

    fn presenter(users: StubUserService) -> (AuthPresenter, Arc<RecordingView>, Arc<StubUserService>) {
        let view = Arc::new(RecordingView::default());
        let users = Arc::new(users);
        (AuthPresenter::new(view.clone(), users.clone()), view, users)
    }

    #[tokio::test]
    async fn test_empty_credentials_short_circuit() {
        let (p, view, users) = presenter(StubUserService::default());
        p.login("", "x", false, None).await;
        p.login("x", "", false, None).await;
        assert_eq!(users.auth_calls(), 0);
        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Error(CREDENTIALS_REQUIRED.into()),
                ViewEvent::Error(CREDENTIALS_REQUIRED.into())
            ]
        );
    }

    #[tokio::test]
    async fn test_login_navigates_to_feed_by_default() {
        let (p, view, _users) = presenter(StubUserService::default());
        p.login("@amy", "pw", true, None).await;
        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Busy(true),
                ViewEvent::LoggedIn {
                    user: user("@amy"),
                    remember_me: true
                },
                ViewEvent::NavigateAfterLogin("/feed/@amy".into()),
                ViewEvent::Busy(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_login_returns_to_original_url() {
        let (p, view, _users) = presenter(StubUserService::default());
        p.login("@amy", "pw", false, Some("/story/@bob")).await;
        assert!(
            view.events()
                .contains(&ViewEvent::NavigateAfterLogin("/story/@bob".into()))
        );
    }

    #[tokio::test]
    async fn test_login_failure_reports_message() {
        let (p, view, _users) = presenter(StubUserService {
            auth: Err(DomainError::Auth("Invalid alias or password".into())),
            ..StubUserService::default()
        });
        p.login("@amy", "bad", false, None).await;
        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Busy(true),
                ViewEvent::Error("Invalid alias or password".into()),
                ViewEvent::Busy(false),
            ]
        );
    }
}
