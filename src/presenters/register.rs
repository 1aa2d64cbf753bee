//! Registration form.

use crate::domain::{ImageFile, Route};
use crate::ports::{RegisterView, UserService};
use crate::presenters::guard::{BusyGuard, Lifetime};
use std::sync::Arc;
use tracing::{info, warn};

pub const FIELDS_REQUIRED: &str = "All registration fields and a profile image are required.";

pub struct RegisterPresenter {
    view: Arc<dyn RegisterView>,
    users: Arc<dyn UserService>,
    lifetime: Lifetime,
}

impl RegisterPresenter {
    pub fn new(view: Arc<dyn RegisterView>, users: Arc<dyn UserService>) -> Self {
        Self {
            view,
            users,
            lifetime: Lifetime::default(),
        }
    }

    pub fn detach(&self) {
        self.lifetime.cancel();
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(
        &self,
        first_name: &str,
        last_name: &str,
        alias: &str,
        password: &str,
        image: Option<&ImageFile>,
    ) -> bool {
        !first_name.trim().is_empty()
            && !last_name.trim().is_empty()
            && !alias.trim().is_empty()
            && !password.is_empty()
            && image.is_some()
    }

    pub async fn do_register(
        &self,
        first_name: &str,
        last_name: &str,
        alias: &str,
        password: &str,
        remember_me: bool,
        image: Option<&ImageFile>,
    ) {
        if !self.can_submit(first_name, last_name, alias, password, image) {
            self.view.display_error_message(FIELDS_REQUIRED);
            return;
        }

        let _busy = BusyGuard::engage(&*self.view);
        let registration = self
            .users
            .register(first_name, last_name, alias, password, image);
        match self.lifetime.guard(registration).await {
            None => {}
            Some(Ok((user, token))) => {
                info!(alias = %user.alias, "registered");
                let destination = Route::landing_for(&user).path();
                self.view.on_registered(user, token, remember_me);
                self.view.navigate_after_register(&destination);
            }
            Some(Err(e)) => {
                warn!(alias, error = %e, "registration failed");
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

    fn presenter(users: StubUserService) -> (RegisterPresenter, Arc<RecordingView>, Arc<StubUserService>) {
        let view = Arc::new(RecordingView::default());
        let users = Arc::new(users);
        (RegisterPresenter::new(view.clone(), users.clone()), view, users)
    }

    fn image() -> ImageFile {
        ImageFile::new("me.png", vec![1, 2, 3])
    }

    #[test]
    fn test_can_submit_requires_every_field() {
        let (p, _view, _users) = presenter(StubUserService::default());
        let img = image();
        assert!(p.can_submit("Amy", "Ames", "@amy", "pw", Some(&img)));
        assert!(!p.can_submit("", "Ames", "@amy", "pw", Some(&img)));
        assert!(!p.can_submit("Amy", "", "@amy", "pw", Some(&img)));
        assert!(!p.can_submit("Amy", "Ames", "", "pw", Some(&img)));
        assert!(!p.can_submit("Amy", "Ames", "@amy", "", Some(&img)));
        assert!(!p.can_submit("Amy", "Ames", "@amy", "pw", None));
    }

    #[tokio::test]
    async fn test_incomplete_form_makes_no_call() {
        let (p, view, users) = presenter(StubUserService::default());
        p.do_register("Amy", "Ames", "@amy", "pw", false, None).await;
        assert_eq!(users.auth_calls(), 0);
        assert_eq!(view.events(), vec![ViewEvent::Error(FIELDS_REQUIRED.into())]);
    }

    #[tokio::test]
    async fn test_register_success_passes_image_and_navigates() {
        let (p, view, users) = presenter(StubUserService::default());
        let img = image();
        p.do_register("Amy", "Ames", "@amy", "pw", true, Some(&img))
            .await;

        assert_eq!(users.last_image.lock().clone(), Some(img));
        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Busy(true),
                ViewEvent::Registered {
                    user: user("@amy"),
                    remember_me: true
                },
                ViewEvent::NavigateAfterRegister("/feed/@amy".into()),
                ViewEvent::Busy(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_register_failure_clears_busy() {
        let (p, view, _users) = presenter(StubUserService {
            auth: Err(DomainError::Registration("Alias @amy is already taken".into())),
            ..StubUserService::default()
        });
        p.do_register("Amy", "Ames", "@amy", "pw", false, Some(&image()))
            .await;
        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Busy(true),
                ViewEvent::Error("Alias @amy is already taken".into()),
                ViewEvent::Busy(false),
            ]
        );
    }
}
