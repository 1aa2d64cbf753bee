//! Alias links: validate, look the user up, navigate.

use crate::domain::{AuthToken, User};
use crate::ports::{UserNavigationView, UserService};
use crate::presenters::failure_message;
use crate::presenters::guard::{BusyGuard, Lifetime};
use std::sync::Arc;
use tracing::{debug, warn};

pub const INVALID_ALIAS: &str = "Alias must start with @ and include at least one character.";
pub const USER_NOT_FOUND: &str = "User not found.";

pub struct UserNavigationPresenter {
    view: Arc<dyn UserNavigationView>,
    users: Arc<dyn UserService>,
    lifetime: Lifetime,
}

impl UserNavigationPresenter {
    pub fn new(view: Arc<dyn UserNavigationView>, users: Arc<dyn UserService>) -> Self {
        Self {
            view,
            users,
            lifetime: Lifetime::default(),
        }
    }

    pub fn detach(&self) {
        self.lifetime.cancel();
    }

    pub async fn go_to_user(&self, token: &AuthToken, alias: &str) {
        if !User::is_valid_alias(alias) {
            self.view.display_error_message(INVALID_ALIAS);
            return;
        }

        let _busy = BusyGuard::engage(&*self.view);
        match self.lifetime.guard(self.users.get_user(token, alias)).await {
            None => {}
            Some(Ok(Some(user))) => {
                debug!(alias = %user.alias, "navigating to user");
                self.view.navigate_to_user(user);
            }
            Some(Ok(None)) => self.view.display_error_message(USER_NOT_FOUND),
            Some(Err(e)) => {
                warn!(alias, error = %e, "user lookup failed");
                self.view
                    .display_error_message(&failure_message("get user", &e));
            }
        }
    }
}
