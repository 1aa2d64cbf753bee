//! Logged-in session. Owned by the rendering surface; presenters only receive
//! pieces of it as call arguments.

use crate::domain::{AuthToken, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub current_user: Option<User>,
    pub displayed_user: Option<User>,
    pub auth_token: Option<AuthToken>,
    pub remember_me: bool,
}

impl Session {
    pub fn start(user: User, token: AuthToken, remember_me: bool) -> Self {
        Self {
            current_user: Some(user.clone()),
            displayed_user: Some(user),
            auth_token: Some(token),
            remember_me,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some() && self.auth_token.is_some()
    }

    /// True when the displayed user is someone other than the logged-in user.
    pub fn is_viewing_other(&self) -> bool {
        match (&self.current_user, &self.displayed_user) {
            (Some(current), Some(displayed)) => current != displayed,
            _ => false,
        }
    }
}
