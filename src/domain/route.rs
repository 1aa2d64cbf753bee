//! Client-side routes. The rendering surface owns navigation; presenters only
//! compute where to go.

use crate::domain::User;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    /// Feed of the user with this alias.
    Feed(String),
    /// Story of the user with this alias.
    Story(String),
}

impl Route {
    /// Where a freshly authenticated user lands.
    pub fn landing_for(user: &User) -> Self {
        Route::Feed(user.alias.clone())
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Feed(alias) => format!("/feed/{alias}"),
            Route::Story(alias) => format!("/story/{alias}"),
        }
    }

    /// Parse an absolute path. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let mut segments = path.trim_matches('/').split('/');
        let head = segments.next()?;
        let param = segments.next().filter(|s| !s.is_empty());
        if segments.next().is_some() {
            return None;
        }
        match (head, param) {
            ("login", None) => Some(Route::Login),
            ("register", None) => Some(Route::Register),
            ("feed", Some(alias)) => Some(Route::Feed(User::canonical_alias(alias))),
            ("story", Some(alias)) => Some(Route::Story(User::canonical_alias(alias))),
            _ => None,
        }
    }

    /// The alias named by the route parameter, if any.
    pub fn displayed_alias(&self) -> Option<&str> {
        match self {
            Route::Feed(alias) | Route::Story(alias) => Some(alias),
            Route::Login | Route::Register => None,
        }
    }

    /// Same feature, different user. Routes without a user stay as they are.
    pub fn with_alias(&self, alias: &str) -> Self {
        let alias = User::canonical_alias(alias);
        match self {
            Route::Feed(_) => Route::Feed(alias),
            Route::Story(_) => Route::Story(alias),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
