//! View ports. Presenters push state to the rendering surface through these.
//!
//! Views hold no business logic. All methods are synchronous callbacks.

use crate::domain::{AuthToken, MessageId, Status, User};
use std::time::Duration;

/// Toast-style messages with create/delete-by-id semantics.
pub trait MessageSink: Send + Sync {
    /// Show an informational message. A zero `duration` keeps it until deleted.
    fn display_info_message(&self, message: &str, duration: Duration) -> MessageId;

    fn display_error_message(&self, message: &str);

    /// Remove a message shown earlier. Unknown ids are ignored.
    fn delete_message(&self, id: &MessageId);
}

/// Busy / loading flag of one feature.
pub trait BusyIndicator: Send + Sync {
    fn set_busy(&self, busy: bool);
}

/// Infinite-scrolling list of statuses.
pub trait StatusItemView: MessageSink {
    /// Append a page to the rendered list.
    fn add_items(&self, items: Vec<Status>);

    /// Adopt `user` as the displayed user.
    fn set_displayed_user(&self, user: User);
}

/// Profile header with relationship state and follow controls.
pub trait UserInfoView: MessageSink + BusyIndicator {
    fn set_is_follower(&self, is_follower: bool);

    fn set_follower_count(&self, count: i64);

    fn set_followee_count(&self, count: i64);

    fn set_displayed_user(&self, user: User);

    /// Navigate the current feature to `alias`.
    fn navigate_to_user(&self, alias: &str);
}

/// Login form.
pub trait AuthView: MessageSink + BusyIndicator {
    fn on_logged_in(&self, user: User, token: AuthToken, remember_me: bool);

    fn navigate_after_login(&self, destination: &str);
}

/// Registration form.
pub trait RegisterView: MessageSink + BusyIndicator {
    fn on_registered(&self, user: User, token: AuthToken, remember_me: bool);

    fn navigate_after_register(&self, destination: &str);
}

/// Alias links inside status items.
pub trait UserNavigationView: MessageSink + BusyIndicator {
    fn navigate_to_user(&self, user: User);
}
