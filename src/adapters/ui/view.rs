//! TerminalView: one object implementing every view port over shared `TuiState`.
//!
//! Presenters call in synchronously; the TUI loop reads the state back to
//! decide what to render and which presenter to call next.

use super::progress::BusySpinner;
use super::toaster::Toaster;
use crate::domain::{AuthToken, MessageId, RelationshipView, Route, Session, Status, User};
use crate::ports::{
    AuthView, BusyIndicator, MessageSink, RegisterView, StatusItemView, UserInfoView,
    UserNavigationView,
};
use crossterm::ExecutableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use parking_lot::Mutex;
use std::io::{Write, stdout};
use std::time::Duration;
use tracing::debug;

/// Client-side state owned by the rendering surface.
#[derive(Debug, Default)]
pub struct TuiState {
    pub session: Session,
    pub route: Option<Route>,
    /// Items rendered by the mounted status list.
    pub items: Vec<Status>,
    pub relationship: RelationshipView,
}

impl TuiState {
    /// The view's copy of the displayed user changed; drop what belonged to the old one.
    fn show_user(&mut self, user: User) {
        if self.session.displayed_user.as_ref() != Some(&user) {
            self.relationship = RelationshipView::default();
        }
        self.session.displayed_user = Some(user);
    }
}

#[derive(Default)]
pub struct TerminalView {
    state: Mutex<TuiState>,
    toaster: Toaster,
    spinner: BusySpinner,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the shared state.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut TuiState) -> R) -> R {
        f(&mut self.state.lock())
    }

    pub fn session(&self) -> Session {
        self.state.lock().session.clone()
    }

    pub fn route(&self) -> Option<Route> {
        self.state.lock().route.clone()
    }

    pub fn set_route(&self, route: Route) {
        debug!(%route, "navigate");
        self.state.lock().route = Some(route);
    }

    /// Drop the rendered list, e.g. when a new list is mounted.
    pub fn clear_items(&self) {
        self.state.lock().items.clear();
    }

    pub fn item_count(&self) -> usize {
        self.state.lock().items.len()
    }

    /// Profile header for the displayed user.
    pub fn render_profile(&self) {
        let (session, rel) = {
            let state = self.state.lock();
            (state.session.clone(), state.relationship)
        };
        let Some(displayed) = session.displayed_user.as_ref() else {
            return;
        };
        self.spinner.suspend(|| {
            let mut out = stdout();
            let _ = out.execute(Print("\r\n"));
            let _ = out.execute(SetAttribute(Attribute::Bold));
            let _ = out.execute(Print(format!("{} ", displayed.name())));
            let _ = out.execute(SetAttribute(Attribute::Reset));
            let _ = out.execute(SetForegroundColor(Color::DarkGrey));
            let _ = out.execute(Print(format!("{}\r\n", displayed.alias)));
            let _ = out.execute(ResetColor);
            if rel.counts_loaded() {
                let _ = out.execute(Print(format!(
                    "Followees: {} Followers: {}\r\n",
                    rel.followee_count, rel.follower_count
                )));
            }
            if session.is_viewing_other() {
                let badge = if rel.is_follower { "Following" } else { "Not following" };
                let _ = out.execute(Print(format!("[{badge}]\r\n")));
            }
            let _ = out.flush();
        });
    }

    fn render_status(status: &Status) {
        let mut out = stdout();
        let _ = out.execute(SetAttribute(Attribute::Bold));
        let _ = out.execute(Print(status.user.name()));
        let _ = out.execute(SetAttribute(Attribute::Reset));
        let _ = out.execute(SetForegroundColor(Color::Blue));
        let _ = out.execute(Print(format!(" {}", status.user.alias)));
        let _ = out.execute(SetForegroundColor(Color::DarkGrey));
        let _ = out.execute(Print(format!(" - {}\r\n", status.formatted_date())));
        let _ = out.execute(ResetColor);
        let _ = out.execute(Print(format!("  {}\r\n", status.post)));
        let _ = out.flush();
    }

    fn start_session(&self, user: User, token: AuthToken, remember_me: bool) {
        let mut state = self.state.lock();
        state.session = Session::start(user, token, remember_me);
        state.relationship = RelationshipView::default();
        state.items.clear();
    }

    fn navigate_path(&self, destination: &str) {
        match Route::parse(destination) {
            Some(route) => self.set_route(route),
            None => debug!(destination, "unroutable destination; staying put"),
        }
    }
}

impl MessageSink for TerminalView {
    fn display_info_message(&self, message: &str, duration: Duration) -> MessageId {
        self.spinner.suspend(|| self.toaster.info(message, duration))
    }

    fn display_error_message(&self, message: &str) {
        self.spinner.suspend(|| self.toaster.error(message));
    }

    fn delete_message(&self, id: &MessageId) {
        self.toaster.delete(id);
    }
}

impl BusyIndicator for TerminalView {
    fn set_busy(&self, busy: bool) {
        self.spinner.set_busy(busy);
    }
}

impl StatusItemView for TerminalView {
    fn add_items(&self, items: Vec<Status>) {
        self.spinner.suspend(|| {
            for status in &items {
                Self::render_status(status);
            }
        });
        self.state.lock().items.extend(items);
    }

    fn set_displayed_user(&self, user: User) {
        self.state.lock().show_user(user);
    }
}

impl UserInfoView for TerminalView {
    fn set_is_follower(&self, is_follower: bool) {
        self.state.lock().relationship.is_follower = is_follower;
    }

    fn set_follower_count(&self, count: i64) {
        self.state.lock().relationship.follower_count = count;
    }

    fn set_followee_count(&self, count: i64) {
        self.state.lock().relationship.followee_count = count;
    }

    fn set_displayed_user(&self, user: User) {
        self.state.lock().show_user(user);
    }

    fn navigate_to_user(&self, alias: &str) {
        let mut state = self.state.lock();
        let route = state
            .route
            .as_ref()
            .map(|r| r.with_alias(alias))
            .unwrap_or_else(|| Route::Feed(User::canonical_alias(alias)));
        state.route = Some(route);
    }
}

impl AuthView for TerminalView {
    fn on_logged_in(&self, user: User, token: AuthToken, remember_me: bool) {
        self.start_session(user, token, remember_me);
    }

    fn navigate_after_login(&self, destination: &str) {
        self.navigate_path(destination);
    }
}

impl RegisterView for TerminalView {
    fn on_registered(&self, user: User, token: AuthToken, remember_me: bool) {
        self.start_session(user, token, remember_me);
    }

    fn navigate_after_register(&self, destination: &str) {
        self.navigate_path(destination);
    }
}

impl UserNavigationView for TerminalView {
    fn navigate_to_user(&self, user: User) {
        let mut state = self.state.lock();
        let route = state
            .route
            .as_ref()
            .map(|r| r.with_alias(&user.alias))
            .unwrap_or_else(|| Route::Feed(user.alias.clone()));
        state.route = Some(route);
        state.show_user(user);
    }
}
