//! Test doubles for presenter tests: one recording view that implements every
//! view port, and scripted services.

use crate::domain::{AuthToken, DomainError, FeedMode, ImageFile, MessageId, Status, User};
use crate::ports::{
    AuthView, BusyIndicator, FollowService, MessageSink, RegisterView, StatusItemView, StatusPage,
    StatusService, UserInfoView, UserNavigationView, UserService,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

pub(crate) fn user(alias: &str) -> User {
    let name = alias.trim_start_matches('@');
    User::new(name, "Tester", alias, format!("https://img/{name}.png"))
}

pub(crate) fn token() -> AuthToken {
    AuthToken::new("token-1", 1_700_000_000_000)
}

/// `count` statuses by `alias`, newest first, timestamps descending from `start`.
pub(crate) fn statuses(alias: &str, count: usize, start: i64) -> Vec<Status> {
    (0..count)
        .map(|i| Status::new(user(alias), format!("post {i}"), start - i as i64))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ViewEvent {
    Busy(bool),
    Info(String),
    Error(String),
    Delete(MessageId),
    Items(Vec<Status>),
    DisplayedUser(User),
    IsFollower(bool),
    FollowerCount(i64),
    FolloweeCount(i64),
    NavigateAlias(String),
    NavigateUser(User),
    LoggedIn { user: User, remember_me: bool },
    Registered { user: User, remember_me: bool },
    NavigateAfterLogin(String),
    NavigateAfterRegister(String),
}

#[derive(Default)]
pub(crate) struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
    next_id: AtomicUsize,
}

impl RecordingView {
    fn push(&self, event: ViewEvent) {
        self.events.lock().push(event);
    }

    pub(crate) fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().clone()
    }

    pub(crate) fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn item_count(&self) -> usize {
        self.events()
            .iter()
            .map(|e| match e {
                ViewEvent::Items(items) => items.len(),
                _ => 0,
            })
            .sum()
    }

    pub(crate) fn displayed_users(&self) -> Vec<User> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::DisplayedUser(u) => Some(u),
                _ => None,
            })
            .collect()
    }
}

impl MessageSink for RecordingView {
    fn display_info_message(&self, message: &str, _duration: Duration) -> MessageId {
        let id = MessageId(format!("msg-{}", self.next_id.fetch_add(1, Ordering::SeqCst)));
        self.push(ViewEvent::Info(message.to_string()));
        id
    }

    fn display_error_message(&self, message: &str) {
        self.push(ViewEvent::Error(message.to_string()));
    }

    fn delete_message(&self, id: &MessageId) {
        self.push(ViewEvent::Delete(id.clone()));
    }
}

impl BusyIndicator for RecordingView {
    fn set_busy(&self, busy: bool) {
        self.push(ViewEvent::Busy(busy));
    }
}

impl StatusItemView for RecordingView {
    fn add_items(&self, items: Vec<Status>) {
        self.push(ViewEvent::Items(items));
    }

    fn set_displayed_user(&self, user: User) {
        self.push(ViewEvent::DisplayedUser(user));
    }
}

impl UserInfoView for RecordingView {
    fn set_is_follower(&self, is_follower: bool) {
        self.push(ViewEvent::IsFollower(is_follower));
    }

    fn set_follower_count(&self, count: i64) {
        self.push(ViewEvent::FollowerCount(count));
    }

    fn set_followee_count(&self, count: i64) {
        self.push(ViewEvent::FolloweeCount(count));
    }

    fn set_displayed_user(&self, user: User) {
        self.push(ViewEvent::DisplayedUser(user));
    }

    fn navigate_to_user(&self, alias: &str) {
        self.push(ViewEvent::NavigateAlias(alias.to_string()));
    }
}

impl AuthView for RecordingView {
    fn on_logged_in(&self, user: User, _token: AuthToken, remember_me: bool) {
        self.push(ViewEvent::LoggedIn { user, remember_me });
    }

    fn navigate_after_login(&self, destination: &str) {
        self.push(ViewEvent::NavigateAfterLogin(destination.to_string()));
    }
}

impl RegisterView for RecordingView {
    fn on_registered(&self, user: User, _token: AuthToken, remember_me: bool) {
        self.push(ViewEvent::Registered { user, remember_me });
    }

    fn navigate_after_register(&self, destination: &str) {
        self.push(ViewEvent::NavigateAfterRegister(destination.to_string()));
    }
}

impl UserNavigationView for RecordingView {
    fn navigate_to_user(&self, user: User) {
        self.push(ViewEvent::NavigateUser(user));
    }
}

/// Pauses a stub call until the test releases it.
#[derive(Default)]
pub(crate) struct Gate {
    pub(crate) entered: Notify,
    pub(crate) release: Notify,
}

impl Gate {
    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

/// Serves queued pages and records the cursor of every request.
#[derive(Default)]
pub(crate) struct StubStatusService {
    pages: Mutex<VecDeque<Result<StatusPage, DomainError>>>,
    requests: Mutex<Vec<(FeedMode, Option<Status>)>>,
    pub(crate) gate: Option<Gate>,
}

impl StubStatusService {
    pub(crate) fn with_pages(pages: Vec<Result<StatusPage, DomainError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    pub(crate) fn gated(mut self) -> Self {
        self.gate = Some(Gate::default());
        self
    }

    pub(crate) fn requests(&self) -> Vec<(FeedMode, Option<Status>)> {
        self.requests.lock().clone()
    }

    async fn serve(
        &self,
        mode: FeedMode,
        page_size: usize,
        last_item: Option<&Status>,
    ) -> Result<StatusPage, DomainError> {
        assert_eq!(page_size, 10);
        self.requests.lock().push((mode, last_item.cloned()));
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        self.pages
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok((Vec::new(), false)))
    }
}

#[async_trait::async_trait]
impl StatusService for StubStatusService {
    async fn load_more_feed(
        &self,
        _token: &AuthToken,
        _alias: &str,
        page_size: usize,
        last_item: Option<&Status>,
    ) -> Result<StatusPage, DomainError> {
        self.serve(FeedMode::Feed, page_size, last_item).await
    }

    async fn load_more_story(
        &self,
        _token: &AuthToken,
        _alias: &str,
        page_size: usize,
        last_item: Option<&Status>,
    ) -> Result<StatusPage, DomainError> {
        self.serve(FeedMode::Story, page_size, last_item).await
    }
}

/// Fixed answers for user lookup and authentication, with call counters.
pub(crate) struct StubUserService {
    pub(crate) lookup: Result<Option<User>, DomainError>,
    pub(crate) auth: Result<(User, AuthToken), DomainError>,
    pub(crate) lookups: AtomicUsize,
    pub(crate) logins: AtomicUsize,
    pub(crate) registrations: AtomicUsize,
    pub(crate) last_image: Mutex<Option<ImageFile>>,
}

impl Default for StubUserService {
    fn default() -> Self {
        Self {
            lookup: Ok(None),
            auth: Ok((user("@amy"), token())),
            lookups: AtomicUsize::new(0),
            logins: AtomicUsize::new(0),
            registrations: AtomicUsize::new(0),
            last_image: Mutex::new(None),
        }
    }
}

impl StubUserService {
    pub(crate) fn finding(user: User) -> Self {
        Self {
            lookup: Ok(Some(user)),
            ..Self::default()
        }
    }

    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub(crate) fn auth_calls(&self) -> usize {
        self.logins.load(Ordering::SeqCst) + self.registrations.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl UserService for StubUserService {
    async fn get_user(&self, _token: &AuthToken, _alias: &str) -> Result<Option<User>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.lookup.clone()
    }

    async fn login(&self, _alias: &str, _password: &str) -> Result<(User, AuthToken), DomainError> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        self.auth.clone()
    }

    async fn register(
        &self,
        _first_name: &str,
        _last_name: &str,
        _alias: &str,
        _password: &str,
        image: Option<&ImageFile>,
    ) -> Result<(User, AuthToken), DomainError> {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        *self.last_image.lock() = image.cloned();
        self.auth.clone()
    }
}

/// Fixed relationship answers; records which operations were called.
pub(crate) struct StubFollowService {
    pub(crate) is_follower: Result<bool, DomainError>,
    pub(crate) followees: Result<i64, DomainError>,
    pub(crate) followers: Result<i64, DomainError>,
    pub(crate) mutation: Result<(i64, i64), DomainError>,
    pub(crate) calls: Mutex<Vec<&'static str>>,
    pub(crate) gate: Option<Gate>,
}

impl Default for StubFollowService {
    fn default() -> Self {
        Self {
            is_follower: Ok(false),
            followees: Ok(3),
            followers: Ok(4),
            mutation: Ok((5, 3)),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }
}

impl StubFollowService {
    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    async fn record(&self, call: &'static str) {
        self.calls.lock().push(call);
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
    }
}

#[async_trait::async_trait]
impl FollowService for StubFollowService {
    async fn get_is_follower_status(
        &self,
        _token: &AuthToken,
        _viewer: &User,
        _subject: &User,
    ) -> Result<bool, DomainError> {
        self.record("is_follower").await;
        self.is_follower.clone()
    }

    async fn get_followee_count(&self, _token: &AuthToken, _user: &User) -> Result<i64, DomainError> {
        self.record("followees").await;
        self.followees.clone()
    }

    async fn get_follower_count(&self, _token: &AuthToken, _user: &User) -> Result<i64, DomainError> {
        self.record("followers").await;
        self.followers.clone()
    }

    async fn follow(&self, _token: &AuthToken, _subject: &User) -> Result<(i64, i64), DomainError> {
        self.record("follow").await;
        self.mutation.clone()
    }

    async fn unfollow(&self, _token: &AuthToken, _subject: &User) -> Result<(i64, i64), DomainError> {
        self.record("unfollow").await;
        self.mutation.clone()
    }
}
