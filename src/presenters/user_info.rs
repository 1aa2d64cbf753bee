//! Relationship between the logged-in user and the displayed user.
//!
//! Follow / unfollow take their post-state counts from the mutation's own
//! response; counts are not re-fetched afterwards.

use crate::domain::{AuthToken, RelationshipView, User};
use crate::ports::{FollowService, UserInfoView};
use crate::presenters::failure_message;
use crate::presenters::guard::{BusyGuard, InFlight, Lifetime, TransientMessage};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Follow,
    Unfollow,
}

impl Transition {
    fn target(self) -> bool {
        matches!(self, Transition::Follow)
    }

    fn progress(self, name: &str) -> String {
        match self {
            Transition::Follow => format!("Following {name}..."),
            Transition::Unfollow => format!("Unfollowing {name}..."),
        }
    }

    fn operation(self) -> &'static str {
        match self {
            Transition::Follow => "follow user",
            Transition::Unfollow => "unfollow user",
        }
    }
}

pub struct UserInfoPresenter {
    view: Arc<dyn UserInfoView>,
    follows: Arc<dyn FollowService>,
    relationship: Mutex<RelationshipView>,
    mutating: InFlight,
    lifetime: Lifetime,
}

impl UserInfoPresenter {
    pub fn new(view: Arc<dyn UserInfoView>, follows: Arc<dyn FollowService>) -> Self {
        Self {
            view,
            follows,
            relationship: Mutex::new(RelationshipView::default()),
            mutating: InFlight::default(),
            lifetime: Lifetime::default(),
        }
    }

    /// Last state pushed to the view.
    pub fn relationship(&self) -> RelationshipView {
        *self.relationship.lock()
    }

    pub fn detach(&self) {
        self.lifetime.cancel();
    }

    /// Load follower status and both counts. The three requests run
    /// concurrently and report their failures independently.
    pub async fn refresh(&self, token: &AuthToken, current_user: &User, displayed_user: &User) {
        tokio::join!(
            self.set_is_follower_status(token, current_user, displayed_user),
            self.set_numb_followees(token, displayed_user),
            self.set_numb_followers(token, displayed_user),
        );
    }

    pub async fn set_is_follower_status(
        &self,
        token: &AuthToken,
        current_user: &User,
        displayed_user: &User,
    ) {
        if current_user == displayed_user {
            if !self.lifetime.is_cancelled() {
                self.apply_is_follower(false);
            }
            return;
        }
        let query = self
            .follows
            .get_is_follower_status(token, current_user, displayed_user);
        match self.lifetime.guard(query).await {
            None => {}
            Some(Ok(is_follower)) => self.apply_is_follower(is_follower),
            Some(Err(e)) => {
                warn!(alias = %displayed_user.alias, error = %e, "follower status failed");
                self.view
                    .display_error_message(&failure_message("determine follower status", &e));
            }
        }
    }

    pub async fn set_numb_followees(&self, token: &AuthToken, user: &User) {
        match self.lifetime.guard(self.follows.get_followee_count(token, user)).await {
            None => {}
            Some(Ok(count)) => self.apply_followee_count(count),
            Some(Err(e)) => {
                warn!(alias = %user.alias, error = %e, "followee count failed");
                self.view
                    .display_error_message(&failure_message("get followees count", &e));
            }
        }
    }

    pub async fn set_numb_followers(&self, token: &AuthToken, user: &User) {
        match self.lifetime.guard(self.follows.get_follower_count(token, user)).await {
            None => {}
            Some(Ok(count)) => self.apply_follower_count(count),
            Some(Err(e)) => {
                warn!(alias = %user.alias, error = %e, "follower count failed");
                self.view
                    .display_error_message(&failure_message("get followers count", &e));
            }
        }
    }

    pub async fn on_follow_clicked(&self, token: Option<&AuthToken>, displayed_user: Option<&User>) {
        self.transition(Transition::Follow, token, displayed_user)
            .await;
    }

    pub async fn on_unfollow_clicked(
        &self,
        token: Option<&AuthToken>,
        displayed_user: Option<&User>,
    ) {
        self.transition(Transition::Unfollow, token, displayed_user)
            .await;
    }

    pub fn on_return_to_logged_in_user_clicked(&self, current_user: Option<&User>) {
        let Some(current_user) = current_user else {
            return;
        };
        self.view.set_displayed_user(current_user.clone());
        self.view.navigate_to_user(&current_user.alias);
    }

    async fn transition(
        &self,
        transition: Transition,
        token: Option<&AuthToken>,
        displayed_user: Option<&User>,
    ) {
        let (Some(token), Some(subject)) = (token, displayed_user) else {
            return;
        };
        let Some(_mutating) = self.mutating.try_begin() else {
            debug!(alias = %subject.alias, ?transition, "relationship change already in flight");
            return;
        };

        // Dropped in reverse: message removed first, then loading cleared.
        let _loading = BusyGuard::engage(&*self.view);
        let _toast = TransientMessage::show(&*self.view, &transition.progress(&subject.name()));

        let mutation = async {
            match transition {
                Transition::Follow => self.follows.follow(token, subject).await,
                Transition::Unfollow => self.follows.unfollow(token, subject).await,
            }
        };
        match self.lifetime.guard(mutation).await {
            None => debug!(alias = %subject.alias, "detached; dropping relationship change"),
            Some(Ok((followers, followees))) => {
                info!(alias = %subject.alias, ?transition, followers, followees, "relationship changed");
                self.apply_is_follower(transition.target());
                self.apply_follower_count(followers);
                self.apply_followee_count(followees);
            }
            Some(Err(e)) => {
                warn!(alias = %subject.alias, ?transition, error = %e, "relationship change failed");
                self.view
                    .display_error_message(&failure_message(transition.operation(), &e));
            }
        }
    }

    fn apply_is_follower(&self, is_follower: bool) {
        self.relationship.lock().is_follower = is_follower;
        self.view.set_is_follower(is_follower);
    }

    fn apply_follower_count(&self, count: i64) {
        self.relationship.lock().follower_count = count;
        self.view.set_follower_count(count);
    }

    fn apply_followee_count(&self, count: i64) {
        self.relationship.lock().followee_count = count;
        self.view.set_followee_count(count);
    }
}
