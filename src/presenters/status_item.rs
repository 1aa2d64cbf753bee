//! Feed / story pagination for one displayed user.
//!
//! - Cursor = last status of the most recent successful page
//! - A failed fetch leaves the cursor untouched, so a retry asks for the same page
//! - `reset()` starts a new generation; a page still in flight from the old one is dropped
//! - Keeps the displayed user in step with the alias in the route

use crate::domain::{AuthToken, FeedMode, PaginationState, User};
use crate::ports::{StatusItemView, StatusService, UserService};
use crate::presenters::failure_message;
use crate::presenters::guard::{InFlight, Lifetime};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

/// One pass over the stream, from the first page until the next reset.
#[derive(Debug)]
struct Generation {
    loading: InFlight,
    lifetime: Lifetime,
}

impl Generation {
    fn within(lifetime: &Lifetime) -> Self {
        Self {
            loading: InFlight::default(),
            lifetime: lifetime.child(),
        }
    }
}

/// Drives one infinite-scrolling status list.
pub struct StatusItemPresenter {
    view: Arc<dyn StatusItemView>,
    statuses: Arc<dyn StatusService>,
    users: Arc<dyn UserService>,
    mode: FeedMode,
    page: Mutex<PaginationState>,
    generation: Mutex<Arc<Generation>>,
    lifetime: Lifetime,
}

impl StatusItemPresenter {
    pub const PAGE_SIZE: usize = 10;

    pub fn new(
        view: Arc<dyn StatusItemView>,
        statuses: Arc<dyn StatusService>,
        users: Arc<dyn UserService>,
        mode: FeedMode,
    ) -> Self {
        let lifetime = Lifetime::default();
        Self {
            view,
            statuses,
            users,
            mode,
            page: Mutex::new(PaginationState::default()),
            generation: Mutex::new(Arc::new(Generation::within(&lifetime))),
            lifetime,
        }
    }

    pub fn mode(&self) -> FeedMode {
        self.mode
    }

    pub fn has_more_items(&self) -> bool {
        self.page.lock().has_more_items
    }

    pub fn pagination(&self) -> PaginationState {
        self.page.lock().clone()
    }

    /// Back to the first page. The caller clears its own rendered list.
    ///
    /// A load still in flight is abandoned and the next load is not blocked by it.
    pub fn reset(&self) {
        let mut page = self.page.lock();
        let fresh = Arc::new(Generation::within(&self.lifetime));
        let stale = std::mem::replace(&mut *self.generation.lock(), fresh);
        stale.lifetime.cancel();
        page.reset();
    }

    /// Stop applying results. Call when the list is torn down.
    pub fn detach(&self) {
        self.lifetime.cancel();
    }

    /// Fetch the page after the cursor and append it to the view.
    ///
    /// Skipped while another page is in flight or once the stream is exhausted.
    pub async fn load_more_items(&self, token: &AuthToken, alias: &str) {
        let generation = Arc::clone(&*self.generation.lock());
        let Some(_loading) = generation.loading.try_begin() else {
            debug!(mode = %self.mode, alias, "page request already in flight; skipping");
            return;
        };
        let cursor = {
            let page = self.page.lock();
            if !page.has_more_items {
                debug!(mode = %self.mode, alias, "stream exhausted; nothing to load");
                return;
            }
            page.cursor.clone()
        };

        let fetch = async {
            match self.mode {
                FeedMode::Feed => {
                    self.statuses
                        .load_more_feed(token, alias, Self::PAGE_SIZE, cursor.as_ref())
                        .await
                }
                FeedMode::Story => {
                    self.statuses
                        .load_more_story(token, alias, Self::PAGE_SIZE, cursor.as_ref())
                        .await
                }
            }
        };
        let Some(result) = generation.lifetime.guard(fetch).await else {
            debug!(mode = %self.mode, alias, "detached or reset; dropping page");
            return;
        };

        match result {
            Ok((items, has_more)) => {
                {
                    // Checked under the page lock, which `reset` also holds.
                    let mut page = self.page.lock();
                    if generation.lifetime.is_cancelled() {
                        debug!(mode = %self.mode, alias, "reset while loading; dropping page");
                        return;
                    }
                    page.advance(&items, has_more);
                }
                debug!(mode = %self.mode, alias, count = items.len(), has_more, "page loaded");
                self.view.add_items(items);
            }
            Err(e) => {
                warn!(mode = %self.mode, alias, error = %e, "page load failed");
                self.view
                    .display_error_message(&failure_message(&format!("load {}", self.mode), &e));
            }
        }
    }

    /// Adopt the user named by the route, unless it is already displayed.
    ///
    /// An alias with no matching user leaves the displayed user as it is.
    pub async fn sync_displayed_user_from_route(
        &self,
        token: Option<&AuthToken>,
        route_alias: Option<&str>,
        displayed_user: Option<&User>,
    ) {
        let (Some(token), Some(route_alias)) = (token, route_alias) else {
            return;
        };
        let route_alias = User::canonical_alias(route_alias);
        if displayed_user.is_some_and(|u| u.alias == route_alias) {
            return;
        }

        let lookup = self.users.get_user(token, &route_alias);
        let Some(result) = self.lifetime.guard(lookup).await else {
            return;
        };
        match result {
            Ok(Some(user)) => {
                debug!(alias = %user.alias, "displayed user synced from route");
                self.view.set_displayed_user(user);
            }
            Ok(None) => debug!(alias = %route_alias, "route names unknown user; ignoring"),
            Err(e) => {
                warn!(alias = %route_alias, error = %e, "route user lookup failed");
                self.view
                    .display_error_message(&failure_message("get user", &e));
            }
        }
    }
}
