//! Implements InputPort. Inquire-based menu loop over the presenters.
//!
//! Mirrors a routed front end: the route names a feature and a user, a status
//! list is mounted per (feature, user) and torn down when either changes.

use super::view::TerminalView;
use crate::domain::{DomainError, FeedMode, ImageFile, Route, Session};
use crate::ports::{
    FollowService, InputPort, SessionStore, StatusItemView, StatusService, UserService,
};
use crate::presenters::{
    AuthPresenter, RegisterPresenter, StatusItemPresenter, UserInfoPresenter,
    UserNavigationPresenter,
};
use async_trait::async_trait;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Confirm, Password, Select, Text};
use parking_lot::Mutex;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Theme for every inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("»").with_fg(Color::LightCyan))
        .with_highlighted_option_prefix(Styled::new("›").with_fg(Color::LightCyan));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuestAction {
    SignIn,
    Register,
    Quit,
}

impl fmt::Display for GuestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GuestAction::SignIn => "Sign in",
            GuestAction::Register => "Register",
            GuestAction::Quit => "Quit",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberAction {
    LoadMore,
    Switch(FeedMode),
    GoToUser,
    Follow,
    Unfollow,
    ReturnToSelf,
    Logout,
    Quit,
}

impl fmt::Display for MemberAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberAction::LoadMore => f.write_str("Load more"),
            MemberAction::Switch(mode) => write!(f, "Show {mode}"),
            MemberAction::GoToUser => f.write_str("Go to user..."),
            MemberAction::Follow => f.write_str("Follow"),
            MemberAction::Unfollow => f.write_str("Unfollow"),
            MemberAction::ReturnToSelf => f.write_str("Return to logged in user"),
            MemberAction::Logout => f.write_str("Logout"),
            MemberAction::Quit => f.write_str("Quit"),
        }
    }
}

/// Status list mounted for one route.
struct Mounted {
    route: Route,
    presenter: Arc<StatusItemPresenter>,
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    view: Arc<TerminalView>,
    users: Arc<dyn UserService>,
    statuses: Arc<dyn StatusService>,
    sessions: Arc<dyn SessionStore>,
    auth: AuthPresenter,
    register: RegisterPresenter,
    navigation: UserNavigationPresenter,
    user_info: UserInfoPresenter,
    mounted: Mutex<Option<Mounted>>,
    /// Alias whose relationship was last loaded into the profile header.
    profile_alias: Mutex<Option<String>>,
}

impl TuiInputPort {
    pub fn new(
        view: Arc<TerminalView>,
        users: Arc<dyn UserService>,
        statuses: Arc<dyn StatusService>,
        follows: Arc<dyn FollowService>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            auth: AuthPresenter::new(view.clone(), Arc::clone(&users)),
            register: RegisterPresenter::new(view.clone(), Arc::clone(&users)),
            navigation: UserNavigationPresenter::new(view.clone(), Arc::clone(&users)),
            user_info: UserInfoPresenter::new(view.clone(), follows),
            view,
            users,
            statuses,
            sessions,
            mounted: Mutex::new(None),
            profile_alias: Mutex::new(None),
        }
    }

    /// Restore a remembered session, if any. A session the backend no longer
    /// accepts is forgotten.
    async fn restore_session(&self) {
        let session = match self.sessions.load().await {
            Ok(Some(session)) => session,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "could not load remembered session");
                return;
            }
        };
        let (Some(token), Some(current)) = (&session.auth_token, &session.current_user) else {
            return;
        };
        match self.users.get_user(token, &current.alias).await {
            Ok(Some(user)) => {
                info!(alias = %user.alias, "restored remembered session");
                let landing = Route::landing_for(&user);
                self.view.with_state(|s| {
                    s.session = Session {
                        current_user: Some(user.clone()),
                        displayed_user: Some(user),
                        ..session.clone()
                    };
                    s.route = Some(landing);
                });
            }
            Ok(None) | Err(_) => {
                warn!(alias = %current.alias, "remembered session rejected; clearing");
                if let Err(e) = self.sessions.clear().await {
                    warn!(error = %e, "could not clear remembered session");
                }
            }
        }
    }

    async fn persist_session(&self) {
        let session = self.view.session();
        if !session.is_authenticated() {
            return;
        }
        let result = if session.remember_me {
            self.sessions.save(&session).await
        } else {
            self.sessions.clear().await
        };
        if let Err(e) = result {
            warn!(error = %e, "could not persist session");
        }
    }

    async fn guest_turn(&self) -> Result<bool, DomainError> {
        let choice = Select::new(
            "Welcome to Tweeter",
            vec![GuestAction::SignIn, GuestAction::Register, GuestAction::Quit],
        )
        .prompt();
        match prompt_result(choice)? {
            None | Some(GuestAction::Quit) => Ok(false),
            Some(GuestAction::SignIn) => {
                self.sign_in().await?;
                Ok(true)
            }
            Some(GuestAction::Register) => {
                self.sign_up().await?;
                Ok(true)
            }
        }
    }

    async fn sign_in(&self) -> Result<(), DomainError> {
        let alias = ask(Text::new("Alias:").prompt())?;
        let password = ask(Password::new("Password:").without_confirmation().prompt())?;
        let remember = ask(Confirm::new("Remember me?").with_default(false).prompt())?;
        // A deep link captured before login, if the user was sent here from one.
        let original_url = self
            .view
            .route()
            .filter(|r| r.displayed_alias().is_some())
            .map(|r| r.path());
        self.auth
            .login(&alias, &password, remember, original_url.as_deref())
            .await;
        self.persist_session().await;
        Ok(())
    }

    async fn sign_up(&self) -> Result<(), DomainError> {
        let first = ask(Text::new("First name:").prompt())?;
        let last = ask(Text::new("Last name:").prompt())?;
        let alias = ask(Text::new("Alias:").prompt())?;
        let password = ask(Password::new("Password:").prompt())?;
        let image_path = ask(Text::new("Profile image path:").prompt())?;
        let remember = ask(Confirm::new("Remember me?").with_default(false).prompt())?;

        let image = self.read_image(&image_path).await;
        self.register
            .do_register(&first, &last, &alias, &password, remember, image.as_ref())
            .await;
        self.persist_session().await;
        Ok(())
    }

    async fn read_image(&self, path: &str) -> Option<ImageFile> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let name = Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string());
                Some(ImageFile::new(name, bytes))
            }
            Err(e) => {
                self.view_error(&format!("Could not read {path}: {e}"));
                None
            }
        }
    }

    fn view_error(&self, message: &str) {
        crate::ports::MessageSink::display_error_message(&*self.view, message);
    }

    /// Bring the displayed user in line with the route, then (re)mount the list.
    async fn sync_route(&self, session: &Session) {
        let route = match self.view.route() {
            Some(route) if route.displayed_alias().is_some() => route,
            _ => match &session.displayed_user {
                Some(user) => {
                    let route = Route::Feed(user.alias.clone());
                    self.view.set_route(route.clone());
                    route
                }
                None => return,
            },
        };

        let mounted = self.mounted.lock().as_ref().map(|m| Arc::clone(&m.presenter));
        // Nothing mounted yet; a throwaway list presenter does the lookup.
        let presenter =
            mounted.unwrap_or_else(|| Arc::new(self.list_presenter(FeedMode::Feed)));
        presenter
            .sync_displayed_user_from_route(
                session.auth_token.as_ref(),
                route.displayed_alias(),
                session.displayed_user.as_ref(),
            )
            .await;
        self.ensure_mounted().await;
    }

    fn list_presenter(&self, mode: FeedMode) -> StatusItemPresenter {
        let view: Arc<dyn StatusItemView> = self.view.clone();
        StatusItemPresenter::new(view, Arc::clone(&self.statuses), Arc::clone(&self.users), mode)
    }

    /// Mount a fresh list when the route changed. The old one is detached so a
    /// late page cannot land in the new list.
    async fn ensure_mounted(&self) {
        let session = self.view.session();
        let (Some(route), Some(token), Some(displayed)) =
            (self.view.route(), session.auth_token, session.displayed_user)
        else {
            return;
        };
        let route = route.with_alias(&displayed.alias);
        let mode = match route {
            Route::Feed(_) => FeedMode::Feed,
            Route::Story(_) => FeedMode::Story,
            Route::Login | Route::Register => return,
        };

        let presenter = {
            let mut mounted = self.mounted.lock();
            if mounted.as_ref().is_some_and(|m| m.route == route) {
                return;
            }
            if let Some(old) = mounted.take() {
                old.presenter.detach();
            }
            let presenter = Arc::new(self.list_presenter(mode));
            *mounted = Some(Mounted {
                route: route.clone(),
                presenter: Arc::clone(&presenter),
            });
            presenter
        };
        self.view.set_route(route);
        self.view.clear_items();
        presenter.reset();
        presenter.load_more_items(&token, &displayed.alias).await;
    }

    async fn refresh_profile(&self, session: &Session) {
        let (Some(token), Some(current), Some(displayed)) = (
            session.auth_token.as_ref(),
            session.current_user.as_ref(),
            session.displayed_user.as_ref(),
        ) else {
            return;
        };
        if self.profile_alias.lock().as_deref() == Some(displayed.alias.as_str()) {
            return;
        }
        self.user_info.refresh(token, current, displayed).await;
        *self.profile_alias.lock() = Some(displayed.alias.clone());
    }

    async fn member_turn(&self) -> Result<bool, DomainError> {
        let session = self.view.session();
        self.sync_route(&session).await;
        let session = self.view.session();
        self.refresh_profile(&session).await;
        self.view.render_profile();

        let (mode, has_more) = match self.mounted.lock().as_ref() {
            Some(m) => (m.presenter.mode(), m.presenter.has_more_items()),
            None => (FeedMode::Feed, false),
        };
        let following = self.view.with_state(|s| s.relationship.is_follower);

        let mut actions = Vec::new();
        if has_more {
            actions.push(MemberAction::LoadMore);
        }
        actions.push(MemberAction::Switch(match mode {
            FeedMode::Feed => FeedMode::Story,
            FeedMode::Story => FeedMode::Feed,
        }));
        actions.push(MemberAction::GoToUser);
        if session.is_viewing_other() {
            actions.push(if following {
                MemberAction::Unfollow
            } else {
                MemberAction::Follow
            });
            actions.push(MemberAction::ReturnToSelf);
        }
        actions.push(MemberAction::Logout);
        actions.push(MemberAction::Quit);

        let prompt = format!("{} items shown", self.view.item_count());
        let Some(action) = prompt_result(Select::new(&prompt, actions).prompt())? else {
            return Ok(false);
        };

        let token = session.auth_token.as_ref();
        let displayed = session.displayed_user.as_ref();
        match action {
            MemberAction::LoadMore => {
                let presenter = self.mounted.lock().as_ref().map(|m| Arc::clone(&m.presenter));
                if let (Some(presenter), Some(token), Some(displayed)) = (presenter, token, displayed)
                {
                    presenter.load_more_items(token, &displayed.alias).await;
                }
            }
            MemberAction::Switch(mode) => {
                if let Some(displayed) = displayed {
                    self.view.set_route(match mode {
                        FeedMode::Feed => Route::Feed(displayed.alias.clone()),
                        FeedMode::Story => Route::Story(displayed.alias.clone()),
                    });
                }
            }
            MemberAction::GoToUser => {
                let alias = ask(Text::new("Alias (e.g. @amy):").prompt())?;
                if let Some(token) = token {
                    self.navigation.go_to_user(token, alias.trim()).await;
                }
            }
            MemberAction::Follow => {
                self.user_info.on_follow_clicked(token, displayed).await;
            }
            MemberAction::Unfollow => {
                self.user_info.on_unfollow_clicked(token, displayed).await;
            }
            MemberAction::ReturnToSelf => {
                self.user_info
                    .on_return_to_logged_in_user_clicked(session.current_user.as_ref());
            }
            MemberAction::Logout => self.logout().await,
            MemberAction::Quit => return Ok(false),
        }
        Ok(true)
    }

    async fn logout(&self) {
        if let Some(old) = self.mounted.lock().take() {
            old.presenter.detach();
        }
        *self.profile_alias.lock() = None;
        self.view.with_state(|s| {
            s.session = Session::default();
            s.items.clear();
            s.route = Some(Route::Login);
        });
        if let Err(e) = self.sessions.clear().await {
            warn!(error = %e, "could not clear remembered session");
        }
        info!("logged out");
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        self.restore_session().await;
        loop {
            let keep_going = if self.view.session().is_authenticated() {
                self.member_turn().await?
            } else {
                self.guest_turn().await?
            };
            if !keep_going {
                break;
            }
        }
        if let Some(old) = self.mounted.lock().take() {
            old.presenter.detach();
        }
        Ok(())
    }
}

/// Escape / Ctrl-C end the session instead of failing it.
fn prompt_result<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

/// Prompt answer for a form field. Cancelling a field yields an empty answer,
/// which the presenters then reject like any missing input.
fn ask<T: Default>(result: Result<T, InquireError>) -> Result<T, DomainError> {
    Ok(prompt_result(result)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_not_an_error() {
        let cancelled: Result<String, InquireError> = Err(InquireError::OperationCanceled);
        assert_eq!(prompt_result(cancelled).unwrap(), None);
        assert_eq!(ask::<String>(Err(InquireError::OperationInterrupted)).unwrap(), "");
        let failed: Result<String, InquireError> =
            Err(InquireError::Custom("tty gone".to_string().into()));
        assert!(matches!(prompt_result(failed), Err(DomainError::Ui(_))));
    }

    #[test]
    fn test_menu_labels() {
        assert_eq!(MemberAction::Switch(FeedMode::Story).to_string(), "Show story");
        assert_eq!(GuestAction::SignIn.to_string(), "Sign in");
    }
}
