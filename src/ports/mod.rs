//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: the rendering surface drives the application
//! - Outbound: presenters call backend services
//! - View: presenters push state to the rendering surface
//! - Session store: remembered sessions survive restarts

pub mod inbound;
pub mod outbound;
pub mod session_store;
pub mod view;

pub use inbound::InputPort;
pub use outbound::{FollowService, StatusPage, StatusService, UserService};
pub use session_store::SessionStore;
pub use view::{
    AuthView, BusyIndicator, MessageSink, RegisterView, StatusItemView, UserInfoView,
    UserNavigationView,
};
