//! Presenters. One stateful orchestrator per feature.
//!
//! Each presenter validates input, drives its view's busy/error state and
//! calls backend services through ports. Presenters never render.

mod guard;
pub mod auth;
pub mod register;
pub mod status_item;
pub mod user_info;
pub mod user_navigation;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::AuthPresenter;
pub use register::RegisterPresenter;
pub use status_item::StatusItemPresenter;
pub use user_info::UserInfoPresenter;
pub use user_navigation::UserNavigationPresenter;

/// "Failed to {operation} because of exception: {detail}"
pub(crate) fn failure_message(operation: &str, error: &crate::domain::DomainError) -> String {
    format!("Failed to {operation} because of exception: {error}")
}
