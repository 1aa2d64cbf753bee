//! Session store outbound port. Keeps a "remember me" session across restarts.

use crate::domain::{DomainError, Session};

/// Port for persisting the logged-in session.
///
/// Implemented by adapters (e.g. a JSON file). The rendering surface calls it;
/// presenters never do.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the remembered session, if one was saved.
    async fn load(&self) -> Result<Option<Session>, DomainError>;

    /// Replace the remembered session.
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Forget the remembered session. Succeeds when nothing was saved.
    async fn clear(&self) -> Result<(), DomainError>;
}
