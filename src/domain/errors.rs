//! Domain errors. Used by ports, presenters and adapters.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Backend unreachable or a request failed in transit.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Login rejected. The message is shown to the user as-is.
    #[error("{0}")]
    Auth(String),

    /// Registration rejected. The message is shown to the user as-is.
    #[error("{0}")]
    Registration(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Prompt failed: {0}")]
    Ui(String),
}
