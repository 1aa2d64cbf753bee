//! Inbound port. The rendering surface runs the application.

use crate::domain::DomainError;

/// Input port: an interactive front end that turns user actions into presenter calls.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
