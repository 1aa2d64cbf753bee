//! Core domain layer. No external I/O dependencies.
//!
//! Entities, routes and the session record live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod route;
pub mod session;

pub use entities::{
    AuthToken, FeedMode, ImageFile, MessageId, PaginationState, RelationshipView, Status, User,
};
pub use errors::DomainError;
pub use route::Route;
pub use session::Session;
