//! Infrastructure adapters. Implement outbound ports and view ports.
//!
//! In-memory services, session file, terminal UI. Map errors to DomainError.

pub mod fake;
pub mod persistence;
pub mod ui;
