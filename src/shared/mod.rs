//! Cross-cutting helpers: configuration and transfer encodings.

pub mod config;
pub mod image;
