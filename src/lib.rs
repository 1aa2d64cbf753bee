//! tweeter: presenter layer of a social-microblogging client, hexagonal style.
//!
//! Presenters sit between view ports and service ports; adapters supply an
//! in-memory backend and a terminal surface.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod presenters;
pub mod shared;
