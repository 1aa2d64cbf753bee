//! In-memory backend. Implements the service ports over a shared `FakeData`.
//!
//! Each service can simulate network latency. Stands in for the real server.

pub mod data;
pub mod follow_service;
pub mod status_service;
pub mod user_service;

pub use data::{DEMO_PASSWORD, FakeData};
pub use follow_service::FakeFollowService;
pub use status_service::FakeStatusService;
pub use user_service::FakeUserService;

use std::time::Duration;

/// Sleep for the configured latency, if any.
async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
