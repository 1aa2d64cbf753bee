//! Fake feed / story paging.

use super::{FakeData, simulate_latency};
use crate::domain::{AuthToken, DomainError, Status};
use crate::ports::{StatusPage, StatusService};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct FakeStatusService {
    data: Arc<FakeData>,
    delay: Duration,
}

impl FakeStatusService {
    pub fn new(data: Arc<FakeData>) -> Self {
        Self::with_delay(data, 0)
    }

    pub fn with_delay(data: Arc<FakeData>, delay_ms: u64) -> Self {
        Self {
            data,
            delay: Duration::from_millis(delay_ms),
        }
    }
}

#[async_trait::async_trait]
impl StatusService for FakeStatusService {
    async fn load_more_feed(
        &self,
        token: &AuthToken,
        alias: &str,
        page_size: usize,
        last_item: Option<&Status>,
    ) -> Result<StatusPage, DomainError> {
        simulate_latency(self.delay).await;
        self.data.resolve_token(token)?;
        let page = self.data.feed_page(alias, page_size, last_item);
        debug!(alias, count = page.0.len(), has_more = page.1, "[FAKE] feed page");
        Ok(page)
    }

    async fn load_more_story(
        &self,
        token: &AuthToken,
        alias: &str,
        page_size: usize,
        last_item: Option<&Status>,
    ) -> Result<StatusPage, DomainError> {
        simulate_latency(self.delay).await;
        self.data.resolve_token(token)?;
        let page = self.data.story_page(alias, page_size, last_item);
        debug!(alias, count = page.0.len(), has_more = page.1, "[FAKE] story page");
        Ok(page)
    }
}
