use async_trait::async_trait;

use crate::error::Result;
use crate::github::client::GitHubClient;
use crate::github::graphql::ContributionCalendar;
use crate::models::{Event, ProfileSummary, Repository};

/// Where the aggregator gets its raw payloads from.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn fetch_profile(&self, username: &str) -> Result<ProfileSummary>;
    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>>;
    async fn fetch_events(&self, username: &str) -> Result<Vec<Event>>;

    /// `Ok(None)` when the source has no calendar to offer.
    async fn fetch_contribution_calendar(
        &self,
        _username: &str,
    ) -> Result<Option<ContributionCalendar>> {
        Ok(None)
    }
}

#[async_trait]
impl ActivitySource for GitHubClient {
    async fn fetch_profile(&self, username: &str) -> Result<ProfileSummary> {
        self.get_user(username).await
    }

    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>> {
        self.get_user_repos(username).await
    }

    async fn fetch_events(&self, username: &str) -> Result<Vec<Event>> {
        self.get_user_events(username).await
    }

    async fn fetch_contribution_calendar(
        &self,
        username: &str,
    ) -> Result<Option<ContributionCalendar>> {
        if !self.has_token() {
            return Ok(None);
        }
        self.get_contribution_calendar(username).await.map(Some)
    }
}
