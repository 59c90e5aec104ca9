use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;

use crate::config::DEFAULT_API_URL;
use crate::error::{Error, Result};
use crate::github::graphql::{
    ContributionCalendar, ContributionVariables, ContributionsData, GraphQLRequest,
    GraphQLResponse, CONTRIBUTIONS_QUERY,
};
use crate::models::{Event, ProfileSummary, Repository};

/// Single fixed page size; the aggregator never paginates.
pub const PAGE_SIZE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitactivity/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        let token = match token.map(str::trim) {
            Some(t) if !t.is_empty() => {
                // Reject tokens that can't be sent as a header up front.
                header::HeaderValue::from_str(&format!("Bearer {}", t))?;
                Some(t.to_string())
            }
            _ => None,
        };

        Ok(Self {
            client,
            base_url: DEFAULT_API_URL.to_string(),
            token,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub async fn get_user(&self, username: &str) -> Result<ProfileSummary> {
        let url = self.user_url(username);
        tracing::info!("Fetching user: {}", username);

        let response = self.authorized(self.client.get(&url)).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }

        Self::parse(response, &format!("user {}", username)).await
    }

    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let url = self.repos_url(username);
        tracing::info!("Fetching repositories for: {}", username);

        let response = self.authorized(self.client.get(&url)).send().await?;
        let repos: Vec<Repository> =
            Self::parse(response, &format!("repositories for {}", username)).await?;
        tracing::debug!("Fetched {} repositories for {}", repos.len(), username);
        Ok(repos)
    }

    pub async fn get_user_events(&self, username: &str) -> Result<Vec<Event>> {
        let url = self.events_url(username);
        tracing::info!("Fetching public events for: {}", username);

        let response = self.authorized(self.client.get(&url)).send().await?;
        let events: Vec<Event> =
            Self::parse(response, &format!("events for {}", username)).await?;
        tracing::debug!("Fetched {} events for {}", events.len(), username);
        Ok(events)
    }

    /// Contribution calendar through the GraphQL API. Needs a token.
    pub async fn get_contribution_calendar(&self, username: &str) -> Result<ContributionCalendar> {
        let token = self.token.as_deref().ok_or(Error::MissingToken)?;
        let url = self.graphql_url();
        tracing::info!("Fetching contribution calendar for: {}", username);

        let body = GraphQLRequest {
            query: CONTRIBUTIONS_QUERY,
            variables: ContributionVariables { username },
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let result: GraphQLResponse<ContributionsData> =
            Self::parse(response, &format!("contribution calendar for {}", username)).await?;

        if let Some(errors) = result.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GraphQL(messages.join("; ")));
        }

        result
            .data
            .and_then(|d| d.user)
            .map(|u| u.contributions_collection.contribution_calendar)
            .ok_or_else(|| Error::UserNotFound(username.to_string()))
    }

    fn user_url(&self, username: &str) -> String {
        format!("{}/users/{}", self.base_url, username)
    }

    fn repos_url(&self, username: &str) -> String {
        format!(
            "{}/users/{}/repos?per_page={}&type=all&visibility=public",
            self.base_url, username, PAGE_SIZE
        )
    }

    fn events_url(&self, username: &str) -> String {
        format!(
            "{}/users/{}/events/public?per_page={}",
            self.base_url, username, PAGE_SIZE
        )
    }

    fn graphql_url(&self) -> String {
        format!("{}/graphql", self.base_url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to fetch {}: {} - {}",
                what, status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GitHubClient::new(None).unwrap();
        assert!(!client.has_token());
        assert_eq!(client.base_url(), "https://api.github.com");

        let client = GitHubClient::new(Some("  ")).unwrap();
        assert!(!client.has_token());

        let client = GitHubClient::new(Some("ghp_test"))
            .unwrap()
            .with_base_url("http://localhost:9000/");
        assert!(client.has_token());
        assert_eq!(client.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_request_urls() {
        let client = GitHubClient::new(None).unwrap();
        assert_eq!(client.user_url("octocat"), "https://api.github.com/users/octocat");
        assert_eq!(
            client.repos_url("octocat"),
            "https://api.github.com/users/octocat/repos?per_page=100&type=all&visibility=public"
        );
        assert_eq!(
            client.events_url("octocat"),
            "https://api.github.com/users/octocat/events/public?per_page=100"
        );
        assert_eq!(client.graphql_url(), "https://api.github.com/graphql");

        let client = client.with_base_url("http://localhost:9000/");
        assert_eq!(
            client.events_url("octocat"),
            "http://localhost:9000/users/octocat/events/public?per_page=100"
        );
    }

    #[test]
    fn test_rejects_invalid_token() {
        let result = GitHubClient::new(Some("bad\ntoken"));
        assert!(matches!(result, Err(Error::InvalidHeader(_))));
    }

    #[tokio::test]
    async fn test_calendar_requires_token() {
        let client = GitHubClient::new(None).unwrap();
        let result = client.get_contribution_calendar("octocat").await;
        assert!(matches!(result, Err(Error::MissingToken)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = GitHubClient::new(None)
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let result = client.get_user("octocat").await;
        assert!(matches!(result, Err(Error::Network(_))));
    }
}
