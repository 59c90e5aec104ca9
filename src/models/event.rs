use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PUSH_EVENT: &str = "PushEvent";

/// One entry of `GET /users/{username}/events/public`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: Option<EventRepo>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: Option<EventPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub commits: Option<Vec<EventCommit>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCommit {
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub message: String,
}

impl Event {
    pub fn is_push(&self) -> bool {
        self.kind == PUSH_EVENT
    }

    /// Length of the payload's commit list, `None` when the payload has none.
    pub fn commit_count(&self) -> Option<u32> {
        self.payload
            .as_ref()
            .and_then(|p| p.commits.as_ref())
            .map(|commits| commits.len() as u32)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEvent {
    pub kind: String,
    pub repo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub commits: u32,
}

impl From<&Event> for ActivityEvent {
    fn from(event: &Event) -> Self {
        Self {
            kind: event.kind.clone(),
            repo: event.repo.as_ref().map(|r| r.name.clone()),
            created_at: event.created_at,
            commits: event.commit_count().unwrap_or(0),
        }
    }
}
