use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::contribution::WeekRow;
use super::event::ActivityEvent;
use super::repository::RepositorySummary;
use super::user::ProfileSummary;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RepositoryStats {
    pub public_repos: u32,
    pub total_stars: u64,
    pub total_forks: u64,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_contributions: u32,
    pub public_repos: u32,
    pub total_stars: u64,
    pub total_forks: u64,
    pub languages: Vec<String>,
    pub longest_streak: u32,
    pub current_streak: u32,
    pub total_commits: u32,
    pub recent_commits: u32,
    pub last_activity: Option<DateTime<Utc>>,
}

/// Everything the presentation layer renders for one username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionReport {
    pub user: ProfileSummary,
    pub stats: AggregateStats,
    pub contribution_data: Vec<WeekRow>,
    pub recent_repos: Vec<RepositorySummary>,
    pub recent_activity: Vec<ActivityEvent>,
}

/// A report plus the error that forced placeholder data, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    pub report: ContributionReport,
    pub error: Option<String>,
}

impl ActivitySnapshot {
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}
