use chrono::{DateTime, Utc};

use crate::analysis::fallback::generate_fallback;
use crate::analysis::grid::{build_contribution_grid, build_grid_from_counts, calendar_counts};
use crate::analysis::stats::build_repository_stats;
use crate::config::AggregatorConfig;
use crate::error::Result;
use crate::github::{ActivitySource, ContributionCalendar};
use crate::models::{
    ActivityEvent, ActivitySnapshot, AggregateStats, ContributionReport, Event, ProfileSummary,
    Repository, RepositorySummary,
};

pub struct ContributionAggregator<S> {
    source: S,
    config: AggregatorConfig,
}

impl<S: ActivitySource> ContributionAggregator<S> {
    pub fn new(source: S, config: AggregatorConfig) -> Self {
        Self { source, config }
    }

    /// Fetches profile, repositories and events and aggregates them.
    ///
    /// Any failed fetch fails the whole call.
    pub async fn fetch_contributions(&self, username: &str) -> Result<ContributionReport> {
        let (profile, repos, events) = futures::try_join!(
            self.source.fetch_profile(username),
            self.source.fetch_repositories(username),
            self.source.fetch_events(username),
        )?;

        tracing::info!(
            "Fetched {} repositories and {} events for {}",
            repos.len(),
            events.len(),
            username
        );

        let calendar = if self.config.use_contribution_calendar {
            match self.source.fetch_contribution_calendar(username).await {
                Ok(calendar) => calendar,
                Err(e) => {
                    tracing::warn!("Contribution calendar unavailable, using public events: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(self.aggregate_with_calendar(profile, repos, events, calendar.as_ref(), Utc::now()))
    }

    /// Like [`fetch_contributions`](Self::fetch_contributions), but substitutes
    /// placeholder data when fetching fails.
    pub async fn load(&self, username: &str) -> ActivitySnapshot {
        match self.fetch_contributions(username).await {
            Ok(report) => ActivitySnapshot {
                report,
                error: None,
            },
            Err(e) => {
                tracing::error!("Failed to fetch GitHub data for {}: {}", username, e);
                ActivitySnapshot {
                    report: generate_fallback(username, Utc::now(), &mut rand::thread_rng()),
                    error: Some(format!("Failed to load GitHub data: {}", e)),
                }
            }
        }
    }

    pub fn aggregate(
        &self,
        profile: ProfileSummary,
        repos: Vec<Repository>,
        events: Vec<Event>,
        now: DateTime<Utc>,
    ) -> ContributionReport {
        self.aggregate_with_calendar(profile, repos, events, None, now)
    }

    fn aggregate_with_calendar(
        &self,
        profile: ProfileSummary,
        repos: Vec<Repository>,
        events: Vec<Event>,
        calendar: Option<&ContributionCalendar>,
        now: DateTime<Utc>,
    ) -> ContributionReport {
        let repo_stats = build_repository_stats(profile.public_repos, &repos);

        let grid = match calendar {
            Some(calendar) => build_grid_from_counts(&calendar_counts(calendar), now),
            None => build_contribution_grid(&events, now),
        };

        let recent_commits: u32 = events
            .iter()
            .filter(|e| e.is_push())
            .filter_map(Event::commit_count)
            .sum();

        tracing::debug!(
            "{}: {} stars, {} forks, {} contributions, {} recent commits",
            profile.login,
            repo_stats.total_stars,
            repo_stats.total_forks,
            grid.total_contributions,
            recent_commits
        );

        let stats = AggregateStats {
            total_contributions: grid.total_contributions,
            public_repos: repo_stats.public_repos,
            total_stars: repo_stats.total_stars,
            total_forks: repo_stats.total_forks,
            languages: repo_stats.languages,
            longest_streak: grid.longest_streak,
            current_streak: grid.current_streak,
            total_commits: grid.total_contributions,
            recent_commits,
            last_activity: events.first().map(|e| e.created_at),
        };

        ContributionReport {
            user: profile,
            stats,
            contribution_data: grid.weeks,
            recent_repos: repos
                .iter()
                .take(self.config.recent_repos_limit)
                .map(RepositorySummary::from)
                .collect(),
            recent_activity: events
                .iter()
                .take(self.config.recent_activity_limit)
                .map(ActivityEvent::from)
                .collect(),
        }
    }
}
