use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use gitactivity::github::ContributionCalendar;
use gitactivity::models::{Event, ProfileSummary, Repository};
use gitactivity::{ActivitySource, AggregatorConfig, ContributionAggregator, Error, Result};

#[derive(Default)]
struct StubSource {
    repos: Vec<Repository>,
    events: Vec<Event>,
    calendar: Option<ContributionCalendar>,
    fail_events: bool,
    fail_calendar: bool,
}

fn profile() -> ProfileSummary {
    serde_json::from_value(json!({
        "login": "octocat",
        "name": "The Octocat",
        "bio": null,
        "public_repos": 120,
        "followers": 9000,
        "following": 9,
        "avatar_url": "https://avatars.githubusercontent.com/u/583231",
        "html_url": "https://github.com/octocat",
        "created_at": "2011-01-25T18:44:36Z"
    }))
    .unwrap()
}

fn repo(name: &str, language: Option<&str>, stars: u32) -> Repository {
    serde_json::from_value(json!({
        "name": name,
        "description": null,
        "language": language,
        "stargazers_count": stars,
        "forks_count": 1,
        "updated_at": "2024-03-01T00:00:00Z",
        "size": 128,
        "html_url": format!("https://github.com/octocat/{}", name)
    }))
    .unwrap()
}

fn push(created_at: DateTime<Utc>, commits: usize) -> Event {
    let commits: Vec<_> = (0..commits)
        .map(|i| json!({"sha": format!("{:040}", i), "message": "update"}))
        .collect();
    serde_json::from_value(json!({
        "type": "PushEvent",
        "repo": {"name": "octocat/hello-world"},
        "created_at": created_at,
        "payload": {"commits": commits}
    }))
    .unwrap()
}

fn watch(created_at: DateTime<Utc>) -> Event {
    serde_json::from_value(json!({
        "type": "WatchEvent",
        "repo": {"name": "rust-lang/rust"},
        "created_at": created_at,
        "payload": {"action": "started"}
    }))
    .unwrap()
}

#[async_trait]
impl ActivitySource for StubSource {
    async fn fetch_profile(&self, username: &str) -> Result<ProfileSummary> {
        if username != "octocat" {
            return Err(Error::UserNotFound(username.to_string()));
        }
        Ok(profile())
    }

    async fn fetch_repositories(&self, _username: &str) -> Result<Vec<Repository>> {
        Ok(self.repos.clone())
    }

    async fn fetch_events(&self, _username: &str) -> Result<Vec<Event>> {
        if self.fail_events {
            return Err(Error::GitHubApi("Failed to fetch events: 500".to_string()));
        }
        Ok(self.events.clone())
    }

    async fn fetch_contribution_calendar(
        &self,
        _username: &str,
    ) -> Result<Option<ContributionCalendar>> {
        if self.fail_calendar {
            return Err(Error::GraphQL("Bad credentials".to_string()));
        }
        Ok(self.calendar.clone())
    }
}

#[tokio::test]
async fn test_fetch_contributions_builds_report() {
    let now = Utc::now();
    let mut events = vec![push(now, 2), watch(now - Duration::days(1))];
    events.extend((1..=11).map(|d| push(now - Duration::days(d), 1)));

    let source = StubSource {
        repos: vec![
            repo("a", Some("Rust"), 10),
            repo("b", None, 0),
            repo("c", Some("TypeScript"), 5),
            repo("d", Some("Rust"), 0),
            repo("e", None, 0),
            repo("f", None, 0),
            repo("g", Some("Go"), 0),
        ],
        events,
        ..Default::default()
    };
    let aggregator = ContributionAggregator::new(source, AggregatorConfig::default());

    let report = aggregator.fetch_contributions("octocat").await.unwrap();

    assert_eq!(report.stats.total_stars, 15);
    assert_eq!(report.stats.total_forks, 7);
    assert_eq!(report.stats.public_repos, 120);
    assert_eq!(report.stats.languages, vec!["Rust", "TypeScript", "Go"]);
    assert_eq!(report.stats.total_contributions, 13);
    assert_eq!(report.stats.total_commits, 13);
    assert_eq!(report.stats.recent_commits, 13);
    assert_eq!(report.stats.longest_streak, 12);
    assert_eq!(report.stats.current_streak, 12);
    assert_eq!(report.stats.last_activity, Some(report.recent_activity[0].created_at));

    assert_eq!(report.recent_repos.len(), 6);
    assert_eq!(report.recent_repos[0].stars, 10);
    assert_eq!(report.recent_activity.len(), 10);
    assert_eq!(report.recent_activity[1].kind, "WatchEvent");
    assert_eq!(report.recent_activity[1].commits, 0);

    let today = now.date_naive();
    let cells: Vec<_> = report.contribution_data.iter().flatten().collect();
    assert!(cells.iter().all(|d| d.date <= today));
    assert_eq!(
        cells.iter().map(|d| d.count).sum::<u32>(),
        report.stats.total_contributions
    );
    assert!(report
        .contribution_data
        .iter()
        .all(|w| !w.is_empty() && w.len() <= 7));
}

#[tokio::test]
async fn test_failed_fetch_aborts_whole_aggregation() {
    let source = StubSource {
        repos: vec![repo("a", Some("Rust"), 3)],
        fail_events: true,
        ..Default::default()
    };
    let aggregator = ContributionAggregator::new(source, AggregatorConfig::default());

    let result = aggregator.fetch_contributions("octocat").await;
    assert!(matches!(result, Err(Error::GitHubApi(_))));
}

#[tokio::test]
async fn test_load_substitutes_fallback() {
    let aggregator = ContributionAggregator::new(StubSource::default(), AggregatorConfig::default());

    let snapshot = aggregator.load("ghost").await;
    assert!(snapshot.is_fallback());
    assert!(snapshot.error.as_deref().unwrap().contains("ghost"));
    assert_eq!(snapshot.report.user.login, "ghost");
    assert!(!snapshot.report.contribution_data.is_empty());

    let total: u32 = snapshot
        .report
        .contribution_data
        .iter()
        .flatten()
        .map(|d| d.count)
        .sum();
    assert_eq!(total, snapshot.report.stats.total_contributions);
}

#[tokio::test]
async fn test_load_without_error_is_not_fallback() {
    let aggregator = ContributionAggregator::new(StubSource::default(), AggregatorConfig::default());

    let snapshot = aggregator.load("octocat").await;
    assert!(!snapshot.is_fallback());
    assert_eq!(snapshot.report.stats.total_contributions, 0);
    assert_eq!(snapshot.report.stats.current_streak, 0);
    assert_eq!(snapshot.report.stats.last_activity, None);
}

#[tokio::test]
async fn test_calendar_replaces_event_grid() {
    let today = Utc::now().date_naive();
    let calendar: ContributionCalendar = serde_json::from_value(json!({
        "totalContributions": 9,
        "weeks": [{"contributionDays": [
            {"contributionCount": 4, "date": today - Duration::days(1)},
            {"contributionCount": 5, "date": today}
        ]}]
    }))
    .unwrap();

    let source = StubSource {
        events: vec![push(Utc::now(), 1)],
        calendar: Some(calendar),
        ..Default::default()
    };
    let aggregator = ContributionAggregator::new(source, AggregatorConfig::default());

    let report = aggregator.fetch_contributions("octocat").await.unwrap();
    assert_eq!(report.stats.total_contributions, 9);
    assert_eq!(report.stats.current_streak, 2);
    assert_eq!(report.stats.recent_commits, 1);
}

#[tokio::test]
async fn test_calendar_ignored_when_disabled_or_failing() {
    let config = AggregatorConfig {
        use_contribution_calendar: false,
        ..AggregatorConfig::default()
    };
    let calendar: ContributionCalendar = serde_json::from_value(json!({
        "totalContributions": 50,
        "weeks": [{"contributionDays": [
            {"contributionCount": 50, "date": Utc::now().date_naive()}
        ]}]
    }))
    .unwrap();
    let source = StubSource {
        events: vec![push(Utc::now(), 3)],
        calendar: Some(calendar),
        ..Default::default()
    };
    let report = ContributionAggregator::new(source, config)
        .fetch_contributions("octocat")
        .await
        .unwrap();
    assert_eq!(report.stats.total_contributions, 3);

    let source = StubSource {
        events: vec![push(Utc::now(), 3)],
        fail_calendar: true,
        ..Default::default()
    };
    let report = ContributionAggregator::new(source, AggregatorConfig::default())
        .fetch_contributions("octocat")
        .await
        .unwrap();
    assert_eq!(report.stats.total_contributions, 3);
}

#[test]
fn test_aggregate_is_deterministic_for_fixed_now() {
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
    let aggregator = ContributionAggregator::new(StubSource::default(), AggregatorConfig::default());

    let events = vec![
        push(now - Duration::days(3), 2),
        push(now - Duration::days(4), 2),
        push(now - Duration::days(5), 2),
        push(now - Duration::days(6), 2),
        push(now - Duration::days(7), 2),
    ];
    let report = aggregator.aggregate(profile(), vec![repo("a", None, 1)], events, now);

    assert_eq!(report.stats.total_contributions, 10);
    assert_eq!(report.stats.longest_streak, 5);
    assert_eq!(report.stats.current_streak, 0);

    let recent: Vec<_> = report
        .contribution_data
        .iter()
        .flatten()
        .filter(|d| d.is_recent)
        .collect();
    assert_eq!(recent.len(), 7);
    assert!(recent.iter().all(|d| (now.date_naive() - d.date).num_days() < 7));
}

#[test]
fn test_repository_schema_defaults_missing_counts() {
    let repo: Repository = serde_json::from_value(json!({
        "name": "sparse",
        "updated_at": "2024-03-01T00:00:00Z"
    }))
    .unwrap();
    assert_eq!(repo.stargazers_count, 0);
    assert_eq!(repo.forks_count, 0);
    assert_eq!(repo.language, None);
}
