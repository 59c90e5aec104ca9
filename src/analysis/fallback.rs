use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::analysis::grid::{build_grid_from_counts, window_start};
use crate::models::{AggregateStats, ContributionReport, ProfileSummary};

const PLACEHOLDER_LANGUAGES: [&str; 4] = ["TypeScript", "JavaScript", "Python", "Rust"];

/// Placeholder report with the same shape as a fetched one.
///
/// Daily counts are random in `0..8`; everything derived from them (levels,
/// total, streaks) is computed the same way as for real data.
pub fn generate_fallback<R: Rng>(
    username: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> ContributionReport {
    let today = now.date_naive();
    let counts: HashMap<_, _> = window_start(today)
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| (date, rng.gen_range(0..8u32)))
        .collect();

    let grid = build_grid_from_counts(&counts, now);

    let user = ProfileSummary {
        login: username.to_string(),
        name: None,
        bio: None,
        public_repos: 25,
        followers: 100,
        following: 0,
        avatar_url: format!("https://github.com/{}.png", username),
        html_url: format!("https://github.com/{}", username),
        created_at: now,
    };

    let stats = AggregateStats {
        total_contributions: grid.total_contributions,
        public_repos: user.public_repos,
        total_stars: 150,
        total_forks: 0,
        languages: PLACEHOLDER_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        longest_streak: grid.longest_streak,
        current_streak: grid.current_streak,
        total_commits: grid.total_contributions,
        recent_commits: 0,
        last_activity: None,
    };

    ContributionReport {
        user,
        stats,
        contribution_data: grid.weeks,
        recent_repos: Vec::new(),
        recent_activity: Vec::new(),
    }
}
