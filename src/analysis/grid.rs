use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};

use crate::analysis::streaks::calculate_streaks;
use crate::github::ContributionCalendar;
use crate::models::{ContributionGrid, DayCell, Event, WeekRow};

pub const WINDOW_MONTHS: u32 = 6;

/// Commits per UTC calendar day, taken from push events.
///
/// A push whose payload has no commits listed still counts as one contribution.
pub fn daily_commit_counts(events: &[Event]) -> HashMap<NaiveDate, u32> {
    let mut counts = HashMap::new();
    for event in events.iter().filter(|e| e.is_push()) {
        let commits = event.commit_count().filter(|&n| n > 0).unwrap_or(1);
        *counts.entry(event.created_at.date_naive()).or_insert(0) += commits;
    }
    counts
}

pub fn calendar_counts(calendar: &ContributionCalendar) -> HashMap<NaiveDate, u32> {
    let mut counts = HashMap::new();
    for day in calendar.days() {
        *counts.entry(day.date).or_insert(0) += day.contribution_count;
    }
    counts
}

/// First day of the month `WINDOW_MONTHS` back, rolled back to its Monday.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    let month_start = today
        .checked_sub_months(Months::new(WINDOW_MONTHS))
        .and_then(|d| d.with_day(1))
        .unwrap_or(today);
    month_start - Duration::days(month_start.weekday().num_days_from_monday() as i64)
}

pub fn build_contribution_grid(events: &[Event], now: DateTime<Utc>) -> ContributionGrid {
    build_grid_from_counts(&daily_commit_counts(events), now)
}

/// Lays the window out as Monday-first weeks ending on `now`'s date.
///
/// Counts dated outside the window are ignored.
pub fn build_grid_from_counts(
    counts: &HashMap<NaiveDate, u32>,
    now: DateTime<Utc>,
) -> ContributionGrid {
    let today = now.date_naive();
    let start = window_start(today);

    let mut weeks: Vec<WeekRow> = Vec::new();
    let mut total_contributions = 0;
    let mut week_start = start;

    while week_start <= today {
        let week: WeekRow = week_start
            .iter_days()
            .take(7)
            .take_while(|date| *date <= today)
            .map(|date| DayCell::new(date, counts.get(&date).copied().unwrap_or(0), today))
            .collect();

        total_contributions += week.iter().map(|d| d.count).sum::<u32>();
        weeks.push(week);
        week_start = week_start + Duration::days(7);
    }

    let streaks = calculate_streaks(&weeks);
    tracing::debug!(
        "Built {} week grid from {} to {}: {} contributions",
        weeks.len(),
        start,
        today,
        total_contributions
    );

    ContributionGrid {
        weeks,
        total_contributions,
        longest_streak: streaks.longest,
        current_streak: streaks.current,
        time_range: format!("{} months", WINDOW_MONTHS),
        start_date: start,
        end_date: today,
    }
}
