use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub count: u32,
    pub level: u8,
    pub month: String,
    pub is_recent: bool,
}

impl DayCell {
    pub fn new(date: NaiveDate, count: u32, today: NaiveDate) -> Self {
        let age = (today - date).num_days();
        Self {
            date,
            count,
            level: contribution_level(count),
            month: date.format("%b").to_string(),
            is_recent: (0..7).contains(&age),
        }
    }

    pub fn weekday_index(&self) -> usize {
        self.date.weekday().num_days_from_monday() as usize
    }
}

/// Monday-first run of at most seven days.
pub type WeekRow = Vec<DayCell>;

/// Maps a day's contribution count onto the 0-4 shading scale.
pub fn contribution_level(count: u32) -> u8 {
    match count {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=8 => 3,
        _ => 4,
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Streaks {
    pub longest: u32,
    pub current: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionGrid {
    pub weeks: Vec<WeekRow>,
    pub total_contributions: u32,
    pub longest_streak: u32,
    pub current_streak: u32,
    pub time_range: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ContributionGrid {
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten()
    }

    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contribution_level_thresholds() {
        assert_eq!(contribution_level(0), 0);
        assert_eq!(contribution_level(1), 1);
        assert_eq!(contribution_level(2), 1);
        assert_eq!(contribution_level(3), 2);
        assert_eq!(contribution_level(5), 2);
        assert_eq!(contribution_level(6), 3);
        assert_eq!(contribution_level(8), 3);
        assert_eq!(contribution_level(9), 4);
        assert_eq!(contribution_level(250), 4);
    }

    #[test]
    fn test_contribution_level_is_monotonic() {
        let levels: Vec<u8> = (0..40).map(contribution_level).collect();
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_day_cell_recency() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let cell = DayCell::new(today, 4, today);
        assert!(cell.is_recent);
        assert_eq!(cell.level, 2);
        assert_eq!(cell.month, "Mar");
        assert_eq!(cell.weekday_index(), 4);

        let six_days = DayCell::new(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(), 0, today);
        assert!(six_days.is_recent);

        let seven_days = DayCell::new(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(), 0, today);
        assert!(!seven_days.is_recent);
    }
}
