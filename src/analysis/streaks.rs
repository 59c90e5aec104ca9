use crate::models::{DayCell, Streaks, WeekRow};

/// Longest and current runs of consecutive days with contributions.
///
/// Cells are scanned newest first. The current streak only counts when the
/// most recent cell in the grid has contributions; a zero there means 0 even
/// if the day before closes a long run.
pub fn calculate_streaks(weeks: &[WeekRow]) -> Streaks {
    let mut days: Vec<&DayCell> = weeks.iter().flatten().collect();
    days.sort_by_key(|d| d.date);

    let mut streaks = Streaks::default();
    let mut run = 0u32;
    let mut newer: Option<&DayCell> = None;
    let mut touching_edge = true;

    for &day in days.iter().rev() {
        run = if day.count == 0 {
            0
        } else {
            match newer {
                Some(prev) if run > 0 && (prev.date - day.date).num_days() == 1 => run + 1,
                _ => 1,
            }
        };

        streaks.longest = streaks.longest.max(run);
        if touching_edge {
            if run > streaks.current {
                streaks.current = run;
            } else {
                touching_edge = false;
            }
        }

        newer = Some(day);
    }

    streaks
}
