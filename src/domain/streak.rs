/// Streak calculation
///
/// A streak is the number of consecutive completed days ending today, or
/// yesterday when today has not been marked yet. The walk never counts a
/// day before the habit's `streak_start_date`.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::dates::previous_day;
use crate::domain::Habit;

/// Current streak of a habit as of `today`
pub fn calculate_streak(habit: &Habit, today: NaiveDate) -> u32 {
    current_streak(
        habit.completed_dates.iter().copied(),
        habit.streak_start_date,
        today,
    )
}

/// Walk completed days backward from the anchor and count the unbroken run
///
/// `completed` may arrive in any order and may repeat days. After sorting
/// newest first, the cursor is compared with the walk date:
/// equal counts the day and moves both back; a cursor day later than the
/// walk date (a repeat, or a day after the anchor) is skipped; a cursor
/// day earlier than the walk date means the walk date was missed.
pub fn current_streak<I>(completed: I, streak_start: NaiveDate, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut sorted: Vec<NaiveDate> = completed.into_iter().collect();
    if sorted.is_empty() {
        return 0;
    }
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    // One grace day: an unmarked today does not break the streak yet
    let mut walk_date = if sorted[0] == today {
        today
    } else {
        match previous_day(today) {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };

    let mut streak = 0;
    let mut cursor = 0;

    while cursor < sorted.len() {
        if walk_date < streak_start {
            break;
        }

        let completed_date = sorted[cursor];
        if completed_date == walk_date {
            streak += 1;
            cursor += 1;
            walk_date = match previous_day(walk_date) {
                Some(prev) => prev,
                None => break,
            };
        } else if completed_date > walk_date {
            cursor += 1;
        } else {
            break;
        }
    }

    streak
}

/// Streak statistics for a single habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Current consecutive days completed
    pub current: u32,
    /// Best run of consecutive days since the streak start
    pub longest: u32,
    /// Most recent completion on or before today
    pub last_completed: Option<NaiveDate>,
    /// Number of distinct days marked complete
    pub total_completions: u32,
}

impl StreakSummary {
    pub fn for_habit(habit: &Habit, today: NaiveDate) -> Self {
        let current = calculate_streak(habit, today);
        let longest = longest_run(&habit.completed_dates, habit.streak_start_date, today);
        let last_completed = habit
            .completed_dates
            .range(..=today)
            .next_back()
            .copied();

        Self {
            current,
            longest: longest.max(current),
            last_completed,
            total_completions: habit.completed_dates.len() as u32,
        }
    }

    /// Get a motivational message based on current streak status
    pub fn motivational_message(&self) -> String {
        match self.current {
            0 => "Ready to start your streak! Every journey begins with a single step.".to_string(),
            1 => "Great start! One day down, keep the momentum going.".to_string(),
            2..=6 => format!("Nice work! {} days in a row. You're building a strong habit.", self.current),
            7..=13 => format!("Excellent! {} days strong. You're in the groove now!", self.current),
            14..=29 => format!("Amazing! {} days straight. This is becoming second nature.", self.current),
            _ => format!("Incredible! {} days of consistency. You're a habit master!", self.current),
        }
    }
}

/// Longest run of consecutive days in `[start, today]`
fn longest_run(dates: &BTreeSet<NaiveDate>, start: NaiveDate, today: NaiveDate) -> u32 {
    if start > today {
        return 0;
    }

    let mut longest = 0;
    let mut run = 0;
    let mut last: Option<NaiveDate> = None;

    for &date in dates.range(start..=today) {
        run = match last {
            Some(prev) if previous_day(date) == Some(prev) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        last = Some(date);
    }

    longest
}
