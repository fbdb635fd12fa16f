/// Weekly progress grid
///
/// For a Monday-start week, which days each habit was marked complete.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::dates::{add_days, start_of_week};
use crate::domain::{DomainError, Habit, HabitId};

/// One habit's row in the grid, Monday first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekRow {
    pub habit_id: HabitId,
    pub name: String,
    pub days: [bool; 7],
}

impl WeekRow {
    pub fn completed_count(&self) -> usize {
        self.days.iter().filter(|done| **done).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyProgress {
    pub week_start: NaiveDate,
    days: [NaiveDate; 7],
    pub rows: Vec<WeekRow>,
}

impl WeeklyProgress {
    /// The seven days of the week, Monday to Sunday
    pub fn days(&self) -> [NaiveDate; 7] {
        self.days
    }
}

/// Build the grid for the week containing `day`
///
/// Fails only for weeks that run off either end of the calendar.
pub fn weekly_progress(habits: &[Habit], day: NaiveDate) -> Result<WeeklyProgress, DomainError> {
    let week_start = start_of_week(day)?;
    let mut days = [week_start; 7];
    for (offset, slot) in (0i64..).zip(days.iter_mut()) {
        *slot = add_days(week_start, offset)?;
    }

    let rows = habits
        .iter()
        .map(|habit| WeekRow {
            habit_id: habit.id.clone(),
            name: habit.name.clone(),
            days: days.map(|d| habit.is_completed_on(d)),
        })
        .collect();

    Ok(WeeklyProgress {
        week_start,
        days,
        rows,
    })
}
