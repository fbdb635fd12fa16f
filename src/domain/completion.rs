/// Completion toggle
///
/// Marking a day flips its membership in the habit's completion set. The
/// input habit is never modified; callers persist the returned set.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::Habit;

/// Which way a toggle went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Marked,
    Unmarked,
}

/// The habit's completion set with `date` flipped
///
/// Days before the streak start may be marked too; the streak calculation
/// is what ignores them.
pub fn toggle_completion(habit: &Habit, date: NaiveDate) -> (BTreeSet<NaiveDate>, ToggleOutcome) {
    let mut dates = habit.completed_dates.clone();
    let outcome = if dates.remove(&date) {
        ToggleOutcome::Unmarked
    } else {
        dates.insert(date);
        ToggleOutcome::Marked
    };
    (dates, outcome)
}

impl Habit {
    /// A copy of this habit with `date` toggled
    pub fn toggled(&self, date: NaiveDate) -> Habit {
        let (completed_dates, _) = toggle_completion(self, date);
        Habit {
            completed_dates,
            ..self.clone()
        }
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }
}
