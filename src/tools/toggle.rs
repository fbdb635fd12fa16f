/// Tool for marking and unmarking a day
///
/// This module implements the habit_toggle MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::dates::format_day;
use crate::domain::{calculate_streak, toggle_completion, ToggleOutcome};
use crate::storage::HabitRepository;
use crate::tools::{parse_habit_id, parse_optional_day, plural, ToolError};

/// Parameters for toggling a completion
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ToggleParams {
    /// ID of the habit
    pub habit_id: String,
    /// Day to flip, YYYY-MM-DD (default: today)
    pub date: Option<String>,
}

/// Response from toggling a completion
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub outcome: ToggleOutcome,
    pub date: NaiveDate,
    pub current_streak: u32,
    pub message: String,
}

/// Flip one day of a habit and store the new completion set
pub fn toggle_habit<R: HabitRepository + ?Sized>(
    repo: &R,
    params: ToggleParams,
    today: NaiveDate,
) -> Result<ToggleResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let date = parse_optional_day(params.date.as_deref())?.unwrap_or(today);

    let mut habit = repo.get(&habit_id)?;
    let (completed_dates, outcome) = toggle_completion(&habit, date);
    repo.set_completed_dates(&habit_id, &completed_dates)?;

    habit.completed_dates = completed_dates;
    let current_streak = calculate_streak(&habit, today);

    tracing::debug!(habit = %habit_id, %date, ?outcome, current_streak, "Toggled completion");

    let verb = match outcome {
        ToggleOutcome::Marked => "Marked",
        ToggleOutcome::Unmarked => "Unmarked",
    };
    let mut message = format!(
        "{} '{}' for {}. Current streak: {} day{}",
        verb,
        habit.name,
        format_day(date),
        current_streak,
        plural(current_streak)
    );
    if date < habit.streak_start_date {
        message.push_str(&format!(
            " (days before {} don't count toward the streak)",
            format_day(habit.streak_start_date)
        ));
    }

    Ok(ToggleResponse {
        outcome,
        date,
        current_streak,
        message,
    })
}
