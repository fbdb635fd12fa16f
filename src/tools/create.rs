/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::dates::format_day;
use crate::domain::{Frequency, Habit, HabitDraft, Priority};
use crate::storage::HabitRepository;
use crate::tools::{parse_optional_day, ToolError};

/// Parameters for creating a new habit
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Free-form category label
    pub category: Option<String>,
    /// Emoji shown next to the habit
    pub emoji: Option<String>,
    /// daily, weekly or custom (default: daily)
    pub frequency: Option<String>,
    /// high, medium or low (default: medium)
    pub priority: Option<String>,
    /// First day that counts toward the streak, YYYY-MM-DD (default: today)
    pub streak_start_date: Option<String>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub habit_id: String,
    pub streak_start_date: NaiveDate,
    pub message: String,
}

/// Create a new habit in the repository
pub fn create_habit<R: HabitRepository + ?Sized>(
    repo: &R,
    params: CreateHabitParams,
    today: NaiveDate,
) -> Result<CreateHabitResponse, ToolError> {
    let frequency = match params.frequency.as_deref() {
        Some(raw) => raw.parse::<Frequency>()?,
        None => Frequency::default(),
    };
    let priority = match params.priority.as_deref() {
        Some(raw) => raw.parse::<Priority>()?,
        None => Priority::default(),
    };

    let draft = HabitDraft {
        name: params.name,
        description: params.description,
        category: params.category,
        emoji: params.emoji,
        frequency,
        priority,
        streak_start_date: parse_optional_day(params.streak_start_date.as_deref())?,
    };

    let habit = Habit::new(draft, today)?;
    repo.add(&habit)?;

    Ok(CreateHabitResponse {
        habit_id: habit.id.to_string(),
        streak_start_date: habit.streak_start_date,
        message: format!(
            "✅ Created habit '{}'! Streak counts from {}.",
            habit.name,
            format_day(habit.streak_start_date)
        ),
    })
}
