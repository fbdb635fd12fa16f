/// Tool for updating existing habits
///
/// This module implements the habit_update MCP tool to modify habit fields,
/// including the streak start date and the optional end date.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Frequency, HabitUpdate, Priority};
use crate::storage::HabitRepository;
use crate::tools::{parse_habit_id, parse_optional_day, ToolError};

/// Parameters for updating an existing habit
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct UpdateHabitParams {
    /// ID of the habit to update
    pub habit_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub emoji: Option<String>,
    /// daily, weekly or custom
    pub frequency: Option<String>,
    /// high, medium or low
    pub priority: Option<String>,
    /// New first day of the streak, YYYY-MM-DD
    pub streak_start_date: Option<String>,
    /// Day after which the habit counts as successful, YYYY-MM-DD
    pub streak_end_date: Option<String>,
    /// Remove the end date
    pub clear_end_date: Option<bool>,
}

/// Response from updating a habit
#[derive(Debug, Serialize)]
pub struct UpdateHabitResponse {
    pub habit_id: String,
    pub message: String,
}

/// Update an existing habit in the repository
pub fn update_habit<R: HabitRepository + ?Sized>(
    repo: &R,
    params: UpdateHabitParams,
    today: NaiveDate,
) -> Result<UpdateHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let update = build_update(params)?;

    if update.is_empty() {
        return Err(ToolError::InvalidParams("No fields to update".to_string()));
    }

    let mut habit = repo.get(&habit_id)?;
    habit.apply(update)?;
    repo.update(&habit)?;

    let message = if habit.is_retired(today) {
        format!("🏆 Updated habit '{}' (end date passed, marked successful)", habit.name)
    } else {
        format!("✅ Updated habit '{}'", habit.name)
    };

    Ok(UpdateHabitResponse {
        habit_id: habit.id.to_string(),
        message,
    })
}

fn build_update(params: UpdateHabitParams) -> Result<HabitUpdate, ToolError> {
    let end_date = match (params.clear_end_date, params.streak_end_date.as_deref()) {
        (Some(true), Some(_)) => {
            return Err(ToolError::InvalidParams(
                "Use either streak_end_date or clear_end_date, not both".to_string(),
            ))
        }
        (Some(true), None) => Some(None),
        (_, raw) => parse_optional_day(raw)?.map(Some),
    };

    Ok(HabitUpdate {
        name: params.name,
        description: params.description.map(Some),
        category: params.category.map(Some),
        emoji: params.emoji.map(Some),
        frequency: params
            .frequency
            .as_deref()
            .map(str::parse::<Frequency>)
            .transpose()?,
        priority: params
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?,
        streak_start_date: parse_optional_day(params.streak_start_date.as_deref())?,
        end_date,
    })
}
