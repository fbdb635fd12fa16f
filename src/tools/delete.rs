/// Tool for deleting habits
///
/// This module implements the habit_delete MCP tool. Deletion is permanent
/// and removes the habit's completion history with it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storage::HabitRepository;
use crate::tools::{parse_habit_id, ToolError};

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct DeleteHabitParams {
    /// ID of the habit to delete
    pub habit_id: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub message: String,
}

pub fn delete_habit<R: HabitRepository + ?Sized>(
    repo: &R,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let habit = repo.get(&habit_id)?;
    repo.remove(&habit_id)?;

    Ok(DeleteHabitResponse {
        message: format!(
            "🗑️ Deleted habit '{}' and {} recorded day{}",
            habit.name,
            habit.completed_dates.len(),
            if habit.completed_dates.len() == 1 { "" } else { "s" }
        ),
    })
}
