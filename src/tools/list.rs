/// Tool for listing all habits
///
/// This module implements the habit_list MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{calculate_streak, Priority};
use crate::storage::HabitRepository;
use crate::tools::ToolError;

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListHabitsParams {
    /// Sort by: 'position', 'name', 'streak', 'priority' (default: position)
    pub sort_by: Option<String>,
}

/// Information about a habit in the list
#[derive(Debug, Serialize)]
pub struct HabitListItem {
    pub habit_id: String,
    pub name: String,
    pub emoji: Option<String>,
    pub category: Option<String>,
    pub frequency: String,
    pub priority: Priority,
    pub streak_start_date: NaiveDate,
    pub current_streak: u32,
    pub completed_today: bool,
    /// The end date has passed
    pub retired: bool,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitListItem>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKey {
    Position,
    Name,
    Streak,
    Priority,
}

fn parse_sort_key(raw: Option<&str>) -> Result<SortKey, ToolError> {
    match raw.map(|s| s.trim().to_lowercase()).as_deref() {
        None | Some("") | Some("position") => Ok(SortKey::Position),
        Some("name") => Ok(SortKey::Name),
        Some("streak") => Ok(SortKey::Streak),
        Some("priority") => Ok(SortKey::Priority),
        Some(other) => Err(ToolError::InvalidParams(format!(
            "Invalid sort_by '{}'. Valid options: position, name, streak, priority",
            other
        ))),
    }
}

/// List habits with their current streaks
pub fn list_habits<R: HabitRepository + ?Sized>(
    repo: &R,
    params: ListHabitsParams,
    today: NaiveDate,
) -> Result<ListHabitsResponse, ToolError> {
    let sort_key = parse_sort_key(params.sort_by.as_deref())?;

    let mut habits: Vec<HabitListItem> = repo
        .load()?
        .into_iter()
        .map(|habit| HabitListItem {
            current_streak: calculate_streak(&habit, today),
            completed_today: habit.is_completed_on(today),
            retired: habit.is_retired(today),
            habit_id: habit.id.to_string(),
            frequency: habit.frequency.to_string(),
            priority: habit.priority,
            streak_start_date: habit.streak_start_date,
            name: habit.name,
            emoji: habit.emoji,
            category: habit.category,
        })
        .collect();

    // sort_by is stable, so ties keep the repository order
    match sort_key {
        SortKey::Position => {}
        SortKey::Name => habits.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        SortKey::Streak => habits.sort_by(|a, b| b.current_streak.cmp(&a.current_streak)),
        SortKey::Priority => habits.sort_by_key(|h| h.priority.rank()),
    }

    let message = render_list(&habits);
    Ok(ListHabitsResponse { habits, message })
}

fn render_list(habits: &[HabitListItem]) -> String {
    if habits.is_empty() {
        return "No habits found. Create your first habit to get started!".to_string();
    }

    let header = format!("📋 **Habit Summary** ({} habits)\n\n", habits.len());
    let lines = habits
        .iter()
        .map(|h| {
            format!(
                "{} **{}** [{}]\n   🔥 Streak: {} days | ⭐ Priority: {} | 📅 Since {}{}{}\n   ID: {}",
                h.emoji.as_deref().unwrap_or("🎯"),
                h.name,
                h.frequency,
                h.current_streak,
                h.priority,
                h.streak_start_date,
                if h.completed_today { " | ✅ done today" } else { "" },
                if h.retired { " | 🏆 successful" } else { "" },
                h.habit_id,
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}{}", header, lines)
}
