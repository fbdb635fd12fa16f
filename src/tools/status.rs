/// Tool for checking habit status and streaks
///
/// This module implements the habit_status MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Habit, StreakSummary};
use crate::storage::HabitRepository;
use crate::tools::{parse_habit_id, plural, ToolError};

/// Parameters for checking habit status
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StatusParams {
    /// ID of a specific habit (optional - shows all if omitted)
    pub habit_id: Option<String>,
}

/// Where a habit stands today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitState {
    /// Never marked since the streak start
    New,
    /// Marked today
    DoneToday,
    /// Streak alive only through the grace day
    AtRisk,
    /// No current streak
    Broken,
    /// End date has passed
    Retired,
}

/// Information about a single habit's status
#[derive(Debug, Serialize)]
pub struct HabitStatus {
    pub habit_id: String,
    pub name: String,
    pub state: HabitState,
    pub streak: StreakSummary,
}

/// Response from checking habit status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub habits: Vec<HabitStatus>,
    pub message: String,
}

/// Get status for one habit or all of them
pub fn get_habit_status<R: HabitRepository + ?Sized>(
    repo: &R,
    params: StatusParams,
    today: NaiveDate,
) -> Result<StatusResponse, ToolError> {
    let habits = match params.habit_id.as_deref() {
        Some(raw) => vec![repo.get(&parse_habit_id(raw)?)?],
        None => repo.load()?,
    };

    let statuses: Vec<HabitStatus> = habits.iter().map(|h| habit_status(h, today)).collect();
    let message = render_status(&statuses);

    Ok(StatusResponse {
        habits: statuses,
        message,
    })
}

pub fn habit_status(habit: &Habit, today: NaiveDate) -> HabitStatus {
    let streak = StreakSummary::for_habit(habit, today);

    let state = if habit.is_retired(today) {
        HabitState::Retired
    } else if habit.is_completed_on(today) {
        HabitState::DoneToday
    } else if streak.current > 0 {
        HabitState::AtRisk
    } else if streak.longest == 0 {
        HabitState::New
    } else {
        HabitState::Broken
    };

    HabitStatus {
        habit_id: habit.id.to_string(),
        name: habit.name.clone(),
        state,
        streak,
    }
}

fn render_status(statuses: &[HabitStatus]) -> String {
    if statuses.is_empty() {
        return "No habits yet. Create one to start a streak!".to_string();
    }

    statuses
        .iter()
        .map(|s| {
            let badge = match s.state {
                HabitState::New => "🆕",
                HabitState::DoneToday => "✅",
                HabitState::AtRisk => "⏳",
                HabitState::Broken => "💤",
                HabitState::Retired => "🏆",
            };
            let last = s
                .streak
                .last_completed
                .map(|d| d.to_string())
                .unwrap_or_else(|| "never".to_string());
            format!(
                "{} **{}**: {} day{} (best {}, {} total, last {})\n   {}",
                badge,
                s.name,
                s.streak.current,
                plural(s.streak.current),
                s.streak.longest,
                s.streak.total_completions,
                last,
                s.streak.motivational_message(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
