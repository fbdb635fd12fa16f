/// Tool for the weekly progress grid
///
/// This module implements the habit_week MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{weekly_progress, WeeklyProgress};
use crate::storage::HabitRepository;
use crate::tools::{parse_optional_day, ToolError};

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct WeekParams {
    /// Any day in the wanted week, YYYY-MM-DD (default: today)
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub progress: WeeklyProgress,
    pub message: String,
}

pub fn get_weekly_progress<R: HabitRepository + ?Sized>(
    repo: &R,
    params: WeekParams,
    today: NaiveDate,
) -> Result<WeekResponse, ToolError> {
    let day = parse_optional_day(params.date.as_deref())?.unwrap_or(today);
    let habits = repo.load()?;
    let progress = weekly_progress(&habits, day)?;

    let days = progress.days();
    let mut message = format!(
        "📅 **Week of {} - {}**\n",
        days[0].format("%b %-d"),
        days[6].format("%b %-d, %Y")
    );
    message.push_str("Mo Tu We Th Fr Sa Su\n");
    for row in &progress.rows {
        let cells: Vec<&str> = row.days.iter().map(|done| if *done { "✅" } else { "▫️" }).collect();
        message.push_str(&format!(
            "{}  {} ({}/7)\n",
            cells.join(" "),
            row.name,
            row.completed_count()
        ));
    }

    Ok(WeekResponse { progress, message })
}
