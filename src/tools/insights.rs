/// Tool for providing habit insights
///
/// This module implements the habit_insights MCP tool on top of the insight
/// generator.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::insights::{summarize, InsightSummary, RandomSource};
use crate::storage::HabitRepository;
use crate::tools::ToolError;

/// The insights tool takes no arguments
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct InsightsParams {}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub summary: InsightSummary,
    pub message: String,
}

/// Analyze all habits and pick a message and an affirmation
pub fn get_habit_insights<R: HabitRepository + ?Sized>(
    repo: &R,
    _params: InsightsParams,
    today: NaiveDate,
    random: &mut dyn RandomSource,
) -> Result<InsightsResponse, ToolError> {
    let habits = repo.load()?;
    let summary = summarize(&habits, today, random);

    let mut message = format!("{}\n\n💬 {}", summary.message, summary.affirmation);
    if let Some(stats) = &summary.stats {
        message.push_str(&format!(
            "\n\n📊 **Stats**\n- Active habits: {}\n- Longest streak: {} days\n- Total streak days: {}\n- Avg high-priority streak: {:.1} days",
            stats.active_habits,
            stats.longest_streak,
            stats.total_streaks,
            stats.avg_high_priority_streak,
        ));
    }

    Ok(InsightsResponse { summary, message })
}
