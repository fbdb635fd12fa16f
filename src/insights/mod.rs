/// Insight generation over the whole habit collection
///
/// Streaks are recomputed for every call; nothing is cached. The only side
/// input besides `today` is the random source used to pick a message and an
/// affirmation from their pools.

pub mod messages;
pub mod random;

pub use random::{RandomSource, SequenceRandom, ThreadRandom};

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{calculate_streak, Habit, Priority};

/// Longest streak needed for the high tier
const HIGH_TIER_DAYS: u32 = 7;
/// Longest streak needed for the medium tier
const MEDIUM_TIER_DAYS: u32 = 3;
/// High-priority habits below this streak count as neglected
const NEGLECTED_BELOW_DAYS: u32 = 3;

/// Coarse classification of the best current streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    High,
    Medium,
    Low,
}

impl PerformanceTier {
    pub fn from_longest_streak(longest: u32) -> Self {
        if longest >= HIGH_TIER_DAYS {
            PerformanceTier::High
        } else if longest >= MEDIUM_TIER_DAYS {
            PerformanceTier::Medium
        } else {
            PerformanceTier::Low
        }
    }

    fn pool(&self) -> &'static [&'static str] {
        match self {
            PerformanceTier::High => &messages::HIGH_STREAK,
            PerformanceTier::Medium => &messages::MEDIUM_STREAK,
            PerformanceTier::Low => &messages::LOW_STREAK,
        }
    }
}

/// Aggregate streak numbers across all habits
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightStats {
    pub total_streaks: u32,
    pub longest_streak: u32,
    pub active_habits: usize,
    /// Mean streak of high-priority habits, one decimal
    pub avg_high_priority_streak: f64,
}

/// What the insight panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    pub message: String,
    pub affirmation: String,
    /// `None` when there are no habits yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<InsightStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<PerformanceTier>,
    pub missed_days: bool,
}

/// Summarize the collection as of `today`
pub fn summarize<R>(habits: &[Habit], today: NaiveDate, random: &mut R) -> InsightSummary
where
    R: RandomSource + ?Sized,
{
    if habits.is_empty() {
        return InsightSummary {
            message: messages::EMPTY_STATE_MESSAGE.to_string(),
            affirmation: messages::AFFIRMATIONS[0].to_string(),
            stats: None,
            tier: None,
            missed_days: false,
        };
    }

    let streaks: Vec<(Priority, u32)> = habits
        .iter()
        .map(|habit| (habit.priority, calculate_streak(habit, today)))
        .collect();

    let total_streaks = streaks.iter().map(|(_, streak)| *streak).sum::<u32>();
    let longest_streak = streaks.iter().map(|(_, streak)| *streak).max().unwrap_or(0);
    let high_priority: Vec<u32> = streaks
        .iter()
        .filter(|(priority, _)| *priority == Priority::High)
        .map(|(_, streak)| *streak)
        .collect();

    let tier = PerformanceTier::from_longest_streak(longest_streak);
    let missed_days = longest_streak > 0
        && high_priority.iter().any(|streak| *streak < NEGLECTED_BELOW_DAYS);

    let pool: &[&str] = if missed_days {
        &messages::MISSED_DAYS
    } else {
        tier.pool()
    };
    let message = random.pick(pool).to_string();
    let affirmation = random.pick(&messages::AFFIRMATIONS).to_string();

    tracing::debug!(
        habits = habits.len(),
        longest_streak,
        ?tier,
        missed_days,
        "Generated habit insights"
    );

    InsightSummary {
        message,
        affirmation,
        stats: Some(InsightStats {
            total_streaks,
            longest_streak,
            active_habits: habits.len(),
            avg_high_priority_streak: round_to_tenth(mean(&high_priority)),
        }),
        tier: Some(tier),
        missed_days,
    }
}

fn mean(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
