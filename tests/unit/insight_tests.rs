/// Insight generation with a deterministic random source
use chrono::{Duration, NaiveDate};
use habit_streaks_mcp::insights::messages;
use habit_streaks_mcp::insights::PerformanceTier;
use habit_streaks_mcp::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
}

/// A habit with a run of `days` ending today
fn habit_on_run(name: &str, priority: Priority, days: i64) -> Habit {
    let start = today() - Duration::days(60);
    let mut habit = Habit::new(
        HabitDraft {
            priority,
            streak_start_date: Some(start),
            ..HabitDraft::named(name)
        },
        start,
    )
    .unwrap();
    habit.completed_dates = (0..days).map(|k| today() - Duration::days(k)).collect();
    habit
}

#[test]
fn test_empty_collection_uses_empty_state() {
    let mut random = SequenceRandom::new(vec![0.9]);
    let summary = summarize(&[], today(), &mut random);

    assert_eq!(summary.message, "Start your wellness journey by tracking your habits!");
    assert_eq!(summary.affirmation, messages::AFFIRMATIONS[0]);
    assert!(summary.stats.is_none());
}

#[test]
fn test_longest_streak_is_max_of_habits() {
    let habits = vec![
        habit_on_run("Walk", Priority::Low, 2),
        habit_on_run("Journal", Priority::Medium, 9),
        habit_on_run("Floss", Priority::Medium, 0),
    ];
    let mut random = SequenceRandom::new(vec![0.0]);
    let summary = summarize(&habits, today(), &mut random);
    let stats = summary.stats.unwrap();

    let expected = habits.iter().map(|h| calculate_streak(h, today())).max().unwrap();
    assert_eq!(stats.longest_streak, expected);
    assert_eq!(stats.longest_streak, 9);
    assert_eq!(stats.total_streaks, 11);
    assert_eq!(stats.active_habits, 3);
    assert_eq!(summary.tier, Some(PerformanceTier::High));
}

#[test]
fn test_deterministic_pick_from_tier_pool() {
    let habits = vec![habit_on_run("Journal", Priority::High, 4)];
    let mut random = SequenceRandom::new(vec![0.5, 0.95]);
    let summary = summarize(&habits, today(), &mut random);

    assert_eq!(summary.tier, Some(PerformanceTier::Medium));
    assert!(!summary.missed_days);
    assert_eq!(summary.message, messages::MEDIUM_STREAK[1]);
    assert_eq!(summary.affirmation, messages::AFFIRMATIONS[9]);
}

#[test]
fn test_missed_days_pool_wins_over_tier() {
    let habits = vec![
        habit_on_run("Run", Priority::Low, 10),
        habit_on_run("Meds", Priority::High, 1),
        habit_on_run("Stretch", Priority::High, 4),
    ];
    let mut random = SequenceRandom::new(vec![0.0, 0.0]);
    let summary = summarize(&habits, today(), &mut random);

    assert!(summary.missed_days);
    assert_eq!(summary.tier, Some(PerformanceTier::High));
    assert_eq!(summary.message, messages::MISSED_DAYS[0]);
    assert_eq!(summary.stats.unwrap().avg_high_priority_streak, 2.5);
}

#[test]
fn test_no_missed_days_when_nothing_is_running() {
    let habits = vec![habit_on_run("Meds", Priority::High, 0)];
    let mut random = SequenceRandom::new(vec![0.0]);
    let summary = summarize(&habits, today(), &mut random);

    assert!(!summary.missed_days);
    assert_eq!(summary.tier, Some(PerformanceTier::Low));
    assert_eq!(summary.message, messages::LOW_STREAK[0]);
}
