/// Streak calculation and completion toggling through the public API
use chrono::NaiveDate;
use habit_streaks_mcp::*;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn habit_with(start: &str, completed: &[&str]) -> Habit {
    let mut habit = Habit::new(
        HabitDraft {
            streak_start_date: Some(day(start)),
            ..HabitDraft::named("Stretch")
        },
        day(start),
    )
    .unwrap();
    habit.completed_dates = completed.iter().map(|d| day(d)).collect();
    habit
}

#[test]
fn test_empty_history_has_no_streak() {
    let habit = habit_with("2024-01-01", &[]);
    for today in ["2024-01-01", "2024-01-02", "2025-06-30"] {
        assert_eq!(calculate_streak(&habit, day(today)), 0);
    }
}

#[test]
fn test_only_today_marked() {
    let habit = habit_with("2024-01-07", &["2024-01-07"]);
    assert_eq!(calculate_streak(&habit, day("2024-01-07")), 1);
}

#[test]
fn test_run_ending_yesterday_counts_in_full() {
    for n in 1..=10i64 {
        let today = day("2024-03-15");
        let dates: Vec<NaiveDate> = (1..=n).map(|k| today - chrono::Duration::days(k)).collect();
        let start = *dates.last().unwrap();
        assert_eq!(current_streak(dates, start, today), n as u32, "run of {}", n);
    }
}

#[test]
fn test_week_scenarios() {
    let habit = habit_with("2024-01-01", &["2024-01-05", "2024-01-06", "2024-01-07"]);

    assert_eq!(calculate_streak(&habit, day("2024-01-07")), 3);
    // Jan 8 unmarked: the grace day keeps the run alive
    assert_eq!(calculate_streak(&habit, day("2024-01-08")), 3);
    assert_eq!(calculate_streak(&habit, day("2024-01-09")), 0);
}

#[test]
fn test_days_before_start_are_excluded() {
    let habit = habit_with("2024-01-01", &["2023-12-31", "2024-01-01", "2024-01-02"]);
    assert_eq!(calculate_streak(&habit, day("2024-01-02")), 2);
}

#[test]
fn test_disconnected_pre_start_entry_changes_nothing() {
    let today = day("2024-02-10");
    let base = habit_with("2024-02-01", &["2024-02-08", "2024-02-09", "2024-02-10"]);
    let expected = calculate_streak(&base, today);

    for stray in ["2024-01-31", "2024-01-15", "2023-02-10"] {
        let with_stray = base.toggled(day(stray));
        assert_eq!(calculate_streak(&with_stray, today), expected, "stray {}", stray);
    }
}

#[test]
fn test_future_start_gives_zero_even_when_marked() {
    let habit = habit_with("2024-01-10", &["2024-01-07"]);
    assert_eq!(calculate_streak(&habit, day("2024-01-07")), 0);
}

#[test]
fn test_duplicates_do_not_change_count() {
    let start = day("2024-01-01");
    let today = day("2024-01-07");
    let clean = vec![day("2024-01-05"), day("2024-01-06"), day("2024-01-07")];
    let mut noisy = clean.clone();
    noisy.extend(clean.iter().copied());
    noisy.push(day("2024-01-06"));

    assert_eq!(current_streak(noisy, start, today), current_streak(clean, start, today));
}

#[test]
fn test_toggle_round_trip_restores_habit() {
    let habit = habit_with("2024-01-01", &["2024-01-03", "2024-01-04"]);

    for d in ["2024-01-03", "2024-01-05", "2023-12-01"] {
        let twice = habit.toggled(day(d)).toggled(day(d));
        assert_eq!(twice, habit);
    }
}

#[test]
fn test_toggle_reports_direction() {
    let habit = habit_with("2024-01-01", &["2024-01-03"]);

    let (added, outcome) = toggle_completion(&habit, day("2024-01-04"));
    assert_eq!(outcome, ToggleOutcome::Marked);
    assert!(added.contains(&day("2024-01-04")));

    let (removed, outcome) = toggle_completion(&habit, day("2024-01-03"));
    assert_eq!(outcome, ToggleOutcome::Unmarked);
    assert!(removed.is_empty());
    // input untouched
    assert!(habit.is_completed_on(day("2024-01-03")));
}

#[test]
fn test_streak_summary_tracks_best_run() {
    let habit = habit_with(
        "2024-01-01",
        &["2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05", "2024-01-09"],
    );
    let summary = StreakSummary::for_habit(&habit, day("2024-01-10"));

    assert_eq!(summary.current, 1);
    assert_eq!(summary.longest, 4);
    assert_eq!(summary.last_completed, Some(day("2024-01-09")));
    assert_eq!(summary.total_completions, 5);
}

#[test]
fn test_walk_stops_at_first_calendar_day() {
    let first = NaiveDate::MIN;
    assert_eq!(current_streak(vec![first], first, first), 1);
    assert_eq!(current_streak(vec![first.succ_opt().unwrap()], first, first), 0);
}
