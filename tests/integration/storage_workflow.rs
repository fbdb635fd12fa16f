/// Tool workflows against a SQLite database on disk
use chrono::NaiveDate;
use habit_streaks_mcp::tools::*;
use habit_streaks_mcp::*;
use tempfile::NamedTempFile;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn create(storage: &SqliteStorage, name: &str, start: &str, today: NaiveDate) -> String {
    create_habit(
        storage,
        CreateHabitParams {
            name: name.to_string(),
            streak_start_date: Some(start.to_string()),
            ..CreateHabitParams::default()
        },
        today,
    )
    .unwrap()
    .habit_id
}

fn toggle(storage: &SqliteStorage, habit_id: &str, date: &str, today: NaiveDate) -> ToggleResponse {
    toggle_habit(
        storage,
        ToggleParams {
            habit_id: habit_id.to_string(),
            date: Some(date.to_string()),
        },
        today,
    )
    .unwrap()
}

#[test]
fn test_streak_workflow_survives_reopen() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_file.path().to_path_buf();
    let today = day("2024-01-07");

    let habit_id = {
        let storage = SqliteStorage::new(db_path.clone()).unwrap();
        let habit_id = create(&storage, "Push-ups", "2024-01-01", today);
        create(&storage, "Read", "2024-01-01", today);

        for date in ["2024-01-05", "2024-01-06"] {
            toggle(&storage, &habit_id, date, today);
        }
        let marked = toggle(&storage, &habit_id, "2024-01-07", today);
        assert_eq!(marked.outcome, ToggleOutcome::Marked);
        assert_eq!(marked.current_streak, 3);
        habit_id
    };

    let storage = SqliteStorage::new(db_path).unwrap();
    let habits = storage.load().unwrap();
    let names: Vec<&str> = habits.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Push-ups", "Read"]);

    let pushups = &habits[0];
    assert_eq!(pushups.id.to_string(), habit_id);
    assert_eq!(pushups.completed_dates.len(), 3);
    assert_eq!(calculate_streak(pushups, day("2024-01-08")), 3);
    assert_eq!(calculate_streak(pushups, day("2024-01-09")), 0);

    let unmarked = toggle(&storage, &habit_id, "2024-01-07", today);
    assert_eq!(unmarked.outcome, ToggleOutcome::Unmarked);
    // Jan 7 unmarked: the run through Jan 6 still counts via the grace day
    assert_eq!(unmarked.current_streak, 2);
}

#[test]
fn test_pre_start_marks_do_not_count() {
    let storage = SqliteStorage::in_memory().unwrap();
    let today = day("2024-01-02");
    let habit_id = create(&storage, "Floss", "2024-01-01", today);

    let before = toggle(&storage, &habit_id, "2023-12-31", today);
    assert!(before.message.contains("don't count"));
    toggle(&storage, &habit_id, "2024-01-01", today);
    let last = toggle(&storage, &habit_id, "2024-01-02", today);

    assert_eq!(last.current_streak, 2);
}

#[test]
fn test_update_list_and_delete() {
    let storage = SqliteStorage::in_memory().unwrap();
    let today = day("2024-02-10");
    let gym = create(&storage, "Gym", "2024-02-01", today);
    let water = create(&storage, "Water", "2024-02-01", today);

    update_habit(
        &storage,
        UpdateHabitParams {
            habit_id: gym.clone(),
            priority: Some("high".to_string()),
            streak_end_date: Some("2024-02-05".to_string()),
            ..UpdateHabitParams::default()
        },
        today,
    )
    .unwrap();
    toggle(&storage, &water, "2024-02-10", today);

    let listed = list_habits(
        &storage,
        ListHabitsParams {
            sort_by: Some("streak".to_string()),
        },
        today,
    )
    .unwrap();
    assert_eq!(listed.habits[0].name, "Water");
    assert!(listed.habits[0].completed_today);
    let gym_item = listed.habits.iter().find(|h| h.habit_id == gym).unwrap();
    assert!(gym_item.retired);
    assert_eq!(gym_item.priority, Priority::High);

    delete_habit(&storage, DeleteHabitParams { habit_id: gym.clone() }).unwrap();
    assert_eq!(storage.load().unwrap().len(), 1);

    let again = delete_habit(&storage, DeleteHabitParams { habit_id: gym });
    assert!(matches!(
        again,
        Err(ToolError::Storage(StorageError::HabitNotFound { .. }))
    ));
}

#[test]
fn test_invalid_params_are_reported() {
    let storage = SqliteStorage::in_memory().unwrap();
    let today = day("2024-02-10");
    let habit_id = create(&storage, "Yoga", "2024-02-01", today);

    let bad_date = toggle_habit(
        &storage,
        ToggleParams {
            habit_id: habit_id.clone(),
            date: Some("2024-02-30".to_string()),
        },
        today,
    );
    assert!(matches!(
        bad_date,
        Err(ToolError::Domain(DomainError::InvalidDate { .. }))
    ));

    let bad_id = toggle_habit(
        &storage,
        ToggleParams {
            habit_id: "not-a-uuid".to_string(),
            date: None,
        },
        today,
    );
    assert!(matches!(bad_id, Err(ToolError::InvalidParams(_))));

    let empty_name = create_habit(&storage, CreateHabitParams::default(), today);
    assert!(matches!(
        empty_name,
        Err(ToolError::Domain(DomainError::InvalidHabitName(_)))
    ));
}

#[test]
fn test_corrupt_completion_date_fails_loading() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_file.path().to_path_buf();
    let today = day("2024-03-01");

    let habit_id = {
        let storage = SqliteStorage::new(db_path.clone()).unwrap();
        create(&storage, "Sleep early", "2024-03-01", today)
    };

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    conn.execute(
        "INSERT INTO habit_completions (habit_id, completed_on) VALUES (?1, 'someday')",
        [&habit_id],
    )
    .unwrap();
    drop(conn);

    let storage = SqliteStorage::new(db_path).unwrap();
    assert!(matches!(
        storage.load(),
        Err(StorageError::Domain(DomainError::InvalidDate { .. }))
    ));
}

#[test]
fn test_weekly_progress_and_insights() {
    let storage = SqliteStorage::in_memory().unwrap();
    // a Wednesday
    let today = day("2024-01-10");
    let habit_id = create(&storage, "Meditate", "2024-01-01", today);
    for date in ["2024-01-08", "2024-01-09", "2024-01-10"] {
        toggle(&storage, &habit_id, date, today);
    }

    let week = get_weekly_progress(&storage, WeekParams::default(), today).unwrap();
    assert_eq!(week.progress.week_start, day("2024-01-08"));
    assert_eq!(
        week.progress.rows[0].days,
        [true, true, true, false, false, false, false]
    );

    let mut random = SequenceRandom::new(vec![0.0, 0.0]);
    let insights = get_habit_insights(&storage, InsightsParams {}, today, &mut random).unwrap();
    let stats = insights.summary.stats.unwrap();
    assert_eq!(stats.longest_streak, 3);
    assert!(insights.message.contains("Longest streak: 3 days"));
}
