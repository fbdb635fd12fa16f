/// SQLite implementation of the habit repository
///
/// This module provides the concrete SQLite implementation for storing and
/// retrieving habits. Every date read back is re-validated; a malformed
/// value fails the whole read instead of being skipped.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::dates::{format_day, parse_day};
use crate::domain::{DomainError, Habit, HabitId};
use crate::storage::{migrations, HabitRepository, StorageError};

const HABIT_COLUMNS: &str = "id, name, description, category, emoji, frequency, priority, \
     streak_start_date, has_end_date, streak_end_date, created_at";

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the operations defined in the HabitRepository trait.
pub struct SqliteStorage {
    conn: Connection,
}

/// A habits row exactly as stored, before validation
struct HabitRow {
    id: String,
    name: String,
    description: Option<String>,
    category: Option<String>,
    emoji: Option<String>,
    frequency: String,
    priority: String,
    streak_start_date: String,
    has_end_date: bool,
    streak_end_date: Option<String>,
    created_at: String,
}

impl HabitRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            category: row.get(3)?,
            emoji: row.get(4)?,
            frequency: row.get(5)?,
            priority: row.get(6)?,
            streak_start_date: row.get(7)?,
            has_end_date: row.get(8)?,
            streak_end_date: row.get(9)?,
            created_at: row.get(10)?,
        })
    }

    fn into_habit(self, completed_dates: BTreeSet<NaiveDate>) -> Result<Habit, StorageError> {
        let id = HabitId::from_string(&self.id).map_err(|_| DomainError::InvalidValue {
            message: format!("Invalid habit ID '{}'", self.id),
        })?;

        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|_| DomainError::InvalidValue {
                message: format!("Invalid creation time '{}' for habit {}", self.created_at, self.id),
            })?
            .with_timezone(&Utc);

        let streak_end_date = self
            .streak_end_date
            .as_deref()
            .map(parse_day)
            .transpose()?;

        Ok(Habit {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            emoji: self.emoji,
            frequency: self.frequency.parse()?,
            priority: self.priority.parse()?,
            streak_start_date: parse_day(&self.streak_start_date)?,
            has_end_date: self.has_end_date,
            streak_end_date,
            completed_dates,
            created_at,
        })
    }
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(storage)
    }

    /// Storage backed by a private in-memory database
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    fn exists(&self, habit_id: &HabitId) -> Result<bool, StorageError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM habits WHERE id = ?1",
                params![habit_id.to_string()],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn completions_for(&self, habit_id: &str) -> Result<BTreeSet<NaiveDate>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT completed_on FROM habit_completions WHERE habit_id = ?1")?;
        let days = stmt
            .query_map(params![habit_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut dates = BTreeSet::new();
        for day in days {
            dates.insert(parse_day(&day)?);
        }
        Ok(dates)
    }

    fn all_completions(&self) -> Result<HashMap<String, BTreeSet<NaiveDate>>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT habit_id, completed_on FROM habit_completions")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut by_habit: HashMap<String, BTreeSet<NaiveDate>> = HashMap::new();
        for (habit_id, day) in rows {
            by_habit.entry(habit_id).or_default().insert(parse_day(&day)?);
        }
        Ok(by_habit)
    }
}

fn insert_habit(conn: &Connection, habit: &Habit, position: i64) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO habits (
            id, position, name, description, category, emoji, frequency, priority,
            streak_start_date, has_end_date, streak_end_date, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            habit.id.to_string(),
            position,
            habit.name,
            habit.description,
            habit.category,
            habit.emoji,
            habit.frequency.as_str(),
            habit.priority.as_str(),
            format_day(habit.streak_start_date),
            habit.has_end_date,
            habit.streak_end_date.map(format_day),
            habit.created_at.to_rfc3339(),
        ],
    )?;
    write_completions(conn, &habit.id.to_string(), &habit.completed_dates)
}

fn write_completions(
    conn: &Connection,
    habit_id: &str,
    dates: &BTreeSet<NaiveDate>,
) -> Result<(), StorageError> {
    conn.execute(
        "DELETE FROM habit_completions WHERE habit_id = ?1",
        params![habit_id],
    )?;

    let mut stmt = conn.prepare(
        "INSERT INTO habit_completions (habit_id, completed_on) VALUES (?1, ?2)",
    )?;
    for date in dates {
        stmt.execute(params![habit_id, format_day(*date)])?;
    }
    Ok(())
}

impl HabitRepository for SqliteStorage {
    fn load(&self) -> Result<Vec<Habit>, StorageError> {
        let sql = format!("SELECT {} FROM habits ORDER BY position, created_at", HABIT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], HabitRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut completions = self.all_completions()?;
        rows.into_iter()
            .map(|row| {
                let dates = completions.remove(&row.id).unwrap_or_default();
                row.into_habit(dates)
            })
            .collect()
    }

    fn get(&self, habit_id: &HabitId) -> Result<Habit, StorageError> {
        let sql = format!("SELECT {} FROM habits WHERE id = ?1", HABIT_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, params![habit_id.to_string()], HabitRow::from_row)
            .optional()?
            .ok_or_else(|| StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            })?;

        let dates = self.completions_for(&row.id)?;
        row.into_habit(dates)
    }

    fn add(&self, habit: &Habit) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        let position: i64 = tx.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM habits",
            [],
            |row| row.get(0),
        )?;
        insert_habit(&tx, habit, position)?;
        tx.commit()?;

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn update(&self, habit: &Habit) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        let rows_affected = tx.execute(
            "UPDATE habits SET
                name = ?2,
                description = ?3,
                category = ?4,
                emoji = ?5,
                frequency = ?6,
                priority = ?7,
                streak_start_date = ?8,
                has_end_date = ?9,
                streak_end_date = ?10
             WHERE id = ?1",
            params![
                habit.id.to_string(),
                habit.name,
                habit.description,
                habit.category,
                habit.emoji,
                habit.frequency.as_str(),
                habit.priority.as_str(),
                format_day(habit.streak_start_date),
                habit.has_end_date,
                habit.streak_end_date.map(format_day),
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit.id.to_string(),
            });
        }

        write_completions(&tx, &habit.id.to_string(), &habit.completed_dates)?;
        tx.commit()?;

        tracing::debug!("Updated habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn remove(&self, habit_id: &HabitId) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM habit_completions WHERE habit_id = ?1",
            params![habit_id.to_string()],
        )?;
        let rows_affected = tx.execute(
            "DELETE FROM habits WHERE id = ?1",
            params![habit_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }
        tx.commit()?;

        tracing::debug!("Deleted habit: {}", habit_id);
        Ok(())
    }

    fn replace(&self, habits: &[Habit]) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM habit_completions", [])?;
        tx.execute("DELETE FROM habits", [])?;
        for (position, habit) in habits.iter().enumerate() {
            insert_habit(&tx, habit, position as i64)?;
        }
        tx.commit()?;

        tracing::debug!("Replaced habit collection with {} habits", habits.len());
        Ok(())
    }

    fn set_completed_dates(
        &self,
        habit_id: &HabitId,
        dates: &BTreeSet<NaiveDate>,
    ) -> Result<(), StorageError> {
        if !self.exists(habit_id)? {
            return Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }

        let tx = self.conn.unchecked_transaction()?;
        write_completions(&tx, &habit_id.to_string(), dates)?;
        tx.commit()?;

        tracing::debug!("Stored {} completions for habit {}", dates.len(), habit_id);
        Ok(())
    }
}
