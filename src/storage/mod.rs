/// Storage layer for persisting habit data
///
/// The repository owns the canonical, ordered habit collection. The streak
/// calculator and insight generator never see it; they only receive the
/// records it returns.

pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::*;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{DomainError, Habit, HabitId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Corrupt habit record: {0}")]
    Domain(#[from] DomainError),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the habit repository
///
/// `load` returns habits in the order they were added. Writes replace whole
/// records; there is a single writer, so the last write wins.
pub trait HabitRepository {
    /// All habits in insertion order
    fn load(&self) -> Result<Vec<Habit>, StorageError>;

    /// Get a habit by ID
    fn get(&self, habit_id: &HabitId) -> Result<Habit, StorageError>;

    /// Append a new habit
    fn add(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Overwrite an existing habit, completion set included
    fn update(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Delete a habit and its completions
    fn remove(&self, habit_id: &HabitId) -> Result<(), StorageError>;

    /// Replace the whole collection
    fn replace(&self, habits: &[Habit]) -> Result<(), StorageError>;

    /// Replace only the completion set of a habit
    fn set_completed_dates(
        &self,
        habit_id: &HabitId,
        dates: &BTreeSet<NaiveDate>,
    ) -> Result<(), StorageError>;
}
