/// Habit entity and related functionality
///
/// This module defines the Habit record the repository owns, the draft used
/// to add one, and the partial update used to edit one, along with the
/// validation rules shared by both.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Frequency, HabitId, Priority};

const MAX_NAME_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 500;
const MAX_LABEL_LEN: usize = 50;

/// A habit the user wants to keep up every day
///
/// `completed_dates` is a set: it never holds the same day twice, and its
/// iteration order carries no meaning for the streak calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub emoji: Option<String>,
    pub frequency: Frequency,
    pub priority: Priority,
    /// Earliest day that may count toward the streak
    pub streak_start_date: NaiveDate,
    pub has_end_date: bool,
    /// Day after which the habit counts as retired (only if `has_end_date`)
    pub streak_end_date: Option<NaiveDate>,
    /// Days on which the habit was marked done
    pub completed_dates: BTreeSet<NaiveDate>,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
}

/// Everything needed to add a habit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitDraft {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub emoji: Option<String>,
    pub frequency: Frequency,
    pub priority: Priority,
    /// Defaults to `today` when omitted
    pub streak_start_date: Option<NaiveDate>,
}

impl HabitDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A partial edit of an existing habit
///
/// `None` leaves a field alone. For the optional fields, `Some(None)` clears
/// the value. Setting `end_date` to `Some(None)` turns the end date off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub emoji: Option<Option<String>>,
    pub frequency: Option<Frequency>,
    pub priority: Option<Priority>,
    pub streak_start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
}

impl HabitUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Habit {
    /// Create a new habit from a draft with validation
    ///
    /// The streak starts on `today` unless the draft says otherwise.
    pub fn new(draft: HabitDraft, today: NaiveDate) -> Result<Self, DomainError> {
        let name = Self::validate_name(&draft.name)?;
        Self::validate_description(&draft.description)?;
        Self::validate_label("Category", &draft.category)?;
        Self::validate_label("Emoji", &draft.emoji)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            description: draft.description,
            category: draft.category,
            emoji: draft.emoji,
            frequency: draft.frequency,
            priority: draft.priority,
            streak_start_date: draft.streak_start_date.unwrap_or(today),
            has_end_date: false,
            streak_end_date: None,
            completed_dates: BTreeSet::new(),
            created_at: Utc::now(),
        })
    }

    /// Apply a partial update
    ///
    /// Every new value is validated before any field changes, so a failed
    /// update leaves the habit untouched.
    pub fn apply(&mut self, update: HabitUpdate) -> Result<(), DomainError> {
        let name = match update.name {
            Some(ref new_name) => Some(Self::validate_name(new_name)?),
            None => None,
        };
        if let Some(ref new_desc) = update.description {
            Self::validate_description(new_desc)?;
        }
        if let Some(ref new_category) = update.category {
            Self::validate_label("Category", new_category)?;
        }
        if let Some(ref new_emoji) = update.emoji {
            Self::validate_label("Emoji", new_emoji)?;
        }

        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(new_description) = update.description {
            self.description = new_description;
        }
        if let Some(new_category) = update.category {
            self.category = new_category;
        }
        if let Some(new_emoji) = update.emoji {
            self.emoji = new_emoji;
        }
        if let Some(new_frequency) = update.frequency {
            self.frequency = new_frequency;
        }
        if let Some(new_priority) = update.priority {
            self.priority = new_priority;
        }
        if let Some(new_start) = update.streak_start_date {
            self.streak_start_date = new_start;
        }
        if let Some(end_date) = update.end_date {
            self.has_end_date = end_date.is_some();
            self.streak_end_date = end_date;
        }

        Ok(())
    }

    /// Whether the habit's end date has passed
    ///
    /// Presentation reads this to file the habit under "successful"; the
    /// streak calculation ignores it.
    pub fn is_retired(&self, today: NaiveDate) -> bool {
        match (self.has_end_date, self.streak_end_date) {
            (true, Some(end)) => today > end,
            _ => false,
        }
    }

    // Validation helper methods

    fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::InvalidHabitName(format!(
                "Habit name cannot be longer than {} characters",
                MAX_NAME_LEN
            )));
        }

        Ok(trimmed.to_string())
    }

    fn validate_description(description: &Option<String>) -> Result<(), DomainError> {
        if let Some(desc) = description {
            if desc.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(DomainError::Validation {
                    message: format!(
                        "Description cannot be longer than {} characters",
                        MAX_DESCRIPTION_LEN
                    ),
                });
            }
        }
        Ok(())
    }

    fn validate_label(field: &str, value: &Option<String>) -> Result<(), DomainError> {
        if let Some(label) = value {
            let trimmed = label.trim();
            if trimmed.is_empty() {
                return Err(DomainError::InvalidValue {
                    message: format!("{} cannot be empty if specified", field),
                });
            }
            if trimmed.chars().count() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidValue {
                    message: format!("{} cannot be longer than {} characters", field, MAX_LABEL_LEN),
                });
            }
        }
        Ok(())
    }
}

/// Starter habits for an empty repository
pub fn default_habits(today: NaiveDate) -> Vec<Habit> {
    ["Gym", "Meditate", "Drink Water"]
        .into_iter()
        .filter_map(|name| Habit::new(HabitDraft::named(name), today).ok())
        .collect()
}
