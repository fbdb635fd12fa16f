/// Domain module containing core business logic and data types
///
/// This module defines the Habit entity, the completion toggle and the
/// streak calculator. Nothing in here touches storage or the system clock;
/// every function that needs "today" takes it as a parameter.

pub mod completion;
pub mod dates;
pub mod habit;
pub mod streak;
pub mod types;
pub mod weekly;

// Re-export public types for easy access
pub use completion::*;
pub use habit::*;
pub use streak::*;
pub use types::*;
pub use weekly::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid date '{value}': expected yyyy-MM-dd")]
    InvalidDate { value: String },

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    #[error("Unknown {kind} '{value}'. Valid options: {expected}")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
}
