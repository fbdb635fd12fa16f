/// MCP tools for habit management
///
/// Each tool combines repository reads and writes with the pure domain
/// functions. "Today" is always passed in by the caller.

pub mod create;
pub mod delete;
pub mod insights;
pub mod list;
pub mod status;
pub mod toggle;
pub mod update;
pub mod week;

// Re-export tool functions for easy access
pub use create::*;
pub use delete::*;
pub use insights::*;
pub use list::*;
pub use status::*;
pub use toggle::*;
pub use update::*;
pub use week::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::dates::parse_day;
use crate::domain::{DomainError, HabitId};
use crate::storage::StorageError;

/// Errors a tool call can report back to the client
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub(crate) fn parse_habit_id(raw: &str) -> Result<HabitId, ToolError> {
    if raw.trim().is_empty() {
        return Err(ToolError::InvalidParams("Habit ID cannot be empty".to_string()));
    }
    HabitId::from_string(raw)
        .map_err(|_| ToolError::InvalidParams(format!("Invalid habit ID format: '{}'", raw)))
}

/// Parse an optional `yyyy-MM-dd` parameter
pub(crate) fn parse_optional_day(raw: Option<&str>) -> Result<Option<NaiveDate>, ToolError> {
    raw.map(parse_day).transpose().map_err(ToolError::from)
}

pub(crate) fn plural(count: u32) -> &'static str {
    if count == 1 { "" } else { "s" }
}
