/// Public library interface for the Habit Streaks MCP server
///
/// This module exports the server implementation and the domain types so
/// other applications and tests can compute streaks without going through
/// the JSON-RPC layer.

use std::path::PathBuf;
use thiserror::Error;

pub mod clock;
pub mod domain;
pub mod insights;
pub mod mcp;
pub mod storage;
pub mod tools;

pub use clock::{Clock, DayWatcher, FixedClock, SystemClock};
pub use domain::*;
pub use insights::{summarize, InsightSummary, RandomSource, SequenceRandom, ThreadRandom};
pub use storage::{HabitRepository, SqliteStorage, StorageError};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Startup options for the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite database file
    pub database: PathBuf,
    /// Insert the starter habits when the database has none
    pub seed_defaults: bool,
}

/// Main habit tracker server
///
/// Owns the repository plus the two outside inputs the domain needs: the
/// reference date and a random source for insight messages.
pub struct HabitTrackerServer {
    storage: SqliteStorage,
    clock: Box<dyn Clock>,
    random: Box<dyn RandomSource>,
}

impl HabitTrackerServer {
    /// Open the database at `db_path` with the system clock
    ///
    /// This will initialize the SQLite schema if it doesn't already exist.
    pub fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Habit Streaks server with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;
        Ok(Self::with_parts(
            storage,
            Box::new(SystemClock),
            Box::new(ThreadRandom),
        ))
    }

    /// Open the server described by `config`, seeding starter habits if asked
    pub fn open(config: &ServerConfig) -> Result<Self, ServerError> {
        let server = Self::new(config.database.clone())?;
        if config.seed_defaults {
            let seeded = server.seed_defaults_if_empty()?;
            if seeded > 0 {
                tracing::info!("Seeded {} starter habits", seeded);
            }
        }
        Ok(server)
    }

    /// Assemble a server from explicit parts
    pub fn with_parts(
        storage: SqliteStorage,
        clock: Box<dyn Clock>,
        random: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            storage,
            clock,
            random,
        }
    }

    /// Today's date according to the server clock
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    /// Insert the starter habits into an empty database
    ///
    /// Returns how many habits were added; an existing list is left alone.
    pub fn seed_defaults_if_empty(&self) -> Result<usize, ServerError> {
        if !self.storage.load()?.is_empty() {
            return Ok(0);
        }
        let habits = domain::default_habits(self.today());
        self.storage.replace(&habits)?;
        Ok(habits.len())
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin closes or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        let habits = self.storage.load()?;
        tracing::info!("Server started successfully, found {} existing habits", habits.len());

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn storage_and_random(&mut self) -> (&SqliteStorage, &mut dyn RandomSource) {
        (&self.storage, self.random.as_mut())
    }
}
