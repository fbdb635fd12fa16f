/// Main entry point for the Habit Streaks MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::builder::FalseyValueParser;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use habit_streaks_mcp::{HabitTrackerServer, ServerConfig};

/// Get the default database path, trying user directories before falling back
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let potential_paths = [
        dirs::home_dir().map(|mut p| {
            p.push(".habit_streaks");
            p
        }),
        dirs::data_dir().map(|mut p| {
            p.push("habit_streaks");
            p
        }),
        dirs::config_dir().map(|mut p| {
            p.push("habit_streaks");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".habit_streaks");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            // Only use directories we can actually write to
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("streaks.db"));
            }
        }
    }

    let mut temp_path = std::env::temp_dir();
    temp_path.push("habit_streaks");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("streaks.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the Habit Streaks MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, env = "HABIT_STREAKS_DB")]
    database: Option<PathBuf>,

    /// Add the starter habits (Gym, Meditate, Drink Water) to an empty database
    /// The variable takes the usual spellings: 1/0, yes/no, on/off, true/false
    #[arg(long, env = "HABIT_STREAKS_SEED_DEFAULTS", value_parser = FalseyValueParser::new())]
    seed_defaults: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_streaks_mcp={}", log_level))
        .with_writer(std::io::stderr) // stdout carries the protocol
        .init();

    info!("Starting Habit Streaks MCP server");

    let database = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", database.display());

    let config = ServerConfig {
        database,
        seed_defaults: args.seed_defaults,
    };
    let server = HabitTrackerServer::open(&config)?;

    server.run().await?;

    info!("Habit Streaks MCP server shutdown complete");
    Ok(())
}
