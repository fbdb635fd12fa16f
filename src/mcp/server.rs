/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the MCP server that:
/// 1. Reads one JSON-RPC request per line
/// 2. Runs tool calls against the habit repository
/// 3. Writes one JSON-RPC response per line
///
/// Requests are handled one at a time, so the repository has a single writer.

use std::time::Duration;

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::clock::DayWatcher;
use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{HabitTrackerServer, ServerError};

/// How often the server checks for a day rollover
const DAY_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// MCP server that handles communication with the client
pub struct McpServer {
    /// The underlying habit tracker server
    habit_tracker: HabitTrackerServer,
    /// Whether the client has sent `initialized`
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(habit_tracker: HabitTrackerServer) -> Self {
        Self {
            habit_tracker,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await
    }

    /// Serve requests from `reader` until it reaches end of input
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let mut lines = reader.lines();
        let mut day_watcher = DayWatcher::new(self.habit_tracker.clock());
        let mut day_check = tokio::time::interval(DAY_CHECK_INTERVAL);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line {
                        Ok(Some(line)) => {
                            if let Some(response) = self.process_line(&line) {
                                let response_str = serde_json::to_string(&response)?;

                                writer.write_all(response_str.as_bytes()).await?;
                                writer.write_all(b"\n").await?;
                                writer.flush().await?;

                                debug!("Sent response: {}", response_str);
                            }
                        }
                        Ok(None) => {
                            info!("MCP server shutting down (input closed)");
                            break;
                        }
                        Err(e) => {
                            error!("Failed to read request: {}", e);
                            break;
                        }
                    }
                }
                _ = day_check.tick() => {
                    if let Some(today) = day_watcher.poll(self.habit_tracker.clock()) {
                        info!(%today, "Day changed, streaks will be derived for the new day");
                    }
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    pub fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request)
    }

    /// Handle a JSON-RPC request; notifications produce no response
    fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                error_codes::INVALID_REQUEST,
                format!("Unsupported JSON-RPC version '{}'", request.jsonrpc),
                None,
            ));
        }

        let Some(id) = request.id else {
            self.handle_notification(&request.method);
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => to_response(id, &ToolsListResult { tools: tool_definitions() }),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        };

        Some(response)
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                info!("MCP client initialized");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Habit Streaks MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(id, &result)
    }

    /// Handle tools/call request
    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                    None,
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let result = match self.call_tool(&tool_params.name, tool_params.arguments) {
            Some(Ok(message)) => ToolCallResult::success(message),
            Some(Err(e)) => {
                warn!(tool = %tool_params.name, "Tool call failed: {}", e);
                ToolCallResult::error(&e)
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Unknown tool: {}", tool_params.name),
                    None,
                );
            }
        };

        to_response(id, &result)
    }

    /// Run a tool by name; `None` if there is no such tool
    fn call_tool(&mut self, name: &str, args: Map<String, Value>) -> Option<Result<String, ToolError>> {
        let server = &mut self.habit_tracker;
        let today = server.today();

        let result = match name {
            "habit_create" => parse_args(args)
                .and_then(|p| tools::create_habit(server.storage(), p, today))
                .map(|r| format!("{}\nHabit ID: {}", r.message, r.habit_id)),
            "habit_list" => parse_args(args)
                .and_then(|p| tools::list_habits(server.storage(), p, today))
                .map(|r| r.message),
            "habit_toggle" => parse_args(args)
                .and_then(|p| tools::toggle_habit(server.storage(), p, today))
                .map(|r| r.message),
            "habit_update" => parse_args(args)
                .and_then(|p| tools::update_habit(server.storage(), p, today))
                .map(|r| r.message),
            "habit_delete" => parse_args(args)
                .and_then(|p| tools::delete_habit(server.storage(), p))
                .map(|r| r.message),
            "habit_status" => parse_args(args)
                .and_then(|p| tools::get_habit_status(server.storage(), p, today))
                .map(|r| r.message),
            "habit_insights" => parse_args(args).and_then(|p| {
                let (storage, random) = server.storage_and_random();
                tools::get_habit_insights(storage, p, today, random)
            })
            .map(|r| r.message),
            "habit_week" => parse_args(args)
                .and_then(|p| tools::get_weekly_progress(server.storage(), p, today))
                .map(|r| r.message),
            _ => return None,
        };

        Some(result)
    }
}

fn parse_args<P: DeserializeOwned>(args: Map<String, Value>) -> Result<P, ToolError> {
    serde_json::from_value(Value::Object(args)).map_err(|e| ToolError::InvalidParams(e.to_string()))
}

fn to_response<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize result: {}", e),
            None,
        ),
    }
}

fn definition<P: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::to_value(schema_for!(P)).unwrap_or_else(|_| json!({"type": "object"})),
    }
}

/// Every tool the server exposes
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        definition::<tools::CreateHabitParams>(
            "habit_create",
            "Create a new habit to track. The streak counts from streak_start_date (default today).",
        ),
        definition::<tools::ListHabitsParams>(
            "habit_list",
            "List all habits with their current streaks",
        ),
        definition::<tools::ToggleParams>(
            "habit_toggle",
            "Mark a day as done for a habit, or unmark it if it was already done",
        ),
        definition::<tools::UpdateHabitParams>(
            "habit_update",
            "Edit a habit's name, priority, start date, end date or other details",
        ),
        definition::<tools::DeleteHabitParams>(
            "habit_delete",
            "Permanently delete a habit and its history",
        ),
        definition::<tools::StatusParams>(
            "habit_status",
            "Check current and best streaks for one habit or all habits",
        ),
        definition::<tools::InsightsParams>(
            "habit_insights",
            "Get a motivational summary of overall streak performance",
        ),
        definition::<tools::WeekParams>(
            "habit_week",
            "Show which days of a week each habit was completed",
        ),
    ]
}
