/// Integration tests: SQLite-backed tool workflows and full MCP sessions
mod mcp_session;
mod storage_workflow;
