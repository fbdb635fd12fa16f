/// Full MCP sessions over in-memory streams
use chrono::NaiveDate;
use habit_streaks_mcp::mcp::protocol::error_codes;
use habit_streaks_mcp::mcp::McpServer;
use habit_streaks_mcp::*;
use serde_json::{json, Value};

fn tracker(today: &str) -> HabitTrackerServer {
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d").unwrap();
    HabitTrackerServer::with_parts(
        SqliteStorage::in_memory().unwrap(),
        Box::new(FixedClock(today)),
        Box::new(SequenceRandom::new(vec![0.0])),
    )
}

async fn run_session(server: &mut McpServer, requests: &[Value]) -> Vec<Value> {
    let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();
    let mut output: Vec<u8> = Vec::new();

    server.serve(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn call(id: i64, tool: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": tool, "arguments": arguments }
    })
}

#[tokio::test]
async fn test_initialize_and_list_tools() {
    let mut server = McpServer::new(tracker("2024-01-07"));
    let responses = run_session(
        &mut server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "ping"}),
        ],
    )
    .await;

    // the notification gets no response
    assert_eq!(responses.len(), 3);
    assert!(server.is_initialized());

    assert_eq!(responses[0]["id"], json!(1));
    assert_eq!(responses[0]["result"]["protocolVersion"], json!("2024-11-05"));
    assert_eq!(
        responses[0]["result"]["capabilities"]["tools"]["listChanged"],
        json!(false)
    );

    let names: Vec<&str> = responses[1]["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    for expected in [
        "habit_create",
        "habit_list",
        "habit_toggle",
        "habit_update",
        "habit_delete",
        "habit_status",
        "habit_insights",
        "habit_week",
    ] {
        assert!(names.contains(&expected), "missing tool {}", expected);
    }

    assert_eq!(responses[2]["result"], json!({}));
}

#[tokio::test]
async fn test_streak_session() {
    let mut server = McpServer::new(tracker("2024-01-07"));
    let created = run_session(
        &mut server,
        &[call(
            1,
            "habit_create",
            json!({"name": "Journal", "streak_start_date": "2024-01-01", "priority": "high"}),
        )],
    )
    .await;
    assert_eq!(created[0]["result"]["isError"], json!(false));

    let habits = run_session(&mut server, &[call(2, "habit_list", json!({}))]).await;
    let listing = habits[0]["result"]["content"][0]["text"].as_str().unwrap().to_string();
    assert!(listing.contains("Journal"));

    let habit_id = {
        let text = created[0]["result"]["content"][0]["text"].as_str().unwrap();
        text.rsplit("Habit ID: ").next().unwrap().trim().to_string()
    };

    let responses = run_session(
        &mut server,
        &[
            call(3, "habit_toggle", json!({"habit_id": habit_id, "date": "2024-01-05"})),
            call(4, "habit_toggle", json!({"habit_id": habit_id, "date": "2024-01-06"})),
            call(5, "habit_toggle", json!({"habit_id": habit_id})),
            call(6, "habit_status", json!({"habit_id": habit_id})),
            call(7, "habit_insights", json!({})),
            call(8, "habit_week", json!({"date": "2024-01-05"})),
        ],
    )
    .await;
    assert_eq!(responses.len(), 6);

    let text = |i: usize| responses[i]["result"]["content"][0]["text"].as_str().unwrap().to_string();
    assert!(text(2).contains("Current streak: 3 days"));
    assert!(text(3).contains("3 days (best 3, 3 total, last 2024-01-07)"));
    assert!(text(4).contains("Longest streak: 3 days"));
    assert!(text(5).contains("Journal (3/7)"));
}

#[tokio::test]
async fn test_errors_do_not_end_the_session() {
    let mut server = McpServer::new(tracker("2024-01-07"));
    let input = format!(
        "{}\nthis is not json\n{}\n{}\n{}\n",
        call(1, "habit_toggle", json!({"habit_id": "abc"})),
        json!({"jsonrpc": "1.0", "id": 2, "method": "ping"}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {"name": "habit_fly", "arguments": {}}}),
        json!({"jsonrpc": "2.0", "id": 4, "method": "ping"}),
    );
    let mut output: Vec<u8> = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 5);

    assert_eq!(responses[0]["result"]["isError"], json!(true));
    assert_eq!(
        responses[0]["result"]["_meta"]["code"],
        json!(error_codes::VALIDATION_ERROR)
    );
    assert_eq!(responses[1]["error"]["code"], json!(error_codes::PARSE_ERROR));
    assert_eq!(responses[2]["error"]["code"], json!(error_codes::INVALID_REQUEST));
    assert_eq!(responses[3]["error"]["code"], json!(error_codes::INVALID_PARAMS));
    assert_eq!(responses[4]["result"], json!({}));
}

#[test]
fn test_serve_with_block_on() {
    let mut server = McpServer::new(tracker("2024-01-07"));
    let input = format!("{}\n", json!({"jsonrpc": "2.0", "id": "a", "method": "ping"}));
    let mut output: Vec<u8> = Vec::new();

    tokio_test::block_on(server.serve(input.as_bytes(), &mut output)).unwrap();

    let response: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(response["id"], json!("a"));
}
