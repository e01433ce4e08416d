#![forbid(unsafe_code)]

mod support;
use support::*;

use serde_json::json;

#[test]
fn initialize_returns_server_info_and_enables_tools() {
    let mut server = Server::start("initialize_returns_server_info");

    let init = server.request(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": { "protocolVersion": "2024-11-05", "capabilities": {}, "clientInfo": { "name": "test", "version": "0" } }
    }));
    let result = init.get("result").expect("initialize must return result");
    assert_eq!(
        result
            .get("serverInfo")
            .and_then(|v| v.get("name"))
            .and_then(|v| v.as_str()),
        Some("tidylist-mcp")
    );

    let tools_list = server.request(json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/list",
        "params": {}
    }));
    let tools = tools_list
        .get("result")
        .and_then(|v| v.get("tools"))
        .and_then(|v| v.as_array())
        .expect("result.tools");

    let mut names = tools
        .iter()
        .filter_map(|tool| tool.get("name").and_then(|v| v.as_str()))
        .collect::<Vec<_>>();
    names.sort();
    assert_eq!(
        names,
        vec![
            "todo_create",
            "todo_delete",
            "todo_events",
            "todo_list",
            "todo_reorder",
            "todo_stats",
            "todo_toggle",
            "todo_update",
        ]
    );
}

#[test]
fn requests_before_initialize_are_rejected() {
    let mut server = Server::start("requests_before_initialize_are_rejected");

    let resp = server.request(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/list",
        "params": {}
    }));
    assert_eq!(
        resp.get("error")
            .and_then(|v| v.get("code"))
            .and_then(|v| v.as_i64()),
        Some(-32002)
    );
}

#[test]
fn unknown_method_and_unknown_tool_are_reported() {
    let mut server = Server::start_initialized("unknown_method_and_tool");

    let resp = server.request(json!({
        "jsonrpc": "2.0",
        "id": 5,
        "method": "no/such/method",
        "params": {}
    }));
    assert_eq!(
        resp.get("error")
            .and_then(|v| v.get("code"))
            .and_then(|v| v.as_i64()),
        Some(-32601)
    );

    let payload = server.call_tool(6, "no_such_tool", json!({}));
    assert_tool_error(&payload, "UNKNOWN_TOOL");
}

#[test]
fn malformed_json_line_gets_parse_error() {
    let mut server = Server::start_initialized("malformed_json_line");

    server.send_raw("{ not json");
    let resp = server.recv();
    assert_eq!(
        resp.get("error")
            .and_then(|v| v.get("code"))
            .and_then(|v| v.as_i64()),
        Some(-32700)
    );
}

#[test]
fn ping_and_empty_resources_respond() {
    let mut server = Server::start_initialized("ping_and_empty_resources");

    let ping = server.request(json!({ "jsonrpc": "2.0", "id": 3, "method": "ping" }));
    assert!(ping.get("result").is_some());

    let resources = server.request(json!({
        "jsonrpc": "2.0",
        "id": 4,
        "method": "resources/list",
        "params": {}
    }));
    assert_eq!(
        resources
            .get("result")
            .and_then(|v| v.get("resources"))
            .and_then(|v| v.as_array())
            .map(|v| v.len()),
        Some(0)
    );
}
