#![forbid(unsafe_code)]

mod create;
mod edit;
mod reorder;
mod views;

use crate::McpServer;
use serde_json::{Value, json};

pub(crate) fn dispatch_tool(server: &mut McpServer, name: &str, args: Value) -> Option<Value> {
    let resp = match name {
        "todo_create" => server.tool_todo_create(args),
        "todo_list" => server.tool_todo_list(args),
        "todo_update" => server.tool_todo_update(args),
        "todo_toggle" => server.tool_todo_toggle(args),
        "todo_delete" => server.tool_todo_delete(args),
        "todo_reorder" => server.tool_todo_reorder(args),
        "todo_events" => server.tool_todo_events(args),
        "todo_stats" => server.tool_todo_stats(args),
        _ => return None,
    };
    Some(resp)
}

pub(crate) fn tool_definitions() -> Vec<Value> {
    vec![
        json!({
            "name": "todo_create",
            "description": "Create a todo appended to the end of the list.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "title": { "type": "string" },
                    "description": { "type": "string" },
                    "due_date": { "type": "string", "description": "YYYY-MM-DD" }
                },
                "required": ["title"]
            },
        }),
        json!({
            "name": "todo_list",
            "description": "All todos in display order (ascending position).",
            "inputSchema": { "type": "object", "properties": {} },
        }),
        json!({
            "name": "todo_update",
            "description": "Partial field update; omitted fields are unchanged; due_date null clears.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": { "type": "string" },
                    "title": { "type": "string" },
                    "description": { "type": "string" },
                    "due_date": { "type": ["string", "null"], "description": "YYYY-MM-DD or null to clear" },
                    "completed": { "type": "boolean" }
                },
                "required": ["id"]
            },
        }),
        json!({
            "name": "todo_toggle",
            "description": "Flip a todo's completed flag.",
            "inputSchema": {
                "type": "object",
                "properties": { "id": { "type": "string" } },
                "required": ["id"]
            },
        }),
        json!({
            "name": "todo_delete",
            "description": "Permanently delete a todo; neighbouring positions are untouched.",
            "inputSchema": {
                "type": "object",
                "properties": { "id": { "type": "string" } },
                "required": ["id"]
            },
        }),
        json!({
            "name": "todo_reorder",
            "description": "Move a todo to a new position; passed-over todos shift one slot.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": { "type": "string" },
                    "new_position": { "type": "integer" }
                },
                "required": ["id", "new_position"]
            },
        }),
        json!({
            "name": "todo_events",
            "description": "Change-event feed (created/updated/toggled/reordered/deleted), cursor-paged.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "since": { "type": "string", "description": "last seen event id" },
                    "limit": { "type": "integer" }
                }
            },
        }),
        json!({
            "name": "todo_stats",
            "description": "Aggregate counts: total, completed, active.",
            "inputSchema": { "type": "object", "properties": {} },
        }),
    ]
}
