#![forbid(unsafe_code)]

use crate::McpServer;
use crate::support::{
    ai_error, ai_ok, event_json, optional_string, stats_json, store_error_response, todo_json,
};
use serde_json::{Value, json};

const DEFAULT_EVENTS_LIMIT: usize = 50;
const MAX_EVENTS_LIMIT: usize = 500;

impl McpServer {
    pub(crate) fn tool_todo_list(&mut self, _args: Value) -> Value {
        match self.store().list_todos() {
            Ok(rows) => {
                let todos: Vec<Value> = rows.iter().map(todo_json).collect();
                ai_ok("todo_list", json!({ "count": todos.len(), "todos": todos }))
            }
            Err(err) => store_error_response(err),
        }
    }

    pub(crate) fn tool_todo_events(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };

        let since = match optional_string(args_obj, "since") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let limit = match args_obj.get("limit") {
            None => DEFAULT_EVENTS_LIMIT,
            Some(v) => match v.as_u64() {
                Some(n) if n >= 1 => (n as usize).min(MAX_EVENTS_LIMIT),
                _ => return ai_error("INVALID_INPUT", "limit must be a positive integer"),
            },
        };

        match self.store().events_since(since.as_deref(), limit) {
            Ok(events) => {
                let next = events.last().map(|e| e.event_id());
                let rendered: Vec<Value> = events.iter().map(event_json).collect();
                ai_ok(
                    "todo_events",
                    json!({ "count": rendered.len(), "events": rendered, "next_since": next }),
                )
            }
            Err(err) => store_error_response(err),
        }
    }

    pub(crate) fn tool_todo_stats(&mut self, _args: Value) -> Value {
        match self.store().stats() {
            Ok(stats) => ai_ok("todo_stats", stats_json(stats)),
            Err(err) => store_error_response(err),
        }
    }
}
