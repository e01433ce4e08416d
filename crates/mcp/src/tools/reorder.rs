#![forbid(unsafe_code)]

use crate::McpServer;
use crate::support::{ai_error, ai_ok, require_i64, require_string, store_error_response, todo_json};
use serde_json::{Value, json};

impl McpServer {
    pub(crate) fn tool_todo_reorder(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };

        let id = match require_string(args_obj, "id") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let new_position = match require_i64(args_obj, "new_position") {
            Ok(v) => v,
            Err(resp) => return resp,
        };

        match self.store_mut().reposition_todo(&id, new_position) {
            Ok((row, event)) => ai_ok(
                "todo_reorder",
                json!({ "todo": todo_json(&row), "event_id": event.event_id() }),
            ),
            Err(err) => store_error_response(err),
        }
    }
}
