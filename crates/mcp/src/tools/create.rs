#![forbid(unsafe_code)]

use crate::McpServer;
use crate::support::{ai_error, ai_ok, optional_string, require_string, store_error_response, todo_json};
use serde_json::{Value, json};
use tl_storage::CreateTodoRequest;

impl McpServer {
    pub(crate) fn tool_todo_create(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };

        let title = match require_string(args_obj, "title") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let description = match optional_string(args_obj, "description") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let due_date = match optional_string(args_obj, "due_date") {
            Ok(v) => v,
            Err(resp) => return resp,
        };

        match self.store_mut().create_todo(CreateTodoRequest {
            title,
            description,
            due_date,
        }) {
            Ok((row, event)) => ai_ok(
                "todo_create",
                json!({ "todo": todo_json(&row), "event_id": event.event_id() }),
            ),
            Err(err) => store_error_response(err),
        }
    }
}
