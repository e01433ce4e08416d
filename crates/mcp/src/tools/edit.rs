#![forbid(unsafe_code)]

use crate::McpServer;
use crate::support::{
    ai_error, ai_ok, optional_bool, optional_string, require_string, store_error_response,
    todo_json,
};
use serde_json::{Value, json};
use tl_storage::EditTodoRequest;

impl McpServer {
    pub(crate) fn tool_todo_update(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };

        let id = match require_string(args_obj, "id") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let title = match optional_string(args_obj, "title") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let description = match optional_string(args_obj, "description") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        // Key absent: leave unchanged. Explicit null: clear the date.
        let due_date = match args_obj.get("due_date") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(_) => return ai_error("INVALID_INPUT", "due_date must be a string or null"),
        };
        let completed = match optional_bool(args_obj, "completed") {
            Ok(v) => v,
            Err(resp) => return resp,
        };

        match self.store_mut().edit_todo(
            &id,
            EditTodoRequest {
                title,
                description,
                due_date,
                completed,
            },
        ) {
            Ok((row, event)) => ai_ok(
                "todo_update",
                json!({ "todo": todo_json(&row), "event_id": event.event_id() }),
            ),
            Err(err) => store_error_response(err),
        }
    }

    pub(crate) fn tool_todo_toggle(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let id = match require_string(args_obj, "id") {
            Ok(v) => v,
            Err(resp) => return resp,
        };

        match self.store_mut().toggle_todo(&id) {
            Ok((row, event)) => ai_ok(
                "todo_toggle",
                json!({ "todo": todo_json(&row), "event_id": event.event_id() }),
            ),
            Err(err) => store_error_response(err),
        }
    }

    pub(crate) fn tool_todo_delete(&mut self, args: Value) -> Value {
        let Some(args_obj) = args.as_object() else {
            return ai_error("INVALID_INPUT", "arguments must be an object");
        };
        let id = match require_string(args_obj, "id") {
            Ok(v) => v,
            Err(resp) => return resp,
        };

        match self.store_mut().delete_todo(&id) {
            Ok(event) => ai_ok(
                "todo_delete",
                json!({ "id": id, "event_id": event.event_id() }),
            ),
            Err(err) => store_error_response(err),
        }
    }
}
