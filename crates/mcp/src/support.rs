#![forbid(unsafe_code)]

use serde_json::{Map, Value, json};
use tl_storage::{EventRow, StoreError, TodoRow, TodoStats};

pub(crate) fn ai_ok(intent: &str, result: Value) -> Value {
    json!({
        "success": true,
        "intent": intent,
        "result": result,
        "error": null
    })
}

pub(crate) fn ai_error(code: &str, message: &str) -> Value {
    json!({
        "success": false,
        "intent": "error",
        "result": null,
        "error": { "code": code, "message": message.trim() }
    })
}

pub(crate) fn store_error_response(err: StoreError) -> Value {
    match err {
        StoreError::UnknownId => ai_error("NOT_FOUND", "No todo with that id"),
        StoreError::InvalidInput(message) => ai_error("INVALID_INPUT", message),
        StoreError::Io(e) => ai_error("STORE", &format!("IO: {e}")),
        StoreError::Sql(e) => ai_error("STORE", &format!("SQL: {e}")),
    }
}

pub(crate) fn require_string(args: &Map<String, Value>, key: &str) -> Result<String, Value> {
    match args.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must not be empty"),
        )),
        Some(_) => Err(ai_error("INVALID_INPUT", &format!("{key} must be a string"))),
        None => Err(ai_error("INVALID_INPUT", &format!("{key} is required"))),
    }
}

pub(crate) fn optional_string(
    args: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ai_error("INVALID_INPUT", &format!("{key} must be a string"))),
    }
}

pub(crate) fn optional_bool(args: &Map<String, Value>, key: &str) -> Result<Option<bool>, Value> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be a boolean"),
        )),
    }
}

pub(crate) fn require_i64(args: &Map<String, Value>, key: &str) -> Result<i64, Value> {
    match args.get(key).and_then(|v| v.as_i64()) {
        Some(v) => Ok(v),
        None => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} is required and must be an integer"),
        )),
    }
}

pub(crate) fn todo_json(row: &TodoRow) -> Value {
    json!({
        "id": row.id,
        "title": row.title,
        "description": row.description,
        "due_date": row.due_date,
        "completed": row.completed,
        "created_at_ms": row.created_at_ms,
        "updated_at_ms": row.updated_at_ms,
        "position": row.position,
    })
}

pub(crate) fn event_json(event: &EventRow) -> Value {
    let payload: Value =
        serde_json::from_str(&event.payload_json).unwrap_or(Value::Null);
    json!({
        "event_id": event.event_id(),
        "ts_ms": event.ts_ms,
        "todo_id": event.todo_id,
        "type": event.event_type,
        "payload": payload,
    })
}

pub(crate) fn stats_json(stats: TodoStats) -> Value {
    json!({
        "total": stats.total,
        "completed": stats.completed,
        "active": stats.active,
    })
}
