#![forbid(unsafe_code)]

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
    pub completed: bool,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub position: i64,
}

#[derive(Clone, Debug)]
pub struct EventRow {
    pub seq: i64,
    pub ts_ms: i64,
    pub todo_id: Option<String>,
    pub event_type: String,
    pub payload_json: String,
}

impl EventRow {
    pub fn event_id(&self) -> String {
        format!("evt_{:016}", self.seq)
    }
}

#[derive(Clone, Debug)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

/// Partial edit: `None` leaves a field unchanged. `due_date` is a
/// double option so `Some(None)` clears the date.
#[derive(Clone, Debug, Default)]
pub struct EditTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl EditTodoRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TodoStats {
    pub total: i64,
    pub completed: i64,
    pub active: i64,
}
