#![forbid(unsafe_code)]

use crate::events::insert_event_tx;
use crate::{
    CreateTodoRequest, EditTodoRequest, EventRow, SqliteStore, StoreError, TodoRow, TodoStats,
    next_counter_tx, now_ms,
};
use rusqlite::{OptionalExtension, Row, Transaction, params};
use serde_json::json;
use tl_core::{ids, model, order};

impl SqliteStore {
    pub fn create_todo(
        &mut self,
        request: CreateTodoRequest,
    ) -> Result<(TodoRow, EventRow), StoreError> {
        let title = validate_title(&request.title)?;
        let description = model::normalize_description(request.description);
        let due_date = validate_due_date(request.due_date)?;

        let now_ms = now_ms();
        let tx = self.transaction()?;

        let seq = next_counter_tx(&tx, "todo_seq")?;
        let id = format!("TODO-{seq:04}");

        // Append rule: one past the current maximum, 1 when empty. Computed
        // inside the same transaction that inserts, so two appends cannot
        // observe the same maximum.
        let current_max: Option<i64> =
            tx.query_row("SELECT MAX(position) FROM todos", [], |row| row.get(0))?;
        let position = order::append_position(current_max);

        tx.execute(
            r#"
            INSERT INTO todos(id, title, description, due_date, completed, created_at_ms, updated_at_ms, position)
            VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5, ?6)
            "#,
            params![id, title, description, due_date, now_ms, position],
        )?;

        let event = insert_event_tx(
            &tx,
            now_ms,
            Some(id.clone()),
            "todo.created",
            &json!({ "id": id, "title": title, "position": position }).to_string(),
        )?;

        tx.commit()?;
        Ok((
            TodoRow {
                id,
                title,
                description,
                due_date,
                completed: false,
                created_at_ms: now_ms,
                updated_at_ms: now_ms,
                position,
            },
            event,
        ))
    }

    pub fn get_todo(&self, id: &str) -> Result<Option<TodoRow>, StoreError> {
        validate_id(id)?;
        Ok(self
            .conn()
            .query_row(
                &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id=?1"),
                params![id],
                todo_from_row,
            )
            .optional()?)
    }

    /// All todos in display order. The backing store's native row order is
    /// never relied upon; the position sort is mandatory, with the id as a
    /// deterministic tie-breaker.
    pub fn list_todos(&self) -> Result<Vec<TodoRow>, StoreError> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {TODO_COLUMNS} FROM todos ORDER BY position ASC, id ASC"
        ))?;
        let rows = stmt.query_map([], todo_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn edit_todo(
        &mut self,
        id: &str,
        request: EditTodoRequest,
    ) -> Result<(TodoRow, EventRow), StoreError> {
        validate_id(id)?;
        if request.is_empty() {
            return Err(StoreError::InvalidInput("no fields to edit"));
        }

        let title = request.title.as_deref().map(validate_title).transpose()?;
        let due_date = request
            .due_date
            .map(validate_due_date)
            .transpose()?;

        let now_ms = now_ms();
        let tx = self.transaction()?;

        let Some(current) = get_todo_tx(&tx, id)? else {
            return Err(StoreError::UnknownId);
        };

        let mut changed = Vec::new();
        if title.is_some() {
            changed.push("title");
        }
        if request.description.is_some() {
            changed.push("description");
        }
        if due_date.is_some() {
            changed.push("due_date");
        }
        if request.completed.is_some() {
            changed.push("completed");
        }

        let new_title = title.unwrap_or(current.title);
        let new_description = match request.description {
            Some(description) => model::normalize_description(Some(description)),
            None => current.description,
        };
        let new_due_date = due_date.unwrap_or(current.due_date);
        let new_completed = request.completed.unwrap_or(current.completed);

        tx.execute(
            r#"
            UPDATE todos
            SET title=?2, description=?3, due_date=?4, completed=?5, updated_at_ms=?6
            WHERE id=?1
            "#,
            params![id, new_title, new_description, new_due_date, new_completed, now_ms],
        )?;

        let event = insert_event_tx(
            &tx,
            now_ms,
            Some(id.to_string()),
            "todo.updated",
            &json!({ "id": id, "fields": changed }).to_string(),
        )?;

        tx.commit()?;
        Ok((
            TodoRow {
                id: current.id,
                title: new_title,
                description: new_description,
                due_date: new_due_date,
                completed: new_completed,
                created_at_ms: current.created_at_ms,
                updated_at_ms: now_ms,
                position: current.position,
            },
            event,
        ))
    }

    pub fn toggle_todo(&mut self, id: &str) -> Result<(TodoRow, EventRow), StoreError> {
        validate_id(id)?;
        let now_ms = now_ms();
        let tx = self.transaction()?;

        let Some(current) = get_todo_tx(&tx, id)? else {
            return Err(StoreError::UnknownId);
        };
        let completed = !current.completed;

        tx.execute(
            "UPDATE todos SET completed=?2, updated_at_ms=?3 WHERE id=?1",
            params![id, completed, now_ms],
        )?;

        let event = insert_event_tx(
            &tx,
            now_ms,
            Some(id.to_string()),
            "todo.toggled",
            &json!({ "id": id, "completed": completed }).to_string(),
        )?;

        tx.commit()?;
        Ok((
            TodoRow {
                completed,
                updated_at_ms: now_ms,
                ..current
            },
            event,
        ))
    }

    /// Permanent removal. Surrounding positions are left untouched; the gap
    /// is tolerated because uniqueness and ordering, not contiguity, are the
    /// invariants the rest of the system relies on.
    pub fn delete_todo(&mut self, id: &str) -> Result<EventRow, StoreError> {
        validate_id(id)?;
        let now_ms = now_ms();
        let tx = self.transaction()?;

        let Some(current) = get_todo_tx(&tx, id)? else {
            return Err(StoreError::UnknownId);
        };

        tx.execute("DELETE FROM todos WHERE id=?1", params![id])?;

        let event = insert_event_tx(
            &tx,
            now_ms,
            Some(id.to_string()),
            "todo.deleted",
            &json!({ "id": id, "position": current.position }).to_string(),
        )?;

        tx.commit()?;
        Ok(event)
    }

    pub fn stats(&self) -> Result<TodoStats, StoreError> {
        let (total, completed) = self.conn().query_row(
            "SELECT COUNT(1), COALESCE(SUM(completed), 0) FROM todos",
            [],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        )?;
        Ok(TodoStats {
            total,
            completed,
            active: total - completed,
        })
    }
}

pub(crate) const TODO_COLUMNS: &str =
    "id, title, description, due_date, completed, created_at_ms, updated_at_ms, position";

pub(crate) fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<TodoRow> {
    Ok(TodoRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        completed: row.get(4)?,
        created_at_ms: row.get(5)?,
        updated_at_ms: row.get(6)?,
        position: row.get(7)?,
    })
}

pub(crate) fn get_todo_tx(tx: &Transaction<'_>, id: &str) -> Result<Option<TodoRow>, StoreError> {
    Ok(tx
        .query_row(
            &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id=?1"),
            params![id],
            todo_from_row,
        )
        .optional()?)
}

pub(crate) fn validate_id(value: &str) -> Result<(), StoreError> {
    ids::TodoId::try_new(value)
        .map(|_| ())
        .map_err(|_| StoreError::InvalidInput("malformed todo id"))
}

fn validate_title(value: &str) -> Result<String, StoreError> {
    model::validate_title(value).map_err(|err| match err {
        model::TitleError::Empty => StoreError::InvalidInput("title must not be empty"),
        model::TitleError::TooLong => StoreError::InvalidInput("title is too long"),
    })
}

fn validate_due_date(value: Option<String>) -> Result<Option<String>, StoreError> {
    match value {
        Some(date) if !model::is_calendar_date(&date) => Err(StoreError::InvalidInput(
            "due_date must be a YYYY-MM-DD calendar date",
        )),
        other => Ok(other),
    }
}
