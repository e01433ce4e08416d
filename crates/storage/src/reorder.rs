#![forbid(unsafe_code)]

use crate::events::insert_event_tx;
use crate::todos::{get_todo_tx, validate_id};
use crate::{EventRow, SqliteStore, StoreError, TodoRow, now_ms};
use rusqlite::params;
use serde_json::json;

impl SqliteStore {
    /// Moves one todo to `new_position` and shifts every todo in the
    /// passed-over range by exactly one slot, keeping positions a set of
    /// distinct integers.
    ///
    /// The whole reassignment runs in a single transaction: either every
    /// affected row is rewritten or none is, so no partial-failure window
    /// can leave a duplicate position or a widened gap behind.
    pub fn reposition_todo(
        &mut self,
        id: &str,
        new_position: i64,
    ) -> Result<(TodoRow, EventRow), StoreError> {
        validate_id(id)?;
        let now_ms = now_ms();
        let tx = self.transaction()?;

        let Some(current) = get_todo_tx(&tx, id)? else {
            return Err(StoreError::UnknownId);
        };
        let old_position = current.position;

        // Range comparisons below match tl_core::order::shift_for. A target
        // past the current extremes matches no rows and simply assigns the
        // extremal value.
        let shifted = if old_position < new_position {
            tx.execute(
                r#"
                UPDATE todos
                SET position = position - 1, updated_at_ms = ?4
                WHERE id <> ?1 AND position > ?2 AND position <= ?3
                "#,
                params![id, old_position, new_position, now_ms],
            )?
        } else if old_position > new_position {
            tx.execute(
                r#"
                UPDATE todos
                SET position = position + 1, updated_at_ms = ?4
                WHERE id <> ?1 AND position >= ?3 AND position < ?2
                "#,
                params![id, old_position, new_position, now_ms],
            )?
        } else {
            0
        };

        tx.execute(
            "UPDATE todos SET position=?2, updated_at_ms=?3 WHERE id=?1",
            params![id, new_position, now_ms],
        )?;

        let event = insert_event_tx(
            &tx,
            now_ms,
            Some(id.to_string()),
            "todo.reordered",
            &json!({
                "id": id,
                "from": old_position,
                "to": new_position,
                "shifted": shifted,
            })
            .to_string(),
        )?;

        tx.commit()?;
        Ok((
            TodoRow {
                position: new_position,
                updated_at_ms: now_ms,
                ..current
            },
            event,
        ))
    }
}
