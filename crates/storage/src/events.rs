#![forbid(unsafe_code)]

use crate::{EventRow, SqliteStore, StoreError};
use rusqlite::{Transaction, params};

impl SqliteStore {
    /// Cursor-paged change feed: every committed mutation appended exactly
    /// one event, so a consumer that replays from its last seen event id
    /// observes each added/updated/removed delta once, in order.
    pub fn events_since(
        &self,
        since_event_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<EventRow>, StoreError> {
        let since_seq = match since_event_id {
            None => 0i64,
            Some(event_id) => parse_event_id(event_id)
                .ok_or(StoreError::InvalidInput("since must be like evt_<16-digit-seq>"))?,
        };

        let mut stmt = self.conn().prepare(
            r#"
            SELECT seq, ts_ms, todo_id, type, payload_json
            FROM events
            WHERE seq > ?1
            ORDER BY seq ASC
            LIMIT ?2
            "#,
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![since_seq, limit], |row| {
            Ok(EventRow {
                seq: row.get(0)?,
                ts_ms: row.get(1)?,
                todo_id: row.get(2)?,
                event_type: row.get(3)?,
                payload_json: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

pub(crate) fn insert_event_tx(
    tx: &Transaction<'_>,
    ts_ms: i64,
    todo_id: Option<String>,
    event_type: &str,
    payload_json: &str,
) -> Result<EventRow, StoreError> {
    let todo_id_for_return = todo_id.clone();
    tx.execute(
        "INSERT INTO events(ts_ms, todo_id, type, payload_json) VALUES (?1, ?2, ?3, ?4)",
        params![ts_ms, todo_id, event_type, payload_json],
    )?;
    let seq = tx.last_insert_rowid();
    Ok(EventRow {
        seq,
        ts_ms,
        todo_id: todo_id_for_return,
        event_type: event_type.to_string(),
        payload_json: payload_json.to_string(),
    })
}

// Exactly the shape `event_id()` emits: evt_ plus 16 ASCII digits.
fn parse_event_id(event_id: &str) -> Option<i64> {
    let digits = event_id.strip_prefix("evt_")?;
    if digits.len() != 16 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i64>().ok()
}
