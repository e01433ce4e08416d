#![forbid(unsafe_code)]

pub mod ids {
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct TodoId(String);

    impl TodoId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, TodoIdError> {
            let value = value.into();
            validate_todo_id(&value)?;
            Ok(Self(value))
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum TodoIdError {
        Empty,
        TooLong,
        InvalidFirstChar,
        InvalidChar { ch: char, index: usize },
    }

    fn validate_todo_id(value: &str) -> Result<(), TodoIdError> {
        if value.is_empty() {
            return Err(TodoIdError::Empty);
        }
        if value.len() > 64 {
            return Err(TodoIdError::TooLong);
        }
        let mut chars = value.chars();
        let Some(first) = chars.next() else {
            return Err(TodoIdError::Empty);
        };
        if !first.is_ascii_alphanumeric() {
            return Err(TodoIdError::InvalidFirstChar);
        }
        for (index, ch) in value.chars().enumerate() {
            if index == 0 {
                continue;
            }
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                continue;
            }
            return Err(TodoIdError::InvalidChar { ch, index });
        }
        Ok(())
    }
}

pub mod model {
    pub const MAX_TITLE_LEN: usize = 500;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum TitleError {
        Empty,
        TooLong,
    }

    /// Trims and validates a user-supplied title. Titles must be non-empty
    /// after trimming; whitespace-only input is rejected before any write.
    pub fn validate_title(value: &str) -> Result<String, TitleError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TitleError::Empty);
        }
        if trimmed.len() > MAX_TITLE_LEN {
            return Err(TitleError::TooLong);
        }
        Ok(trimmed.to_string())
    }

    /// Descriptions default to the empty string when omitted.
    pub fn normalize_description(value: Option<String>) -> String {
        value.map(|s| s.trim().to_string()).unwrap_or_default()
    }

    /// Structural `YYYY-MM-DD` check for due dates. Due dates carry no time
    /// component; anything beyond a plain calendar date is rejected.
    pub fn is_calendar_date(value: &str) -> bool {
        let bytes = value.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return false;
        }
        let digits = |range: std::ops::Range<usize>| -> Option<u32> {
            let mut out = 0u32;
            for &b in &bytes[range] {
                if !b.is_ascii_digit() {
                    return None;
                }
                out = out * 10 + u32::from(b - b'0');
            }
            Some(out)
        };
        let (Some(year), Some(month), Some(day)) = (digits(0..4), digits(5..7), digits(8..10))
        else {
            return false;
        };
        if !(1..=12).contains(&month) || day == 0 {
            return false;
        }
        day <= days_in_month(year, month)
    }

    fn days_in_month(year: u32, month: u32) -> u32 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
            2 => 28,
            _ => 0,
        }
    }
}

pub mod order {
    //! Pure arithmetic for the ordered-list repositioning contract.
    //!
    //! Positions are unique integers; ascending position defines display
    //! order. Moving one record to a new position shifts every record in the
    //! passed-over range by exactly one slot so the set stays duplicate-free.
    //! Contiguity is not required: a move past the current extremes simply
    //! assigns the extremal value and shifts nothing.

    /// Delta applied to a record at `other` when the record at `old` moves to
    /// `new`. Returns -1, 0, or +1; the moving record itself is excluded by
    /// the caller.
    pub fn shift_for(old: i64, new: i64, other: i64) -> i64 {
        if old < new && other > old && other <= new {
            -1
        } else if old > new && other >= new && other < old {
            1
        } else {
            0
        }
    }

    /// Whether a record at `other` falls in the affected range of a move
    /// from `old` to `new`.
    pub fn applies_to(old: i64, new: i64, other: i64) -> bool {
        shift_for(old, new, other) != 0
    }

    /// Position for a freshly appended record: one past the current maximum,
    /// or 1 on an empty collection.
    pub fn append_position(current_max: Option<i64>) -> i64 {
        current_max.map_or(1, |max| max + 1)
    }
}
