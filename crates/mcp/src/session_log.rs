#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const LOG_FILE: &str = "tidylist_mcp_session.log";
const MAX_LOG_BYTES: u64 = 256 * 1024;

/// Bounded, best-effort session record for debugging transport issues.
/// Records method names and lifecycle marks only, never request bodies.
/// Logging must never fail the server, so every write is `let _ =`.
#[derive(Debug)]
pub(crate) struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    pub(crate) fn new(storage_dir: &Path) -> Self {
        let _ = std::fs::create_dir_all(storage_dir);
        Self {
            path: storage_dir.join(LOG_FILE),
        }
    }

    pub(crate) fn record(&self, mark: &str) {
        if let Ok(meta) = std::fs::metadata(&self.path)
            && meta.len() > MAX_LOG_BYTES
        {
            let _ = std::fs::remove_file(&self.path);
        }

        use std::io::Write as _;
        let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        else {
            return;
        };
        let _ = writeln!(file, "{} pid={} {mark}", now_rfc3339(), std::process::id());
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown-time".to_string())
}
