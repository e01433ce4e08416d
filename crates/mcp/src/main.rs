#![forbid(unsafe_code)]

mod jsonrpc;
mod server;
mod session_log;
mod stdio;
mod support;
mod tools;

pub(crate) use jsonrpc::{JsonRpcRequest, json_rpc_error, json_rpc_response, tool_text_content};
pub(crate) use server::McpServer;
pub(crate) use session_log::SessionLog;

use std::path::PathBuf;
use tl_storage::SqliteStore;

// Protocol negotiation: some MCP clients are strict about the server echoing
// a compatible protocol version, so this stays at the widely deployed baseline.
const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "tidylist-mcp";
const SERVER_VERSION: &str = "0.1.0";

const STORAGE_DIR_ENV: &str = "TIDYLIST_STORAGE_DIR";
const DEFAULT_STORAGE_DIR: &str = ".tidylist";

fn usage() -> &'static str {
    "tl_mcp — TidyList MCP server (stdio, newline-delimited JSON-RPC)\n\n\
USAGE:\n\
  tl_mcp [--storage-dir DIR]\n\
\n\
FLAGS:\n\
  -h, --help       Print this help and exit\n\
  -V, --version    Print version and exit\n\
\n\
NOTES:\n\
  - Storage default: ./.tidylist (override with --storage-dir or TIDYLIST_STORAGE_DIR)\n"
}

fn version_line() -> String {
    format!("tl_mcp {SERVER_VERSION}")
}

fn parse_storage_dir(args: &[String]) -> PathBuf {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--storage-dir"
            && let Some(dir) = iter.next()
        {
            return PathBuf::from(dir);
        }
    }
    if let Ok(dir) = std::env::var(STORAGE_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }
    PathBuf::from(DEFAULT_STORAGE_DIR)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().collect::<Vec<_>>();
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        print!("{}", usage());
        return Ok(());
    }
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-V" | "--version"))
    {
        println!("{}", version_line());
        return Ok(());
    }

    let storage_dir = parse_storage_dir(&args);
    let store = SqliteStore::open(&storage_dir)?;
    let session_log = SessionLog::new(store.storage_dir());
    session_log.record("startup");

    let mut server = McpServer::new(store, session_log);
    let result = stdio::run_stdio(&mut server);
    server.session_log().record("shutdown");
    result
}
