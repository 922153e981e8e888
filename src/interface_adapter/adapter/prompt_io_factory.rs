use std::path::PathBuf;

use crate::infrastructure::host::{StdFs, StdHost};
use crate::infrastructure::store::JsonFileStore;
use crate::infrastructure::terminal::{CrosstermKeyReader, CrosstermTerminal};
use crate::usecase::prompt_io::PromptIo;

/// Creates the terminal-backed PromptIo bundle without suggestion history.
pub fn create_prompt_io() -> PromptIo {
    PromptIo::new(
        Box::new(CrosstermKeyReader::new()),
        Box::new(CrosstermTerminal::stdout()),
        Box::new(StdHost),
        Box::new(StdFs),
    )
}

/// Creates a concrete HistoryStorePort implementation at `path`, or at the
/// per-user default location when `path` is `None`.
pub fn create_history_store(path: Option<PathBuf>) -> Option<JsonFileStore> {
    path.or_else(JsonFileStore::default_path).map(JsonFileStore::new)
}

/// Creates the terminal-backed PromptIo bundle with suggestion history.
/// Falls back to no history when no store location can be resolved.
pub fn create_prompt_io_with_history(path: Option<PathBuf>) -> PromptIo {
    let io = create_prompt_io();
    match create_history_store(path) {
        Some(store) => io.with_history(Box::new(store)),
        None => io,
    }
}
