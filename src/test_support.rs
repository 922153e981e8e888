//! Scripted fakes for every port. Each fake shares its state through
//! `Arc<Mutex<..>>` so a test can keep a handle after the prompt consumed
//! its boxed copy.

use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::primitive::KeyPress;
use crate::interface_adapter::port::{FsPort, HistoryStorePort, HostPort, KeyReaderPort, Permission, TerminalPort};
use crate::shared::error::PromptError;
use crate::usecase::prompt_io::PromptIo;

fn lock<T>(state: &Arc<Mutex<T>>) -> MutexGuard<'_, T> {
    state.lock().unwrap()
}

// =============================================================================
// Key reader
// =============================================================================

#[derive(Default)]
struct ReaderState {
    batches: VecDeque<Result<Vec<KeyPress>, io::ErrorKind>>,
    reads: usize,
    raw_toggles: Vec<(bool, bool)>,
}

/// Hands out one scripted batch per read. Running out of batches fails the
/// read so a stuck prompt ends the test instead of hanging it.
#[derive(Clone, Default)]
pub struct FakeKeyReader {
    state: Arc<Mutex<ReaderState>>,
}

impl FakeKeyReader {
    pub fn push(&self, batch: Vec<KeyPress>) {
        lock(&self.state).batches.push_back(Ok(batch));
    }

    /// Fail the matching read with `kind`.
    pub fn push_error(&self, kind: io::ErrorKind) {
        lock(&self.state).batches.push_back(Err(kind));
    }

    pub fn reads(&self) -> usize {
        lock(&self.state).reads
    }

    /// Raw-mode toggles as `(enabled, cbreak)`, in call order.
    pub fn raw_toggles(&self) -> Vec<(bool, bool)> {
        lock(&self.state).raw_toggles.clone()
    }

    /// Just the `enabled` half of [`FakeKeyReader::raw_toggles`].
    pub fn raw_states(&self) -> Vec<bool> {
        self.raw_toggles().into_iter().map(|(enabled, _)| enabled).collect()
    }
}

impl KeyReaderPort for FakeKeyReader {
    fn is_terminal(&self) -> bool {
        true
    }

    fn set_raw(&mut self, enabled: bool, cbreak: bool) -> Result<(), PromptError> {
        lock(&self.state).raw_toggles.push((enabled, cbreak));
        Ok(())
    }

    fn read_keys(&mut self) -> Result<Vec<KeyPress>, PromptError> {
        let mut state = lock(&self.state);
        state.reads += 1;
        match state.batches.pop_front() {
            Some(Ok(batch)) => Ok(batch),
            Some(Err(kind)) => Err(PromptError::Terminal(io::Error::new(kind, "scripted read failure"))),
            None => Err(PromptError::Terminal(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no scripted keys left",
            ))),
        }
    }
}

// =============================================================================
// Terminal
// =============================================================================

#[derive(Default)]
struct TerminalState {
    written: String,
    commands: Vec<String>,
    columns: Option<usize>,
}

/// Records written text and cursor commands (`up:N`, `column:N`, `erase`,
/// `show`, `hide`).
#[derive(Clone, Default)]
pub struct FakeTerminal {
    state: Arc<Mutex<TerminalState>>,
}

impl FakeTerminal {
    pub fn set_columns(&self, columns: usize) {
        lock(&self.state).columns = Some(columns);
    }

    pub fn written(&self) -> String {
        lock(&self.state).written.clone()
    }

    pub fn commands(&self) -> Vec<String> {
        lock(&self.state).commands.clone()
    }

    pub fn columns_moved_to(&self) -> Vec<usize> {
        self.commands()
            .iter()
            .filter_map(|command| command.strip_prefix("column:")?.parse().ok())
            .collect()
    }

    pub fn is_untouched(&self) -> bool {
        let state = lock(&self.state);
        state.written.is_empty() && state.commands.is_empty()
    }

    fn record(&self, command: String) {
        lock(&self.state).commands.push(command);
    }
}

impl TerminalPort for FakeTerminal {
    fn write(&mut self, text: &str) -> Result<(), PromptError> {
        lock(&self.state).written.push_str(text);
        Ok(())
    }

    fn columns(&self) -> Option<usize> {
        lock(&self.state).columns
    }

    fn cursor_up(&mut self, lines: usize) -> Result<(), PromptError> {
        self.record(format!("up:{lines}"));
        Ok(())
    }

    fn cursor_to_column(&mut self, column: usize) -> Result<(), PromptError> {
        self.record(format!("column:{column}"));
        Ok(())
    }

    fn erase_down(&mut self) -> Result<(), PromptError> {
        self.record("erase".to_string());
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<(), PromptError> {
        self.record("show".to_string());
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<(), PromptError> {
        self.record("hide".to_string());
        Ok(())
    }
}

// =============================================================================
// History store
// =============================================================================

#[derive(Default)]
struct StoreState {
    values: HashMap<String, String>,
    fail: bool,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn insert(&self, key: &str, value: &str) {
        lock(&self.state).values.insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        lock(&self.state).values.get(key).cloned()
    }

    /// Make every get and set fail.
    pub fn fail(&self, fail: bool) {
        lock(&self.state).fail = fail;
    }

    fn unavailable(key: &str) -> PromptError {
        PromptError::Store {
            key: key.to_string(),
            source: io::Error::other("store unavailable"),
        }
    }
}

impl HistoryStorePort for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PromptError> {
        let state = lock(&self.state);
        if state.fail {
            return Err(Self::unavailable(key));
        }
        Ok(state.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PromptError> {
        let mut state = lock(&self.state);
        if state.fail {
            return Err(Self::unavailable(key));
        }
        state.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Host
// =============================================================================

#[derive(Default)]
struct HostState {
    exit_codes: Vec<i32>,
    env: HashMap<String, String>,
    denied: HashSet<Permission>,
    checks: Vec<Permission>,
}

/// Grants every permission unless told otherwise. `exit` only records.
#[derive(Clone, Default)]
pub struct FakeHost {
    state: Arc<Mutex<HostState>>,
}

impl FakeHost {
    pub fn deny(&self, permission: Permission) {
        lock(&self.state).denied.insert(permission);
    }

    pub fn set_env(&self, name: &str, value: &str) {
        lock(&self.state).env.insert(name.to_string(), value.to_string());
    }

    pub fn exit_codes(&self) -> Vec<i32> {
        lock(&self.state).exit_codes.clone()
    }

    /// Every query and request, in order.
    pub fn permission_checks(&self) -> Vec<Permission> {
        lock(&self.state).checks.clone()
    }

    fn check(&self, permission: &Permission) -> bool {
        let mut state = lock(&self.state);
        state.checks.push(permission.clone());
        !state.denied.contains(permission)
    }
}

impl HostPort for FakeHost {
    fn exit(&mut self, code: i32) {
        lock(&self.state).exit_codes.push(code);
    }

    fn env_var(&self, name: &str) -> Option<String> {
        lock(&self.state).env.get(name).cloned()
    }

    fn query_permission(&self, permission: &Permission) -> bool {
        self.check(permission)
    }

    fn request_permission(&mut self, permission: &Permission) -> bool {
        self.check(permission)
    }
}

// =============================================================================
// Filesystem
// =============================================================================

/// In-memory directory listing. Only registered directories exist.
#[derive(Clone, Default)]
pub struct FakeFs {
    dirs: Vec<(PathBuf, Vec<String>)>,
}

impl FakeFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, path: &str, names: &[&str]) -> Self {
        let names = names.iter().map(|name| name.to_string()).collect();
        self.dirs.push((PathBuf::from(path), names));
        self
    }

    fn find(&self, path: &Path) -> Option<&Vec<String>> {
        self.dirs
            .iter()
            .find(|(dir, _)| dir.as_path() == path)
            .map(|(_, names)| names)
    }
}

impl FsPort for FakeFs {
    fn is_directory(&self, path: &Path) -> bool {
        self.find(path).is_some()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        self.find(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display())))
    }
}

// =============================================================================
// Harness
// =============================================================================

/// One fake per port plus handles to inspect them.
#[derive(Clone, Default)]
pub struct Harness {
    pub reader: FakeKeyReader,
    pub terminal: FakeTerminal,
    pub host: FakeHost,
    pub fs: FakeFs,
    pub store: MemoryStore,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fs(mut self, fs: FakeFs) -> Self {
        self.fs = fs;
        self
    }

    pub fn io(&self) -> PromptIo {
        PromptIo::new(
            Box::new(self.reader.clone()),
            Box::new(self.terminal.clone()),
            Box::new(self.host.clone()),
            Box::new(self.fs.clone()),
        )
    }

    pub fn io_with_history(&self) -> PromptIo {
        self.io().with_history(Box::new(self.store.clone()))
    }
}
