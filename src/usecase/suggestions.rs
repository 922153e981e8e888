use std::collections::{HashMap, HashSet};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::matcher::filter_and_sort;
use crate::domain::model::{InputBuffer, SuggestionList};
use crate::domain::primitive::figures::{INFO, POINTER, figures_by_keys};
use crate::domain::primitive::{Action, KeyBindings, KeyPress};
use crate::interface_adapter::port::{FsPort, HostPort, Permission};
use crate::shared::style::{bold, bright_blue, dim, underline};
use crate::usecase::prompt_engine::KeyOutcome;
use crate::usecase::prompt_io::PromptIo;
use crate::usecase::text_input::{InputEdit, apply_edit, edit_for, highlight};

pub type SuggestFn = Box<dyn Fn(&str) -> Vec<String>>;
pub type CompleteFn = Box<dyn Fn(&str, Option<&str>) -> String>;

/// Caller supplied candidates.
pub enum SuggestionSource {
    Static(Vec<String>),
    /// Called with the current input on every render.
    Dynamic(SuggestFn),
}

/// Which directory entries file mode offers.
#[derive(Debug, Clone)]
pub enum FileFilter {
    /// Everything except dotfiles and `~` backups.
    Visible,
    /// Entries whose joined path matches the expression.
    Matching(Regex),
}

pub struct SuggestionSettings {
    /// History key. Without it nothing is loaded or saved.
    pub id: Option<String>,
    pub source: Option<SuggestionSource>,
    pub complete: Option<CompleteFn>,
    pub files: Option<FileFilter>,
    /// Render candidates as a list below the input.
    pub list: bool,
    pub info: bool,
    pub list_pointer: String,
    pub max_rows: usize,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            id: None,
            source: None,
            complete: None,
            files: None,
            list: false,
            info: false,
            list_pointer: bright_blue(POINTER),
            max_rows: 8,
        }
    }
}

/// Add the suggestion navigation defaults to `keys`.
pub fn add_suggestion_keys(keys: &mut KeyBindings) {
    keys.bind(Action::Complete, &["tab"]);
    keys.bind(Action::Next, &["up"]);
    keys.bind(Action::Previous, &["down"]);
    keys.bind(Action::NextPage, &["pageup"]);
    keys.bind(Action::PreviousPage, &["pagedown"]);
}

/// Environment variable holding the home directory on this platform.
pub fn home_env_var() -> &'static str {
    if cfg!(windows) { "USERPROFILE" } else { "HOME" }
}

/// Lexically normalize a path: collapse separators, drop `.` segments and
/// resolve `..` where possible. A trailing separator is kept.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let absolute = path.starts_with(['/', MAIN_SEPARATOR]);
    let trailing = path.ends_with(['/', MAIN_SEPARATOR]);

    let mut parts: Vec<&str> = Vec::new();
    for part in path.split(['/', MAIN_SEPARATOR]) {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            _ => parts.push(part),
        }
    }

    let mut normalized = parts.join(&MAIN_SEPARATOR.to_string());
    if absolute {
        normalized.insert(0, MAIN_SEPARATOR);
    } else if normalized.is_empty() {
        normalized.push('.');
    }
    if trailing && !normalized.ends_with(MAIN_SEPARATOR) {
        normalized.push(MAIN_SEPARATOR);
    }
    normalized
}

fn dirname(path: &str) -> PathBuf {
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None if path.is_empty() => PathBuf::from("."),
        None => PathBuf::from(path),
    }
}

fn unique(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| !value.is_empty() && seen.insert(value.clone()))
        .collect()
}

/// Parse stored history. Anything but a JSON array counts as empty; numbers
/// are kept as their decimal text.
pub fn parse_history(json: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            })
            .collect(),
        Ok(_) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "ignoring malformed suggestion history");
            Vec::new()
        }
    }
}

/// List `dir` for file suggestions, sorted case-insensitively.
pub fn list_dir(fs: &dyn FsPort, dir: &Path, filter: &FileFilter) -> Vec<String> {
    let names = match fs.read_dir(dir) {
        Ok(names) => names,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "file suggestions unavailable");
            return Vec::new();
        }
    };

    let base = dir.to_string_lossy();
    let mut paths: Vec<String> = names
        .into_iter()
        .filter(|name| match filter {
            FileFilter::Visible => !(name.starts_with('.') || name.ends_with('~')),
            FileFilter::Matching(_) => true,
        })
        .map(|name| normalize_path(&format!("{base}{MAIN_SEPARATOR}{name}")))
        .filter(|path| match filter {
            FileFilter::Visible => true,
            FileFilter::Matching(re) => re.is_match(path),
        })
        .collect();

    paths.sort_by_key(|path| path.to_lowercase());
    paths
}

/// Text input with auto-suggestions from history, caller candidates and
/// the filesystem.
pub struct SuggestionInput {
    settings: SuggestionSettings,
    buffer: InputBuffer,
    list: SuggestionList,
    env_permissions: HashMap<String, bool>,
    read_permission: Option<bool>,
}

impl SuggestionInput {
    pub fn new(settings: SuggestionSettings) -> Self {
        let list = SuggestionList::new(Some(settings.max_rows));
        Self {
            settings,
            buffer: InputBuffer::new(),
            list,
            env_permissions: HashMap::new(),
            read_permission: None,
        }
    }

    pub fn settings(&self) -> &SuggestionSettings {
        &self.settings
    }

    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    pub fn suggestions(&self) -> &SuggestionList {
        &self.list
    }

    pub fn value(&self) -> String {
        self.buffer.value()
    }

    pub fn file_mode_enabled(&self) -> bool {
        self.settings.files.is_some() && self.read_permission == Some(true)
    }

    // =========================================================================
    // Render-time refresh
    // =========================================================================

    /// Resolve permissions, expand `~` and recompute the candidates.
    pub fn prepare(&mut self, io: &mut PromptIo) {
        if self.settings.files.is_some() && self.read_permission.is_none() {
            let granted = io.host.query_permission(&Permission::Read)
                || io.host.request_permission(&Permission::Read);
            if !granted {
                debug!("read permission denied, file suggestions disabled");
            }
            self.read_permission = Some(granted);
        }
        if self.file_mode_enabled() {
            self.expand_home(io.host.as_mut());
        }
        self.match_suggestions(io);
    }

    fn expand_home(&mut self, host: &mut dyn HostPort) {
        let value = self.buffer.value();
        if !value.starts_with('~') {
            return;
        }
        let var = home_env_var();
        if !self.has_env_permission(var, host) {
            return;
        }
        if let Some(home) = host.env_var(var) {
            self.set_input(&value.replacen('~', &home, 1));
        }
    }

    fn has_env_permission(&mut self, var: &str, host: &mut dyn HostPort) -> bool {
        if let Some(granted) = self.env_permissions.get(var) {
            return *granted;
        }
        let permission = Permission::Env(var.to_string());
        let granted = host.query_permission(&permission) || host.request_permission(&permission);
        self.env_permissions.insert(var.to_string(), granted);
        granted
    }

    fn match_suggestions(&mut self, io: &PromptIo) {
        let input = self.buffer.value();
        let candidates = self.candidates(&input, io);
        self.list.replace(candidates, input.trim().is_empty());
    }

    /// History, caller candidates and file entries merged, de-duplicated,
    /// then ranked against `input`.
    pub fn candidates(&self, input: &str, io: &PromptIo) -> Vec<String> {
        let mut merged = self.load_history(io);
        match &self.settings.source {
            Some(SuggestionSource::Static(values)) => merged.extend(values.iter().cloned()),
            Some(SuggestionSource::Dynamic(suggest)) => merged.extend(suggest(input)),
            None => {}
        }
        merged.extend(self.file_suggestions(input, io.fs.as_ref()));
        filter_and_sort(input, unique(merged))
    }

    fn file_suggestions(&self, input: &str, fs: &dyn FsPort) -> Vec<String> {
        let Some(filter) = self.settings.files.as_ref().filter(|_| self.file_mode_enabled()) else {
            return Vec::new();
        };
        let dir = if !input.is_empty() && fs.is_directory(Path::new(input)) {
            PathBuf::from(input)
        } else {
            dirname(input)
        };
        list_dir(fs, &dir, filter)
    }

    // =========================================================================
    // History
    // =========================================================================

    pub fn load_history(&self, io: &PromptIo) -> Vec<String> {
        let (Some(id), Some(store)) = (&self.settings.id, &io.history) else {
            return Vec::new();
        };
        match store.get(id) {
            Ok(Some(json)) => parse_history(&json),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read suggestion history");
                Vec::new()
            }
        }
    }

    /// Prepend `values` to the stored history, keeping each entry once.
    pub fn save_history(&self, io: &mut PromptIo, values: &[String]) {
        let Some(id) = &self.settings.id else {
            return;
        };
        let loaded = self.load_history(io);
        let Some(store) = io.history.as_mut() else {
            return;
        };
        let merged = unique(values.iter().cloned().chain(loaded));
        let json = match serde_json::to_string(&merged) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to encode suggestion history");
                return;
            }
        };
        if let Err(e) = store.set(id, &json) {
            warn!(error = %e, "failed to save suggestion history");
        }
    }

    // =========================================================================
    // Key handling
    // =========================================================================

    pub fn handle_key(&mut self, key: &KeyPress, keys: &KeyBindings, io: &PromptIo) -> KeyOutcome {
        let list = self.settings.list;
        if keys.matches(Action::Next, key) {
            if list { self.list.select_previous() } else { self.list.select_next() }
        } else if keys.matches(Action::Previous, key) {
            if list { self.list.select_next() } else { self.list.select_previous() }
        } else if keys.matches(Action::NextPage, key) {
            if list { self.list.select_previous_page() } else { self.list.select_next_page() }
        } else if keys.matches(Action::PreviousPage, key) {
            if list { self.list.select_next_page() } else { self.list.select_previous_page() }
        } else if keys.matches(Action::Complete, key) {
            self.complete_value(io.fs.as_ref());
        } else if keys.matches(Action::MoveCursorRight, key) {
            if self.buffer.index() < self.buffer.len() {
                self.buffer.move_right();
            } else {
                self.complete_value(io.fs.as_ref());
            }
        } else if let Some(edit) = edit_for(keys, key) {
            self.edit(edit);
        } else {
            return KeyOutcome::Unhandled;
        }
        KeyOutcome::Handled
    }

    fn edit(&mut self, edit: InputEdit) {
        if edit == InputEdit::DeleteRight {
            if self.buffer.index() < self.buffer.len() {
                self.buffer.delete_right();
                if self.buffer.is_empty() {
                    self.list.reset();
                }
            }
            return;
        }
        apply_edit(&mut self.buffer, edit);
    }

    fn set_input(&mut self, value: &str) {
        self.buffer.set(value);
        self.list.restart();
    }

    fn complete_value(&mut self, fs: &dyn FsPort) {
        let completed = self.complete(fs);
        self.set_input(&completed);
    }

    /// What tab completion should turn the input into.
    pub fn complete(&self, fs: &dyn FsPort) -> String {
        let mut input = self.buffer.value();
        let suggestion = self.list.selected();
        let file_mode = self.file_mode_enabled();

        if let Some(complete) = &self.settings.complete {
            input = complete(&input, suggestion);
        } else if file_mode
            && !input.ends_with(MAIN_SEPARATOR)
            && fs.is_directory(Path::new(&input))
            && (!input.ends_with('.') || input.ends_with(".."))
        {
            debug!(dir = %input, "completing directory");
            input.push(MAIN_SEPARATOR);
        } else if let Some(suggestion) = suggestion {
            input = suggestion.to_string();
        }

        if file_mode { normalize_path(&input) } else { input }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// The typed text plus the dimmed rest of the highlighted suggestion.
    pub fn render_input(&self) -> String {
        let value = self.buffer.value();
        let mut out = if value.is_empty() { String::new() } else { underline(&value) };
        if let Some(suggestion) = self.list.selected() {
            let rest: String = suggestion.chars().skip(value.chars().count()).collect();
            if !rest.is_empty() {
                out.push_str(&dim(&rest));
            }
        }
        out
    }

    pub fn body(&self, indent: &str, keys: &KeyBindings) -> String {
        format!("{}{}", self.render_list(indent), self.render_info(indent, keys))
    }

    fn render_list(&self, indent: &str) -> String {
        if !self.settings.list || self.list.items().is_empty() {
            return String::new();
        }
        let input = self.buffer.value();
        let offset = self.list.offset();
        let mut rows: Vec<String> = self
            .list
            .visible()
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let label = highlight(value, &input, dim, bright_blue);
                if self.list.index() == Some(offset + i) {
                    format!("{indent}{} {}", self.settings.list_pointer, underline(&label))
                } else {
                    format!("{indent}  {label}")
                }
            })
            .collect();
        if !rows.is_empty() && self.settings.info {
            rows.push(String::new());
        }
        rows.join("\n")
    }

    fn render_info(&self, indent: &str, keys: &KeyBindings) -> String {
        if !self.settings.info {
            return String::new();
        }
        let matched = self.list.items().len();
        let mut actions: Vec<(&str, Action)> = Vec::new();
        if matched > 0 {
            // list mode renders top-down, so the bindings swap roles
            if self.settings.list {
                actions.push(("Next", Action::Previous));
                actions.push(("Previous", Action::Next));
                actions.push(("Next Page", Action::PreviousPage));
                actions.push(("Previous Page", Action::NextPage));
            } else {
                actions.push(("Next", Action::Next));
                actions.push(("Previous", Action::Previous));
            }
            actions.push(("Complete", Action::Complete));
        }
        actions.push(("Submit", Action::Submit));

        let mut info = indent.to_string();
        if matched > 0 {
            let selected = self.list.index().map_or(0, |i| i + 1);
            info.push_str(&bright_blue(INFO));
            info.push_str(&bold(&format!(" {selected}/{matched} ")));
        }
        let described: Vec<String> = actions
            .into_iter()
            .map(|(name, action)| format!("{name}: {}", bold(&figures_by_keys(keys.keys(action)).join(" "))))
            .collect();
        info.push_str(&described.join(", "));
        info
    }
}
