use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::interface_adapter::port::HistoryStorePort;
use crate::shared::error::PromptError;

/// History store keeping every prompt id in one JSON object on disk.
///
/// The file is read on every access and rewritten on every `set`; there is
/// no locking between processes sharing it.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_local_dir>/cli_prompt/suggestions.json`, when the platform
    /// has a data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("cli_prompt").join("suggestions.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self, key: &str) -> Result<Map<String, Value>, PromptError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(PromptError::Store {
                    key: key.to_string(),
                    source,
                });
            }
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => {
                warn!(path = %self.path.display(), "history file is not a JSON object, starting over");
                Ok(Map::new())
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "history file is corrupt, starting over");
                Ok(Map::new())
            }
        }
    }
}

impl HistoryStorePort for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PromptError> {
        Ok(self.load(key)?.get(key).map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PromptError> {
        let store_error = |source: io::Error| PromptError::Store {
            key: key.to_string(),
            source,
        };

        let mut map = self.load(key)?;
        map.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(store_error)?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(map)).map_err(|e| store_error(io::Error::other(e)))?;
        fs::write(&self.path, json).map_err(store_error)?;
        debug!(key, path = %self.path.display(), "history saved");
        Ok(())
    }
}
