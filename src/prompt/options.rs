use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::primitive::Action;
use crate::shared::error::PromptError;
use crate::usecase::prompt_engine::PromptSettings;

/// Shared prompt affordances loaded from JSON. Every field is optional;
/// absent fields keep the prompt's built-in default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptOptions {
    pub pointer: Option<String>,
    pub prefix: Option<String>,
    pub indent: Option<String>,
    pub hint: Option<String>,
    pub cbreak: Option<bool>,
    pub max_rows: Option<usize>,
    pub list_pointer: Option<String>,
    pub info: Option<bool>,
    pub keys: BTreeMap<Action, Vec<String>>,
}

impl PromptOptions {
    pub fn from_json_str(json: &str) -> Result<Self, PromptError> {
        serde_json::from_str(json).map_err(PromptError::Config)
    }

    pub fn load(path: &Path) -> Result<Self, PromptError> {
        let json = fs::read_to_string(path).map_err(|source| PromptError::OptionsFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Overwrite the base settings this file sets.
    pub fn apply<R, V>(&self, settings: &mut PromptSettings<R, V>) {
        if let Some(pointer) = &self.pointer {
            settings.pointer = pointer.clone();
        }
        if let Some(prefix) = &self.prefix {
            settings.prefix = prefix.clone();
        }
        if let Some(indent) = &self.indent {
            settings.indent = indent.clone();
        }
        if let Some(hint) = &self.hint {
            settings.hint = Some(hint.clone());
        }
        if let Some(cbreak) = self.cbreak {
            settings.cbreak = cbreak;
        }
        settings.keys.merge(&self.keys);
    }
}
