use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::primitive::KeyPress;

/// Prompt actions a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Submit,
    MoveCursorLeft,
    MoveCursorRight,
    DeleteCharLeft,
    DeleteCharRight,
    Complete,
    Next,
    Previous,
    NextPage,
    PreviousPage,
    Open,
    Back,
}

/// Named action -> accepted key names or raw sequences.
///
/// Always contains a `Submit` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    map: BTreeMap<Action, Vec<String>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut map = BTreeMap::new();
        map.insert(Action::Submit, vec!["enter".to_string(), "return".to_string()]);
        Self { map }
    }

    /// [`KeyBindings::set`] for static key names.
    pub fn bind(&mut self, action: Action, keys: &[&str]) {
        self.set(action, keys.iter().map(|k| k.to_string()).collect());
    }

    /// Bind `keys` to `action`, replacing any previous binding. An empty
    /// list for `Submit` is ignored.
    pub fn set(&mut self, action: Action, keys: Vec<String>) {
        if action == Action::Submit && keys.is_empty() {
            return;
        }
        self.map.insert(action, keys);
    }

    /// Apply caller overrides on top of the current bindings.
    pub fn merge(&mut self, overrides: &BTreeMap<Action, Vec<String>>) {
        for (action, keys) in overrides {
            self.set(*action, keys.clone());
        }
    }

    pub fn keys(&self, action: Action) -> &[String] {
        self.map.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if `key`'s name or raw sequence is bound to `action`.
    pub fn matches(&self, action: Action, key: &KeyPress) -> bool {
        let Some(keys) = self.map.get(&action) else {
            return false;
        };
        let by_name = key
            .name
            .as_ref()
            .is_some_and(|name| keys.iter().any(|k| k == name));
        let by_sequence = key
            .sequence
            .as_ref()
            .is_some_and(|seq| keys.iter().any(|k| k == seq));
        by_name || by_sequence
    }
}
