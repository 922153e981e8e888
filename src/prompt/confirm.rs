use crate::domain::primitive::{KeyBindings, KeyPress, Validation};
use crate::prompt::builder::{CommonOptions, PromptBuilder};
use crate::prompt::input::input_message;
use crate::shared::error::PromptError;
use crate::shared::style::dim;
use crate::usecase::prompt_engine::{KeyOutcome, PromptBehavior, PromptCore, PromptEngine};
use crate::usecase::suggestions::{SuggestionInput, SuggestionSettings, SuggestionSource, add_suggestion_keys};
use crate::usecase::text_input::add_input_keys;

/// Yes/no question answered by typing either label or its first letter.
pub struct Confirm {
    common: CommonOptions<String, bool>,
    active: String,
    inactive: String,
    id: Option<String>,
}

impl Confirm {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            common: CommonOptions::new(message),
            active: "Yes".to_string(),
            inactive: "No".to_string(),
            id: None,
        }
    }

    /// Label for `true`.
    pub fn active(mut self, label: impl Into<String>) -> Self {
        self.active = label.into();
        self
    }

    /// Label for `false`.
    pub fn inactive(mut self, label: impl Into<String>) -> Self {
        self.inactive = label.into();
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn prompt(mut self) -> Result<bool, PromptError> {
        let mut keys = KeyBindings::new();
        add_input_keys(&mut keys);
        add_suggestion_keys(&mut keys);
        let settings = self.common.settings(keys, false);

        let suggestions = SuggestionSettings {
            id: self.id,
            source: Some(SuggestionSource::Static(vec![self.active.clone(), self.inactive.clone()])),
            ..SuggestionSettings::default()
        };
        let io = self.common.take_io(suggestions.id.is_some());
        let behavior = ConfirmBehavior {
            input: SuggestionInput::new(suggestions),
            labels: Labels {
                active: self.active,
                inactive: self.inactive,
            },
        };
        PromptEngine::new(behavior, PromptCore::new(settings, io)).run(self.common.injected.take())
    }
}

impl PromptBuilder for Confirm {
    type Raw = String;
    type Value = bool;

    fn common(&mut self) -> &mut CommonOptions<String, bool> {
        &mut self.common
    }
}

struct Labels {
    active: String,
    inactive: String,
}

fn initial(label: &str) -> String {
    label.chars().next().map(String::from).unwrap_or_default()
}

impl Labels {
    /// `Some(true)` for the active label or its initial, `Some(false)` for
    /// the inactive one. Case-insensitive.
    fn parse(&self, raw: &str) -> Option<bool> {
        let raw = raw.to_lowercase();
        let matches = |label: &str| raw == label.to_lowercase() || raw == initial(label).to_lowercase();
        if matches(&self.active) {
            Some(true)
        } else if matches(&self.inactive) {
            Some(false)
        } else {
            None
        }
    }

    fn indicator(&self, default: Option<bool>) -> String {
        let (active, inactive) = (initial(&self.active), initial(&self.inactive));
        let hint = match default {
            Some(true) => format!("{}/{}", active.to_uppercase(), inactive.to_lowercase()),
            Some(false) => format!("{}/{}", active.to_lowercase(), inactive.to_uppercase()),
            None => format!("{}/{}", active.to_lowercase(), inactive.to_lowercase()),
        };
        dim(&format!(" ({hint})"))
    }
}

struct ConfirmBehavior {
    input: SuggestionInput,
    labels: Labels,
}

impl PromptBehavior for ConfirmBehavior {
    type Raw = String;
    type Value = bool;

    fn prepare(&mut self, core: &mut PromptCore<String, bool>) -> Result<(), PromptError> {
        self.input.prepare(&mut core.io);
        Ok(())
    }

    // The indicator doubles as the answer legend, so it ignores hide_default.
    fn defaults(&self, core: &PromptCore<String, bool>) -> String {
        self.labels.indicator(core.settings.default)
    }

    fn message(&mut self, core: &mut PromptCore<String, bool>) -> String {
        let defaults = self.defaults(core);
        input_message(core, &defaults, &self.input)
    }

    fn body(&mut self, core: &mut PromptCore<String, bool>) -> Option<String> {
        Some(self.input.body(&core.settings.indent, &core.settings.keys))
    }

    fn handle_key(
        &mut self,
        key: &KeyPress,
        core: &mut PromptCore<String, bool>,
    ) -> Result<KeyOutcome, PromptError> {
        Ok(self.input.handle_key(key, &core.settings.keys, &core.io))
    }

    fn raw_value(&self) -> String {
        self.input.value()
    }

    fn is_blank(&self, raw: &String) -> bool {
        raw.is_empty()
    }

    fn validate(&self, raw: &String) -> Validation {
        self.labels.parse(raw).is_some().into()
    }

    fn transform(&self, raw: String) -> Option<bool> {
        self.labels.parse(&raw)
    }

    fn format(&self, value: &bool) -> String {
        if *value { self.labels.active.clone() } else { self.labels.inactive.clone() }
    }

    fn on_success(&mut self, value: &bool, core: &mut PromptCore<String, bool>) -> Result<(), PromptError> {
        let label = self.format(value);
        self.input.save_history(&mut core.io, &[label]);
        Ok(())
    }
}
