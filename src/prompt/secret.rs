use crate::domain::model::InputBuffer;
use crate::domain::primitive::{KeyBindings, KeyPress, Validation};
use crate::prompt::builder::{CommonOptions, PromptBuilder};
use crate::prompt::input::check_length;
use crate::shared::error::PromptError;
use crate::shared::style::underline;
use crate::usecase::prompt_engine::{KeyOutcome, PromptBehavior, PromptCore, PromptEngine};
use crate::usecase::text_input::{add_input_keys, apply_edit, cursor_column, edit_for};

const MASK: char = '*';
const SUCCESS_MASK_WIDTH: usize = 16;

/// Masked text prompt. The default is hidden unless asked otherwise.
pub struct Secret {
    common: CommonOptions<String, String>,
    label: String,
    hidden: bool,
    min_length: usize,
    max_length: Option<usize>,
}

impl Secret {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            common: CommonOptions::new(message),
            label: "Password".to_string(),
            hidden: false,
            min_length: 0,
            max_length: None,
        }
    }

    /// Name used in length errors.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Render nothing at all while typing.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = min;
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn prompt(mut self) -> Result<String, PromptError> {
        let mut keys = KeyBindings::new();
        add_input_keys(&mut keys);
        let settings = self.common.settings(keys, true);
        let io = self.common.take_io(false);
        let behavior = SecretBehavior {
            buffer: InputBuffer::new(),
            label: self.label,
            hidden: self.hidden,
            min_length: self.min_length,
            max_length: self.max_length,
        };
        PromptEngine::new(behavior, PromptCore::new(settings, io)).run(self.common.injected.take())
    }
}

impl PromptBuilder for Secret {
    type Raw = String;
    type Value = String;

    fn common(&mut self) -> &mut CommonOptions<String, String> {
        &mut self.common
    }
}

struct SecretBehavior {
    buffer: InputBuffer,
    label: String,
    hidden: bool,
    min_length: usize,
    max_length: Option<usize>,
}

impl PromptBehavior for SecretBehavior {
    type Raw = String;
    type Value = String;

    fn message(&mut self, core: &mut PromptCore<String, String>) -> String {
        let defaults = self.defaults(core);
        let message = format!("{} {} ", core.header(&defaults), core.settings.pointer);
        if self.hidden {
            core.cursor.x = cursor_column(&message, "");
            return format!("{message}{}", underline(""));
        }
        let masked: String = std::iter::repeat_n(MASK, self.buffer.len()).collect();
        let before: String = std::iter::repeat_n(MASK, self.buffer.index()).collect();
        core.cursor.x = cursor_column(&message, &before);
        format!("{message}{}", underline(&masked))
    }

    fn before_read(&mut self, core: &mut PromptCore<String, String>) -> Result<(), PromptError> {
        if self.hidden {
            core.io.terminal.hide_cursor()?;
        }
        Ok(())
    }

    fn handle_key(
        &mut self,
        key: &KeyPress,
        core: &mut PromptCore<String, String>,
    ) -> Result<KeyOutcome, PromptError> {
        match edit_for(&core.settings.keys, key) {
            Some(edit) => {
                apply_edit(&mut self.buffer, edit);
                Ok(KeyOutcome::Handled)
            }
            None => Ok(KeyOutcome::Unhandled),
        }
    }

    fn raw_value(&self) -> String {
        self.buffer.value()
    }

    fn is_blank(&self, raw: &String) -> bool {
        raw.is_empty()
    }

    fn validate(&self, raw: &String) -> Validation {
        check_length(&self.label, raw, self.min_length, self.max_length)
    }

    fn transform(&self, raw: String) -> Option<String> {
        Some(raw)
    }

    fn format(&self, _value: &String) -> String {
        std::iter::repeat_n(MASK, SUCCESS_MASK_WIDTH).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::style::strip_ansi;
    use crate::test_support::Harness;

    fn typed(harness: &Harness, text: &str) {
        harness.reader.push(text.chars().map(KeyPress::char).collect());
    }

    #[test]
    fn value_is_not_trimmed() {
        let harness = Harness::new();
        typed(&harness, " s3cret ");
        harness.reader.push(vec![KeyPress::named("return")]);
        assert_eq!(Secret::new("Password").io(harness.io()).prompt().unwrap(), " s3cret ");
    }

    #[test]
    fn typed_characters_are_masked() {
        let harness = Harness::new();
        typed(&harness, "abc");
        harness.reader.push(vec![KeyPress::named("return")]);
        Secret::new("Password").io(harness.io()).prompt().unwrap();
        let written = strip_ansi(&harness.terminal.written());
        assert!(written.contains("? Password \u{203a} ***"));
        assert!(!written.contains("abc"));
    }

    #[test]
    fn success_line_hides_length() {
        let harness = Harness::new();
        typed(&harness, "ab");
        harness.reader.push(vec![KeyPress::named("return")]);
        Secret::new("Password").io(harness.io()).prompt().unwrap();
        let written = strip_ansi(&harness.terminal.written());
        assert!(written.ends_with(&format!("? Password \u{203a} {}\n", "*".repeat(16))));
    }

    #[test]
    fn hidden_renders_nothing_and_hides_cursor() {
        let harness = Harness::new();
        typed(&harness, "abc");
        harness.reader.push(vec![KeyPress::named("return")]);
        Secret::new("Password").hidden(true).io(harness.io()).prompt().unwrap();
        let written = strip_ansi(&harness.terminal.written());
        // only the success line shows a mask
        assert_eq!(written.matches("\u{203a} *").count(), 1);
        assert!(harness.terminal.commands().contains(&"hide".to_string()));
    }

    #[test]
    fn default_is_hidden_by_default() {
        let harness = Harness::new();
        harness.reader.push(vec![KeyPress::named("return")]);
        let value = Secret::new("Password")
            .default("fallback".to_string())
            .io(harness.io())
            .prompt()
            .unwrap();
        assert_eq!(value, "fallback");
        assert!(!strip_ansi(&harness.terminal.written()).contains("(fallback)"));
    }

    #[test]
    fn length_errors_use_label() {
        let harness = Harness::new();
        let result = Secret::new("Token")
            .label("Token")
            .min_length(4)
            .inject("ab".to_string())
            .io(harness.io())
            .prompt();
        match result {
            Err(PromptError::InjectedValueRejected(message)) => {
                assert_eq!(message, "Token must be longer than 4 but has a length of 2.");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn caret_follows_masked_input() {
        let harness = Harness::new();
        let mut batch: Vec<KeyPress> = "abc".chars().map(KeyPress::char).collect();
        batch.push(KeyPress::named("left"));
        harness.reader.push(batch);
        harness.reader.push(vec![KeyPress::named("return")]);
        Secret::new("Pw").io(harness.io()).prompt().unwrap();
        // "? Pw › " is 7 columns wide, two masked characters precede the caret
        assert!(harness.terminal.columns_moved_to().contains(&9));
    }
}
