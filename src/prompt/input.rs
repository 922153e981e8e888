use crate::domain::primitive::{KeyBindings, KeyPress, Validation};
use crate::prompt::builder::{CommonOptions, PromptBuilder};
use crate::shared::error::PromptError;
use crate::usecase::prompt_engine::{KeyOutcome, PromptBehavior, PromptCore, PromptEngine};
use crate::usecase::suggestions::{
    FileFilter, SuggestionInput, SuggestionSettings, SuggestionSource, add_suggestion_keys, normalize_path,
};
use crate::usecase::text_input::{add_input_keys, cursor_column};

/// Free text prompt with optional suggestions, history and file completion.
///
/// ```no_run
/// use cli_prompt::{Input, PromptBuilder};
///
/// let name = Input::new("What's your name?").id("name").min_length(2).prompt()?;
/// # Ok::<(), cli_prompt::PromptError>(())
/// ```
pub struct Input {
    common: CommonOptions<String, String>,
    min_length: usize,
    max_length: Option<usize>,
    suggestions: SuggestionSettings,
    max_rows: Option<usize>,
    list_pointer: Option<String>,
    info: Option<bool>,
}

impl Input {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            common: CommonOptions::new(message),
            min_length: 0,
            max_length: None,
            suggestions: SuggestionSettings::default(),
            max_rows: None,
            list_pointer: None,
            info: None,
        }
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = min;
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Persist submitted values as suggestions under `id`.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.suggestions.id = Some(id.into());
        self
    }

    pub fn suggestions<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.suggestions.source = Some(SuggestionSource::Static(values));
        self
    }

    /// Compute suggestions from the current input on every render.
    pub fn suggest_with(mut self, suggest: impl Fn(&str) -> Vec<String> + 'static) -> Self {
        self.suggestions.source = Some(SuggestionSource::Dynamic(Box::new(suggest)));
        self
    }

    /// Decide what tab completion inserts, given the input and the
    /// highlighted suggestion.
    pub fn complete_with(mut self, complete: impl Fn(&str, Option<&str>) -> String + 'static) -> Self {
        self.suggestions.complete = Some(Box::new(complete));
        self
    }

    pub fn files(mut self, filter: FileFilter) -> Self {
        self.suggestions.files = Some(filter);
        self
    }

    pub fn list(mut self, list: bool) -> Self {
        self.suggestions.list = list;
        self
    }

    pub fn info(mut self, info: bool) -> Self {
        self.info = Some(info);
        self
    }

    pub fn max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    pub fn list_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.list_pointer = Some(pointer.into());
        self
    }

    pub fn prompt(mut self) -> Result<String, PromptError> {
        let mut keys = KeyBindings::new();
        add_input_keys(&mut keys);
        add_suggestion_keys(&mut keys);
        let settings = self.common.settings(keys, false);

        let options = &self.common.options;
        let mut suggestions = self.suggestions;
        if let Some(rows) = self.max_rows.or(options.max_rows) {
            suggestions.max_rows = rows;
        }
        if let Some(pointer) = self.list_pointer.or_else(|| options.list_pointer.clone()) {
            suggestions.list_pointer = pointer;
        }
        suggestions.info = self.info.or(options.info).unwrap_or(false);

        let io = self.common.take_io(suggestions.id.is_some());
        let behavior = InputBehavior {
            input: SuggestionInput::new(suggestions),
            min_length: self.min_length,
            max_length: self.max_length,
        };
        PromptEngine::new(behavior, PromptCore::new(settings, io)).run(self.common.injected.take())
    }
}

impl PromptBuilder for Input {
    type Raw = String;
    type Value = String;

    fn common(&mut self) -> &mut CommonOptions<String, String> {
        &mut self.common
    }
}

/// Length rule shared by text prompts. Lengths count characters.
pub(crate) fn check_length(label: &str, value: &str, min: usize, max: Option<usize>) -> Validation {
    let length = value.chars().count();
    if length < min {
        return Validation::Rejected(format!(
            "{label} must be longer than {min} but has a length of {length}."
        ));
    }
    if let Some(max) = max
        && length > max
    {
        return Validation::Rejected(format!(
            "{label} can't be longer than {max} but has a length of {length}."
        ));
    }
    Validation::Valid
}

/// Text input shared by prompts built on suggestions: header, pointer, then
/// the typed text. Places the caret inside the text.
pub(crate) fn input_message<R, V>(core: &mut PromptCore<R, V>, defaults: &str, input: &SuggestionInput) -> String {
    let message = format!("{} {} ", core.header(defaults), core.settings.pointer);
    core.cursor.x = cursor_column(&message, &input.buffer().before_cursor());
    format!("{message}{}", input.render_input())
}

struct InputBehavior {
    input: SuggestionInput,
    min_length: usize,
    max_length: Option<usize>,
}

impl PromptBehavior for InputBehavior {
    type Raw = String;
    type Value = String;

    fn prepare(&mut self, core: &mut PromptCore<String, String>) -> Result<(), PromptError> {
        self.input.prepare(&mut core.io);
        Ok(())
    }

    fn message(&mut self, core: &mut PromptCore<String, String>) -> String {
        let defaults = self.defaults(core);
        input_message(core, &defaults, &self.input)
    }

    fn body(&mut self, core: &mut PromptCore<String, String>) -> Option<String> {
        Some(self.input.body(&core.settings.indent, &core.settings.keys))
    }

    fn handle_key(
        &mut self,
        key: &KeyPress,
        core: &mut PromptCore<String, String>,
    ) -> Result<KeyOutcome, PromptError> {
        Ok(self.input.handle_key(key, &core.settings.keys, &core.io))
    }

    fn raw_value(&self) -> String {
        let value = self.input.value();
        if self.input.settings().files.is_some() && !value.is_empty() {
            normalize_path(&value)
        } else {
            value
        }
    }

    fn is_blank(&self, raw: &String) -> bool {
        raw.is_empty()
    }

    fn validate(&self, raw: &String) -> Validation {
        check_length("Value", raw, self.min_length, self.max_length)
    }

    fn transform(&self, raw: String) -> Option<String> {
        Some(raw.trim().to_string())
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }

    fn on_success(&mut self, value: &String, core: &mut PromptCore<String, String>) -> Result<(), PromptError> {
        self.input.save_history(&mut core.io, std::slice::from_ref(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptOptions;
    use crate::shared::style::strip_ansi;
    use crate::test_support::Harness;

    fn chars(text: &str) -> Vec<KeyPress> {
        text.chars().map(KeyPress::char).collect()
    }

    // =========================================================================
    // Tests: interactive
    // =========================================================================

    #[test]
    fn typed_value_is_trimmed() {
        let harness = Harness::new();
        harness.reader.push(chars(" bob "));
        harness.reader.push(vec![KeyPress::named("return")]);
        let value = Input::new("Name").io(harness.io()).prompt().unwrap();
        assert_eq!(value, "bob");
    }

    #[test]
    fn success_line_shows_value() {
        let harness = Harness::new();
        harness.reader.push(chars("bob"));
        harness.reader.push(vec![KeyPress::named("return")]);
        Input::new("Name").io(harness.io()).prompt().unwrap();
        let written = strip_ansi(&harness.terminal.written());
        assert!(written.ends_with("? Name \u{203a} bob\n"));
    }

    #[test]
    fn empty_submit_uses_default_without_validation() {
        let harness = Harness::new();
        harness.reader.push(vec![KeyPress::named("return")]);
        let value = Input::new("Name")
            .default("anon".to_string())
            .validate(|_| false)
            .io(harness.io())
            .prompt()
            .unwrap();
        assert_eq!(value, "anon");
    }

    #[test]
    fn default_is_shown_in_header() {
        let harness = Harness::new();
        harness.reader.push(vec![KeyPress::named("return")]);
        Input::new("Name").default("anon".to_string()).io(harness.io()).prompt().unwrap();
        assert!(strip_ansi(&harness.terminal.written()).starts_with("? Name (anon) \u{203a} "));
    }

    #[test]
    fn min_length_error_is_rendered_then_corrected() {
        let harness = Harness::new();
        harness.reader.push(chars("a"));
        harness.reader.push(vec![KeyPress::named("return")]);
        harness.reader.push(chars("b"));
        harness.reader.push(vec![KeyPress::named("return")]);
        let value = Input::new("Name").min_length(2).io(harness.io()).prompt().unwrap();
        assert_eq!(value, "ab");
        assert!(
            strip_ansi(&harness.terminal.written())
                .contains("\u{2718} Value must be longer than 2 but has a length of 1.")
        );
    }

    #[test]
    fn custom_validation_message_replaces_builtin() {
        let harness = Harness::new();
        harness.reader.push(chars("x"));
        harness.reader.push(vec![KeyPress::named("return")]);
        harness.reader.push(vec![KeyPress::named("backspace")]);
        harness.reader.push(chars("ok"));
        harness.reader.push(vec![KeyPress::named("return")]);
        let value = Input::new("Name")
            .validate(|raw: &String| if raw == "ok" { Ok(()) } else { Err("say ok".to_string()) })
            .io(harness.io())
            .prompt()
            .unwrap();
        assert_eq!(value, "ok");
        assert!(strip_ansi(&harness.terminal.written()).contains("say ok"));
    }

    #[test]
    fn ctrl_c_exits_with_130() {
        let harness = Harness::new();
        harness.reader.push(vec![KeyPress::ctrl('c')]);
        let result = Input::new("Name").io(harness.io()).prompt();
        assert!(matches!(result, Err(PromptError::Interrupted)));
        assert_eq!(harness.host.exit_codes(), vec![130]);
        assert!(harness.terminal.commands().contains(&"show".to_string()));
    }

    #[test]
    fn keys_in_one_batch_are_handled_in_order() {
        let harness = Harness::new();
        let mut batch = chars("ac");
        batch.push(KeyPress::named("left"));
        batch.push(KeyPress::char('b'));
        batch.push(KeyPress::named("return"));
        harness.reader.push(batch);
        let value = Input::new("Name").io(harness.io()).prompt().unwrap();
        assert_eq!(value, "abc");
        assert_eq!(harness.reader.reads(), 1);
    }

    #[test]
    fn raw_mode_is_toggled_around_every_read() {
        let harness = Harness::new();
        harness.reader.push(chars("a"));
        harness.reader.push(vec![KeyPress::named("return")]);
        Input::new("Name").io(harness.io()).prompt().unwrap();
        assert_eq!(harness.reader.raw_toggles(), vec![(true, false), (false, false), (true, false), (false, false)]);
    }

    #[test]
    fn cbreak_reaches_raw_mode_toggle() {
        let harness = Harness::new();
        harness.reader.push(vec![KeyPress::named("return")]);
        Input::new("Name").default("x".to_string()).cbreak(true).io(harness.io()).prompt().unwrap();
        assert_eq!(harness.reader.raw_toggles(), vec![(true, true), (false, true)]);
    }

    #[test]
    fn cbreak_from_options_reaches_raw_mode_toggle() {
        let harness = Harness::new();
        harness.reader.push(vec![KeyPress::named("return")]);
        let options = PromptOptions {
            cbreak: Some(true),
            ..PromptOptions::default()
        };
        Input::new("Name").default("x".to_string()).options(options).io(harness.io()).prompt().unwrap();
        assert_eq!(harness.reader.raw_toggles(), vec![(true, true), (false, true)]);
    }

    #[test]
    fn empty_batch_loops_again() {
        let harness = Harness::new();
        harness.reader.push(Vec::new());
        harness.reader.push(chars("z"));
        harness.reader.push(vec![KeyPress::named("return")]);
        assert_eq!(Input::new("Name").io(harness.io()).prompt().unwrap(), "z");
    }

    #[test]
    fn tab_completes_suggestion() {
        let harness = Harness::new();
        harness.reader.push(chars("ap"));
        harness.reader.push(vec![KeyPress::named("tab")]);
        harness.reader.push(vec![KeyPress::named("return")]);
        let value = Input::new("Fruit")
            .suggestions(["apple", "banana"])
            .io(harness.io())
            .prompt()
            .unwrap();
        assert_eq!(value, "apple");
    }

    #[test]
    fn submitted_value_is_saved_to_history() {
        let harness = Harness::new();
        harness.store.insert("name", r#"["carol"]"#);
        harness.reader.push(chars("dave"));
        harness.reader.push(vec![KeyPress::named("return")]);
        Input::new("Name").id("name").io(harness.io_with_history()).prompt().unwrap();
        assert_eq!(harness.store.value("name").as_deref(), Some(r#"["dave","carol"]"#));
    }

    #[test]
    fn explicit_pointer_wins_over_options() {
        let harness = Harness::new();
        harness.reader.push(vec![KeyPress::named("return")]);
        let options = crate::prompt::PromptOptions::from_json_str(r#"{"pointer": ":", "prefix": "> "}"#).unwrap();
        Input::new("Name")
            .options(options)
            .pointer("=")
            .default("x".to_string())
            .io(harness.io())
            .prompt()
            .unwrap();
        assert!(strip_ansi(&harness.terminal.written()).ends_with("> Name (x) = x\n"));
    }

    // =========================================================================
    // Tests: injection
    // =========================================================================

    #[test]
    fn injected_value_resolves_without_io() {
        let harness = Harness::new();
        let value = Input::new("Name").inject("  zed ".to_string()).io(harness.io()).prompt().unwrap();
        assert_eq!(value, "zed");
        assert_eq!(harness.reader.reads(), 0);
        assert!(harness.terminal.is_untouched());
    }

    #[test]
    fn injected_invalid_value_fails_fast() {
        let harness = Harness::new();
        let result = Input::new("Name")
            .max_length(2)
            .inject("toolong".to_string())
            .io(harness.io())
            .prompt();
        match result {
            Err(PromptError::InjectedValueRejected(message)) => {
                assert_eq!(message, "Value can't be longer than 2 but has a length of 7.");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(harness.terminal.is_untouched());
    }

    #[test]
    fn check_length_counts_characters() {
        assert_eq!(check_length("Value", "\u{e9}\u{e9}", 2, Some(2)), Validation::Valid);
    }
}
