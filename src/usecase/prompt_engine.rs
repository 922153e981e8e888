use std::io;

use tracing::{debug, trace};

use crate::domain::primitive::figures::{CROSS, POINTER, POINTER_SMALL};
use crate::domain::primitive::{Action, Cursor, KeyBindings, KeyPress, Validation};
use crate::shared::error::PromptError;
use crate::shared::style::{bold, bright_blue, dim, display_width, green, italic, red, yellow};
use crate::usecase::prompt_io::PromptIo;

/// Exit code used when the user aborts with Ctrl+C.
pub const INTERRUPT_EXIT_CODE: i32 = 130;

pub type ValidateFn<R> = Box<dyn Fn(&R) -> Validation>;
pub type TransformFn<R, V> = Box<dyn Fn(R) -> Option<V>>;

/// Settings shared by every prompt. Read-only while the prompt runs.
pub struct PromptSettings<R, V> {
    pub message: String,
    pub default: Option<V>,
    pub hide_default: bool,
    /// Replaces the prompt's built-in validation when set.
    pub validate: Option<ValidateFn<R>>,
    /// Replaces the prompt's built-in transform when set.
    pub transform: Option<TransformFn<R, V>>,
    pub hint: Option<String>,
    pub pointer: String,
    pub indent: String,
    pub prefix: String,
    pub cbreak: bool,
    pub keys: KeyBindings,
}

impl<R, V> PromptSettings<R, V> {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            default: None,
            hide_default: false,
            validate: None,
            transform: None,
            hint: None,
            pointer: bright_blue(POINTER_SMALL),
            indent: String::new(),
            prefix: yellow("? "),
            cbreak: false,
            keys: KeyBindings::new(),
        }
    }
}

/// Per-run engine state handed to prompt behaviors.
pub struct PromptCore<R, V> {
    pub settings: PromptSettings<R, V>,
    pub io: PromptIo,
    /// Caret position inside the rendered frame, recomputed every render.
    pub cursor: Cursor,
    last_error: Option<String>,
    first_run: bool,
    value: Option<V>,
}

impl<R, V> PromptCore<R, V> {
    pub fn new(settings: PromptSettings<R, V>, io: PromptIo) -> Self {
        Self {
            settings,
            io,
            cursor: Cursor::default(),
            last_error: None,
            first_run: true,
            value: None,
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// `indent + prefix + bold(message) + defaults`.
    pub fn header(&self, defaults: &str) -> String {
        format!(
            "{}{}{}{}",
            self.settings.indent,
            self.settings.prefix,
            bold(&self.settings.message),
            defaults
        )
    }

    fn error_line(&self) -> Option<String> {
        self.last_error.as_ref().map(|message| {
            format!("{}{}{}", self.settings.indent, bold(&red(&format!("{CROSS} "))), red(message))
        })
    }

    fn hint_line(&self) -> Option<String> {
        self.settings.hint.as_ref().map(|hint| {
            format!(
                "{}{}{}",
                self.settings.indent,
                dim(&bright_blue(&format!("{POINTER} "))),
                italic(&bright_blue(hint))
            )
        })
    }

    fn footer(&self) -> Option<String> {
        self.error_line().or_else(|| self.hint_line())
    }
}

/// Whether a behavior consumed a key or leaves it to the base engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Unhandled,
}

/// The prompt-specific half of a prompt: state, rendering and value rules.
///
/// The base engine owns the loop, error display and submit handling and
/// calls into the behavior at fixed points.
pub trait PromptBehavior {
    /// Raw value collected from the user.
    type Raw;
    /// Resolved value returned by the prompt.
    type Value: Clone;

    /// Refresh derived state right before a render.
    fn prepare(&mut self, _core: &mut PromptCore<Self::Raw, Self::Value>) -> Result<(), PromptError> {
        Ok(())
    }

    /// Default-value indicator appended to the header.
    fn defaults(&self, core: &PromptCore<Self::Raw, Self::Value>) -> String {
        match &core.settings.default {
            Some(default) if !core.settings.hide_default => {
                dim(&format!(" ({})", self.format(default)))
            }
            _ => String::new(),
        }
    }

    /// First rendered line. Sets `core.cursor` when the caret belongs on it.
    fn message(&mut self, core: &mut PromptCore<Self::Raw, Self::Value>) -> String {
        let defaults = self.defaults(core);
        core.header(&defaults)
    }

    fn body(&mut self, _core: &mut PromptCore<Self::Raw, Self::Value>) -> Option<String> {
        None
    }

    fn before_read(&mut self, _core: &mut PromptCore<Self::Raw, Self::Value>) -> Result<(), PromptError> {
        Ok(())
    }

    fn handle_key(
        &mut self,
        key: &KeyPress,
        core: &mut PromptCore<Self::Raw, Self::Value>,
    ) -> Result<KeyOutcome, PromptError>;

    /// Return false to swallow a submit (e.g. redirecting focus instead).
    fn before_submit(&mut self, _core: &mut PromptCore<Self::Raw, Self::Value>) -> bool {
        true
    }

    fn raw_value(&self) -> Self::Raw;

    /// Blank raw values resolve to the default without validation.
    fn is_blank(&self, raw: &Self::Raw) -> bool;

    fn validate(&self, raw: &Self::Raw) -> Validation;

    fn transform(&self, raw: Self::Raw) -> Option<Self::Value>;

    fn format(&self, value: &Self::Value) -> String;

    fn on_success(
        &mut self,
        _value: &Self::Value,
        _core: &mut PromptCore<Self::Raw, Self::Value>,
    ) -> Result<(), PromptError> {
        Ok(())
    }
}

/// Rendered line count once lines wider than the terminal wrap.
pub fn wrapped_line_count(content: &str, columns: Option<usize>) -> usize {
    match columns {
        Some(columns) if columns > 0 => content
            .split('\n')
            .map(|line| {
                let width = display_width(line);
                if width > columns { width.div_ceil(columns) } else { 1 }
            })
            .sum(),
        _ => content.split('\n').count(),
    }
}

/// Read errors that just mean "nothing to read yet".
fn is_transient(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock)
}

/// Drives a [`PromptBehavior`] through render, read and submit until a value
/// is produced.
pub struct PromptEngine<B: PromptBehavior> {
    behavior: B,
    core: PromptCore<B::Raw, B::Value>,
}

impl<B: PromptBehavior> PromptEngine<B> {
    pub fn new(behavior: B, core: PromptCore<B::Raw, B::Value>) -> Self {
        Self { behavior, core }
    }

    /// Run the prompt. With an injected raw value the terminal is never
    /// touched: the value is validated once and either resolves or fails.
    pub fn run(mut self, injected: Option<B::Raw>) -> Result<B::Value, PromptError> {
        debug!(message = %self.core.settings.message, injected = injected.is_some(), "prompt start");
        if let Some(raw) = injected {
            return self.run_injected(raw);
        }

        let result = self.execute();

        // === Cleanup (always runs) ===
        let shown = self.core.io.terminal.show_cursor();

        let value = result?;
        shown?;
        Ok(value)
    }

    fn run_injected(mut self, raw: B::Raw) -> Result<B::Value, PromptError> {
        self.validate_value(raw);
        match self.core.value.take() {
            Some(value) => {
                self.behavior.on_success(&value, &mut self.core)?;
                Ok(value)
            }
            None => Err(self
                .core
                .last_error
                .take()
                .map_or(PromptError::MissingValue, PromptError::InjectedValueRejected)),
        }
    }

    fn execute(&mut self) -> Result<B::Value, PromptError> {
        loop {
            self.render()?;
            self.core.last_error = None;

            if !self.read()? {
                continue;
            }

            let value = self.core.value.take().ok_or(PromptError::MissingValue)?;
            self.core.io.terminal.erase_down()?;
            self.behavior.on_success(&value, &mut self.core)?;

            let defaults = self.behavior.defaults(&self.core);
            let line = format!(
                "{} {} {}\n",
                self.core.header(&defaults),
                self.core.settings.pointer,
                green(&self.behavior.format(&value))
            );
            self.core.io.terminal.write(&line)?;
            debug!("prompt resolved");
            return Ok(value);
        }
    }

    fn render(&mut self) -> Result<(), PromptError> {
        self.behavior.prepare(&mut self.core)?;
        let message = self.behavior.message(&mut self.core);
        let body = self.behavior.body(&mut self.core);
        let footer = self.core.footer();

        let content = [Some(message), body, footer]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        let lines = wrapped_line_count(&content, self.core.io.terminal.columns());
        let up = lines.saturating_sub(self.core.cursor.y + 1);

        if !self.core.first_run || self.core.last_error.is_some() {
            self.core.io.terminal.erase_down()?;
        }
        self.core.first_run = false;

        let terminal = &mut self.core.io.terminal;
        terminal.write(&content)?;
        if up > 0 {
            terminal.cursor_up(up)?;
        }
        terminal.cursor_to_column(self.core.cursor.x)
    }

    /// Read one batch of keys and dispatch them in order. Returns whether a
    /// value has been produced.
    fn read(&mut self) -> Result<bool, PromptError> {
        self.behavior.before_read(&mut self.core)?;

        let cbreak = self.core.settings.cbreak;
        let reader = &mut self.core.io.reader;
        let is_tty = reader.is_terminal();
        if is_tty {
            reader.set_raw(true, cbreak)?;
        }
        let keys = reader.read_keys();
        if is_tty {
            reader.set_raw(false, cbreak)?;
        }
        let keys = match keys {
            Err(PromptError::Terminal(err)) if is_transient(&err) => {
                trace!(error = %err, "read interrupted");
                return Ok(false);
            }
            other => other?,
        };

        if keys.is_empty() {
            return Ok(false);
        }
        for key in &keys {
            self.handle_key(key)?;
        }
        Ok(self.core.value.is_some())
    }

    fn handle_key(&mut self, key: &KeyPress) -> Result<(), PromptError> {
        trace!(name = ?key.name, sequence = ?key.sequence, "key");
        if key.is_ctrl_c() {
            let terminal = &mut self.core.io.terminal;
            terminal.erase_down()?;
            terminal.show_cursor()?;
            self.core.io.host.exit(INTERRUPT_EXIT_CODE);
            return Err(PromptError::Interrupted);
        }

        if self.behavior.handle_key(key, &mut self.core)? == KeyOutcome::Handled {
            return Ok(());
        }
        if self.core.settings.keys.matches(Action::Submit, key) {
            self.submit();
        }
        Ok(())
    }

    fn submit(&mut self) {
        if !self.behavior.before_submit(&mut self.core) {
            return;
        }
        let raw = self.behavior.raw_value();
        self.validate_value(raw);
    }

    fn validate_value(&mut self, raw: B::Raw) {
        if self.behavior.is_blank(&raw)
            && let Some(default) = &self.core.settings.default
        {
            self.core.value = Some(default.clone());
            return;
        }

        self.core.value = None;
        self.core.last_error = None;

        let validation = match &self.core.settings.validate {
            Some(validate) => validate(&raw),
            None => self.behavior.validate(&raw),
        };

        match validation.error_message() {
            Some(message) => self.core.last_error = Some(message),
            None => {
                self.core.value = match &self.core.settings.transform {
                    Some(transform) => transform(raw),
                    None => self.behavior.transform(raw),
                };
            }
        }
    }
}
