use std::collections::BTreeMap;

use crate::domain::primitive::{Action, KeyBindings, Validation};
use crate::interface_adapter::adapter::prompt_io_factory;
use crate::prompt::options::PromptOptions;
use crate::usecase::prompt_engine::{PromptSettings, TransformFn, ValidateFn};
use crate::usecase::prompt_io::PromptIo;

/// Builder state every prompt shares.
///
/// Precedence when the prompt runs: explicit builder calls, then
/// [`PromptOptions`], then the prompt's built-in defaults.
pub struct CommonOptions<R, V> {
    pub(crate) message: String,
    pub(crate) options: PromptOptions,
    pub(crate) default: Option<V>,
    pub(crate) hide_default: Option<bool>,
    pub(crate) hint: Option<String>,
    pub(crate) pointer: Option<String>,
    pub(crate) prefix: Option<String>,
    pub(crate) indent: Option<String>,
    pub(crate) cbreak: Option<bool>,
    pub(crate) validate: Option<ValidateFn<R>>,
    pub(crate) transform: Option<TransformFn<R, V>>,
    pub(crate) keys: BTreeMap<Action, Vec<String>>,
    pub(crate) io: Option<PromptIo>,
    pub(crate) injected: Option<R>,
}

impl<R, V> CommonOptions<R, V> {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            options: PromptOptions::default(),
            default: None,
            hide_default: None,
            hint: None,
            pointer: None,
            prefix: None,
            indent: None,
            cbreak: None,
            validate: None,
            transform: None,
            keys: BTreeMap::new(),
            io: None,
            injected: None,
        }
    }

    /// Resolve the engine settings. `keys` and `hide_default` are the
    /// prompt's own defaults.
    pub(crate) fn settings(&mut self, keys: KeyBindings, hide_default: bool) -> PromptSettings<R, V> {
        let mut settings = PromptSettings::new(std::mem::take(&mut self.message));
        settings.keys = keys;
        self.options.apply(&mut settings);

        settings.default = self.default.take();
        settings.hide_default = self.hide_default.unwrap_or(hide_default);
        settings.validate = self.validate.take();
        settings.transform = self.transform.take();
        if let Some(hint) = self.hint.take() {
            settings.hint = Some(hint);
        }
        if let Some(pointer) = self.pointer.take() {
            settings.pointer = pointer;
        }
        if let Some(prefix) = self.prefix.take() {
            settings.prefix = prefix;
        }
        if let Some(indent) = self.indent.take() {
            settings.indent = indent;
        }
        if let Some(cbreak) = self.cbreak {
            settings.cbreak = cbreak;
        }
        settings.keys.merge(&self.keys);
        settings
    }

    /// The caller's I/O bundle, or the real terminal. History is attached
    /// only when the prompt has an id to store it under.
    pub(crate) fn take_io(&mut self, with_history: bool) -> PromptIo {
        match self.io.take() {
            Some(io) => io,
            None if with_history => prompt_io_factory::create_prompt_io_with_history(None),
            None => prompt_io_factory::create_prompt_io(),
        }
    }
}

/// Builder methods shared by every prompt.
pub trait PromptBuilder: Sized {
    /// Raw value the user produces.
    type Raw: 'static;
    /// Value the prompt resolves to.
    type Value: 'static;

    fn common(&mut self) -> &mut CommonOptions<Self::Raw, Self::Value>;

    fn options(mut self, options: PromptOptions) -> Self {
        self.common().options = options;
        self
    }

    /// Run against these ports instead of the real terminal.
    fn io(mut self, io: PromptIo) -> Self {
        self.common().io = Some(io);
        self
    }

    /// Resolve from `raw` without touching the terminal. A rejected value
    /// fails with [`crate::PromptError::InjectedValueRejected`].
    fn inject(mut self, raw: Self::Raw) -> Self {
        self.common().injected = Some(raw);
        self
    }

    /// Returned verbatim, without validation, when the raw value is blank.
    fn default(mut self, value: Self::Value) -> Self {
        self.common().default = Some(value);
        self
    }

    fn hide_default(mut self, hide: bool) -> Self {
        self.common().hide_default = Some(hide);
        self
    }

    fn hint(mut self, hint: impl Into<String>) -> Self {
        self.common().hint = Some(hint.into());
        self
    }

    fn pointer(mut self, pointer: impl Into<String>) -> Self {
        self.common().pointer = Some(pointer.into());
        self
    }

    fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.common().prefix = Some(prefix.into());
        self
    }

    fn indent(mut self, indent: impl Into<String>) -> Self {
        self.common().indent = Some(indent.into());
        self
    }

    fn cbreak(mut self, cbreak: bool) -> Self {
        self.common().cbreak = Some(cbreak);
        self
    }

    /// Replace the built-in validation. Return a `bool`, a message, or a
    /// [`Validation`].
    fn validate<F, O>(mut self, validate: F) -> Self
    where
        F: Fn(&Self::Raw) -> O + 'static,
        O: Into<Validation> + 'static,
    {
        self.common().validate = Some(Box::new(move |raw: &Self::Raw| validate(raw).into()));
        self
    }

    /// Replace the built-in transform. `None` leaves the prompt unresolved.
    fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Self::Raw) -> Option<Self::Value> + 'static,
    {
        self.common().transform = Some(Box::new(transform));
        self
    }

    /// Rebind `action` to `keys`.
    fn key(mut self, action: Action, keys: &[&str]) -> Self {
        self.common()
            .keys
            .insert(action, keys.iter().map(|k| k.to_string()).collect());
        self
    }
}
