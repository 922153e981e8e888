use std::fmt;

use crate::domain::model::list_entry::{DEFAULT_SEPARATOR, for_each_option, for_each_option_mut};
use crate::domain::model::ListEntry;
use crate::domain::primitive::{KeyBindings, KeyPress, Validation};
use crate::prompt::builder::{CommonOptions, PromptBuilder};
use crate::shared::error::PromptError;
use crate::usecase::list::{ListSettings, OptionList, SubmitBlock, add_list_keys};
use crate::usecase::prompt_engine::{KeyOutcome, PromptBehavior, PromptCore, PromptEngine};
use crate::usecase::text_input::add_input_keys;

type FormatFn<T> = Box<dyn Fn(&T) -> String>;

/// Pick one value from a flat or grouped option list.
///
/// The raw value is the highlighted option, `None` while a group, the back
/// row or the search field has focus.
///
/// ```no_run
/// use cli_prompt::{ListEntry, PromptBuilder, Select};
///
/// let color = Select::new(
///     "Pick a color",
///     vec![
///         ListEntry::value("red"),
///         Select::separator("--"),
///         ListEntry::group("Blues", vec![ListEntry::value("navy"), ListEntry::value("sky")]),
///     ],
/// )
/// .search(true)
/// .prompt()?;
/// # Ok::<(), cli_prompt::PromptError>(())
/// ```
pub struct Select<T> {
    common: CommonOptions<Option<T>, T>,
    entries: Vec<ListEntry<T>>,
    list: ListSettings,
    max_rows: Option<usize>,
    list_pointer: Option<String>,
    info: Option<bool>,
    format: Option<FormatFn<T>>,
}

impl Select<()> {
    /// Display-only row. An empty label uses the default dashes.
    pub fn separator<T>(label: impl Into<String>) -> ListEntry<T> {
        let label = label.into();
        if label.is_empty() {
            ListEntry::separator(DEFAULT_SEPARATOR)
        } else {
            ListEntry::separator(label)
        }
    }
}

impl<T> Select<T>
where
    T: Clone + PartialEq + fmt::Display + 'static,
{
    pub fn new(message: impl Into<String>, entries: Vec<ListEntry<T>>) -> Self {
        Self {
            common: CommonOptions::new(message),
            entries,
            list: ListSettings::default(),
            max_rows: None,
            list_pointer: None,
            info: None,
            format: None,
        }
    }

    pub fn search(mut self, search: bool) -> Self {
        self.list.search = search;
        self
    }

    pub fn search_label(mut self, label: impl Into<String>) -> Self {
        self.list.search_label = label.into();
        self
    }

    pub fn list_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.list_pointer = Some(pointer.into());
        self
    }

    pub fn group_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.list.group_pointer = Some(pointer.into());
        self
    }

    pub fn back_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.list.back_pointer = pointer.into();
        self
    }

    /// `None` drops the icon in front of closed groups.
    pub fn group_icon(mut self, icon: Option<String>) -> Self {
        self.list.group_icon = icon;
        self
    }

    /// `None` drops the icon in front of the back row.
    pub fn group_open_icon(mut self, icon: Option<String>) -> Self {
        self.list.group_open_icon = icon;
        self
    }

    pub fn max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    pub fn max_breadcrumb_items(mut self, items: usize) -> Self {
        self.list.max_breadcrumb_items = items;
        self
    }

    pub fn breadcrumb_separator(mut self, separator: impl Into<String>) -> Self {
        self.list.breadcrumb_separator = separator.into();
        self
    }

    pub fn info(mut self, info: bool) -> Self {
        self.info = Some(info);
        self
    }

    /// Label options that were created without an explicit name.
    pub fn format(mut self, format: impl Fn(&T) -> String + 'static) -> Self {
        self.format = Some(Box::new(format));
        self
    }

    pub fn prompt(mut self) -> Result<T, PromptError> {
        let options = &self.common.options;
        let mut list = self.list;
        if let Some(rows) = self.max_rows.or(options.max_rows) {
            list.max_rows = rows;
        }
        if let Some(pointer) = self.list_pointer.or_else(|| options.list_pointer.clone()) {
            list.list_pointer = pointer;
        }
        list.info = self.info.or(options.info).unwrap_or(false);

        let mut keys = KeyBindings::new();
        add_input_keys(&mut keys);
        add_list_keys(&mut keys, list.search);
        let settings = self.common.settings(keys, false);

        let mut entries = self.entries;
        if let Some(format) = &self.format {
            for_each_option_mut(&mut entries, &mut |option| {
                if !option.explicit_name {
                    option.name = format(&option.value);
                }
            });
        }

        let mut options = OptionList::new(entries, list);
        if let Some(default) = &settings.default {
            options.highlight_where(|value| value == default);
        }

        let io = self.common.take_io(false);
        let behavior = SelectBehavior { list: options };
        PromptEngine::new(behavior, PromptCore::new(settings, io)).run(self.common.injected.take())
    }
}

impl<T> PromptBuilder for Select<T>
where
    T: Clone + PartialEq + fmt::Display + 'static,
{
    type Raw = Option<T>;
    type Value = T;

    fn common(&mut self) -> &mut CommonOptions<Option<T>, T> {
        &mut self.common
    }
}

struct SelectBehavior<T> {
    list: OptionList<T>,
}

impl<T: PartialEq> SelectBehavior<T> {
    fn find_name(&self, value: &T) -> Option<String> {
        let mut name = None;
        for_each_option(self.list.navigator().entries(), &mut |option| {
            if name.is_none() && option.value == *value {
                name = Some(option.name.clone());
            }
        });
        name
    }
}

impl<T> PromptBehavior for SelectBehavior<T>
where
    T: Clone + PartialEq + fmt::Display,
{
    type Raw = Option<T>;
    type Value = T;

    fn message(&mut self, core: &mut PromptCore<Option<T>, T>) -> String {
        let defaults = self.defaults(core);
        self.list.message(core.header(&defaults), &mut core.cursor)
    }

    fn body(&mut self, core: &mut PromptCore<Option<T>, T>) -> Option<String> {
        Some(self.list.body(&core.settings.indent, &core.settings.keys))
    }

    fn before_read(&mut self, core: &mut PromptCore<Option<T>, T>) -> Result<(), PromptError> {
        if !self.list.settings().search {
            core.io.terminal.hide_cursor()?;
        }
        Ok(())
    }

    fn handle_key(
        &mut self,
        key: &KeyPress,
        core: &mut PromptCore<Option<T>, T>,
    ) -> Result<KeyOutcome, PromptError> {
        Ok(self.list.handle_key(key, &core.settings.keys))
    }

    fn before_submit(&mut self, core: &mut PromptCore<Option<T>, T>) -> bool {
        match self.list.check_submit(&core.settings.keys) {
            Ok(()) => true,
            Err(SubmitBlock::Redirected) => false,
            Err(SubmitBlock::NotSelectable(message)) => {
                core.set_error(message);
                false
            }
        }
    }

    fn raw_value(&self) -> Option<T> {
        self.list.selected_value().cloned()
    }

    fn is_blank(&self, raw: &Option<T>) -> bool {
        raw.is_none()
    }

    fn validate(&self, raw: &Option<T>) -> Validation {
        match raw {
            Some(value) => self.find_name(value).is_some().into(),
            None => Validation::Invalid,
        }
    }

    fn transform(&self, raw: Option<T>) -> Option<T> {
        raw
    }

    fn format(&self, value: &T) -> String {
        self.find_name(value).unwrap_or_else(|| value.to_string())
    }
}
