use std::fmt;

/// A selectable leaf of the option tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOption<T> {
    pub value: T,
    pub name: String,
    /// `value` rendered as text, searched alongside `name`.
    pub value_text: String,
    /// True when `name` was given explicitly rather than derived from `value`.
    pub explicit_name: bool,
    pub disabled: bool,
}

/// A named, openable collection of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ListGroup<T> {
    pub name: String,
    pub disabled: bool,
    pub options: Vec<ListEntry<T>>,
}

/// Display-only row, never selectable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator {
    pub name: String,
}

pub const DEFAULT_SEPARATOR: &str = "------------";

#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry<T> {
    Option(ListOption<T>),
    Group(ListGroup<T>),
    Separator(Separator),
}

impl<T: fmt::Display> ListEntry<T> {
    /// Leaf whose label is the value's display text.
    pub fn value(value: T) -> Self {
        let text = value.to_string();
        ListEntry::Option(ListOption {
            value,
            name: text.clone(),
            value_text: text,
            explicit_name: false,
            disabled: false,
        })
    }

    /// Leaf with an explicit label.
    pub fn named(value: T, name: impl Into<String>) -> Self {
        let value_text = value.to_string();
        ListEntry::Option(ListOption {
            value,
            name: name.into(),
            value_text,
            explicit_name: true,
            disabled: false,
        })
    }
}

impl<T> ListEntry<T> {
    pub fn group(name: impl Into<String>, options: Vec<ListEntry<T>>) -> Self {
        ListEntry::Group(ListGroup {
            name: name.into(),
            disabled: false,
            options,
        })
    }

    pub fn separator(label: impl Into<String>) -> Self {
        ListEntry::Separator(Separator { name: label.into() })
    }

    /// Mark an option or group as disabled. Separators are always disabled.
    pub fn disabled(mut self) -> Self {
        match &mut self {
            ListEntry::Option(option) => option.disabled = true,
            ListEntry::Group(group) => group.disabled = true,
            ListEntry::Separator(_) => {}
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            ListEntry::Option(option) => &option.name,
            ListEntry::Group(group) => &group.name,
            ListEntry::Separator(separator) => &separator.name,
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            ListEntry::Option(option) => option.disabled,
            ListEntry::Group(group) => group.disabled,
            ListEntry::Separator(_) => true,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, ListEntry::Group(_))
    }

    pub fn as_option(&self) -> Option<&ListOption<T>> {
        match self {
            ListEntry::Option(option) => Some(option),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&[ListEntry<T>]> {
        match self {
            ListEntry::Group(group) => Some(&group.options),
            _ => None,
        }
    }
}

/// Resolve an index path (one index per tree level) to an entry.
pub fn entry_at<'a, T>(entries: &'a [ListEntry<T>], path: &[usize]) -> Option<&'a ListEntry<T>> {
    let (first, rest) = path.split_first()?;
    let entry = entries.get(*first)?;
    if rest.is_empty() {
        Some(entry)
    } else {
        entry_at(entry.children()?, rest)
    }
}

/// Apply `f` to every option in the tree, depth-first.
pub fn for_each_option<T>(entries: &[ListEntry<T>], f: &mut impl FnMut(&ListOption<T>)) {
    for entry in entries {
        match entry {
            ListEntry::Option(option) => f(option),
            ListEntry::Group(group) => for_each_option(&group.options, f),
            ListEntry::Separator(_) => {}
        }
    }
}

/// Mutable variant of [`for_each_option`].
pub fn for_each_option_mut<T>(entries: &mut [ListEntry<T>], f: &mut impl FnMut(&mut ListOption<T>)) {
    for entry in entries {
        match entry {
            ListEntry::Option(option) => f(option),
            ListEntry::Group(group) => for_each_option_mut(&mut group.options, f),
            ListEntry::Separator(_) => {}
        }
    }
}
