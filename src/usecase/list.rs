use tracing::debug;

use crate::domain::model::{Focus, InputBuffer, ListEntry, ListNavigator, ViewRow};
use crate::domain::primitive::figures::{
    ELLIPSIS, FOLDER, FOLDER_OPEN, INFO, POINTER, POINTER_LEFT, POINTER_SMALL, SEARCH, figures_by_keys,
};
use crate::domain::primitive::{Action, Cursor, KeyBindings, KeyPress};
use crate::shared::style::{bold, bright_blue, dim, plain, underline, yellow};
use crate::usecase::prompt_engine::KeyOutcome;
use crate::usecase::text_input::{apply_edit, cursor_column, edit_for, highlight};

/// Visual and behavioral settings of a list prompt.
#[derive(Debug, Clone)]
pub struct ListSettings {
    /// Show a search field after the header and filter rows as the user types.
    pub search: bool,
    pub search_label: String,
    pub list_pointer: String,
    /// Falls back to `list_pointer`.
    pub group_pointer: Option<String>,
    pub back_pointer: String,
    pub group_icon: Option<String>,
    pub group_open_icon: Option<String>,
    pub max_rows: usize,
    pub max_breadcrumb_items: usize,
    pub breadcrumb_separator: String,
    pub info: bool,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            search: false,
            search_label: bright_blue(SEARCH),
            list_pointer: bright_blue(POINTER),
            group_pointer: None,
            back_pointer: bright_blue(POINTER_LEFT),
            group_icon: Some(FOLDER.to_string()),
            group_open_icon: Some(FOLDER_OPEN.to_string()),
            max_rows: 10,
            max_breadcrumb_items: 5,
            breadcrumb_separator: format!(" {POINTER_SMALL} "),
            info: false,
        }
    }
}

/// Add the list navigation defaults to `keys`. With search on, letters and
/// digits go to the search field instead of moving the highlight.
pub fn add_list_keys(keys: &mut KeyBindings, search: bool) {
    if search {
        keys.bind(Action::Next, &["down"]);
        keys.bind(Action::Previous, &["up"]);
    } else {
        keys.bind(Action::Next, &["down", "d", "n", "2"]);
        keys.bind(Action::Previous, &["up", "u", "p", "8"]);
    }
    keys.bind(Action::NextPage, &["pagedown", "right"]);
    keys.bind(Action::PreviousPage, &["pageup", "left"]);
    keys.bind(Action::Open, &["right", "enter", "return"]);
    keys.bind(Action::Back, &["left", "escape", "enter", "return"]);
}

/// Why a submit did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlock {
    /// The search field had focus; the highlight moved to the rows instead.
    Redirected,
    /// A group or the back row is highlighted.
    NotSelectable(String),
}

/// Navigable, optionally searchable option list.
pub struct OptionList<T> {
    settings: ListSettings,
    navigator: ListNavigator<T>,
    search: InputBuffer,
}

impl<T> OptionList<T> {
    pub fn new(entries: Vec<ListEntry<T>>, settings: ListSettings) -> Self {
        let navigator = ListNavigator::new(entries, Some(settings.max_rows), settings.search);
        Self {
            settings,
            navigator,
            search: InputBuffer::new(),
        }
    }

    pub fn settings(&self) -> &ListSettings {
        &self.settings
    }

    pub fn navigator(&self) -> &ListNavigator<T> {
        &self.navigator
    }

    pub fn search_input(&self) -> &InputBuffer {
        &self.search
    }

    /// Highlight the first visible option whose value satisfies `pred`.
    /// Leaves the highlight alone when there is none.
    pub fn highlight_where(&mut self, pred: impl FnMut(&T) -> bool) {
        if let Some(index) = self.navigator.position_of(pred) {
            self.navigator.highlight(index);
        }
    }

    /// Value of the highlighted option, if it is an enabled leaf.
    pub fn selected_value(&self) -> Option<&T> {
        if self.navigator.is_back_selected() {
            return None;
        }
        self.navigator
            .selected_entry()
            .and_then(ListEntry::as_option)
            .filter(|option| !option.disabled)
            .map(|option| &option.value)
    }

    // =========================================================================
    // Key handling
    // =========================================================================

    pub fn handle_key(&mut self, key: &KeyPress, keys: &KeyBindings) -> KeyOutcome {
        let search_focused = self.navigator.is_search_focused();
        let on_group = self
            .navigator
            .selected_entry()
            .is_some_and(ListEntry::is_group);
        let is_escape = key.name.as_deref() == Some("escape");

        if keys.matches(Action::Open, key) && on_group && !search_focused {
            if self.navigator.is_back_selected() {
                self.navigator.select_next(true);
            } else if self.navigator.open_selected_group() {
                debug!(depth = self.navigator.parent_names().len(), "group opened");
            }
        } else if keys.matches(Action::Back, key)
            && (self.navigator.is_back_selected() || is_escape)
            && !search_focused
        {
            if self.navigator.close_group() {
                debug!(depth = self.navigator.parent_names().len(), "group closed");
            }
        } else if keys.matches(Action::Next, key) {
            self.navigator.select_next(true);
        } else if keys.matches(Action::Previous, key) {
            self.navigator.select_previous(true);
        } else if keys.matches(Action::NextPage, key) && !search_focused {
            self.navigator.select_next_page();
        } else if keys.matches(Action::PreviousPage, key) && !search_focused {
            self.navigator.select_previous_page();
        } else if let Some(edit) = edit_for(keys, key) {
            if self.settings.search {
                apply_edit(&mut self.search, edit);
                if edit.modifies_text() {
                    self.navigator.set_query(&self.search.value());
                }
            }
        } else {
            return KeyOutcome::Unhandled;
        }
        KeyOutcome::Handled
    }

    /// Decide whether a submit may go ahead.
    pub fn check_submit(&mut self, keys: &KeyBindings) -> Result<(), SubmitBlock> {
        if self.navigator.is_search_focused() {
            self.navigator.select_next(true);
            return Err(SubmitBlock::Redirected);
        }
        let on_group = self
            .navigator
            .selected_entry()
            .is_some_and(ListEntry::is_group);
        if self.navigator.is_back_selected() || on_group {
            let open = figures_by_keys(keys.keys(Action::Open)).join(", ");
            return Err(SubmitBlock::NotSelectable(format!(
                "No option selected. To select a group use {open}."
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Header followed by the search field. Puts the caret into the field.
    pub fn message(&self, header: String, cursor: &mut Cursor) -> String {
        let mut message = header;
        if self.settings.search {
            message.push(' ');
            message.push_str(&self.settings.search_label);
            message.push(' ');
            cursor.x = cursor_column(&message, &self.search.before_cursor());

            let input = self.search.value();
            if !input.is_empty() {
                if self.navigator.is_search_focused() {
                    message.push_str(&underline(&input));
                } else {
                    message.push_str(&dim(&input));
                }
            }
        }
        message
    }

    pub fn body(&self, indent: &str, keys: &KeyBindings) -> String {
        format!("{}{}", self.render_rows(indent), self.render_info(indent, keys))
    }

    fn render_rows(&self, indent: &str) -> String {
        let offset = self.navigator.offset();
        let visible = &self.navigator.rows()[offset..offset + self.navigator.height()];
        if visible.is_empty() {
            return format!("{indent}{}", dim("  No matches..."));
        }
        visible
            .iter()
            .enumerate()
            .map(|(i, row)| self.render_row(indent, row, self.navigator.focus() == Focus::Row(offset + i)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_row(&self, indent: &str, row: &ViewRow, selected: bool) -> String {
        let Some(entry) = self.navigator.entry(row) else {
            return String::new();
        };
        let is_group = entry.is_group();

        let level = if self.navigator.is_searching() {
            row.indent_level
        } else if self.navigator.has_parent() && !row.back {
            1
        } else {
            0
        };
        let mut line = format!("{indent}{}", " ".repeat(level));

        if !selected {
            line.push_str("  ");
        } else {
            let pointer = if row.back {
                &self.settings.back_pointer
            } else if is_group {
                self.settings
                    .group_pointer
                    .as_ref()
                    .unwrap_or(&self.settings.list_pointer)
            } else {
                &self.settings.list_pointer
            };
            line.push_str(pointer);
            line.push(' ');
        }

        let icon = if row.back {
            self.settings.group_open_icon.as_ref()
        } else if is_group {
            self.settings.group_icon.as_ref()
        } else {
            None
        };
        if let Some(icon) = icon {
            line.push_str(icon);
            line.push(' ');
        }

        let active = selected && !entry.is_disabled();
        let label = if row.back {
            let crumb = self.breadcrumb();
            if active { crumb } else { yellow(&crumb) }
        } else {
            let query = self.search.value();
            highlight(entry.name(), &query, if active { plain } else { dim }, bright_blue)
        };
        if row.back || is_group {
            line.push_str(&bold(&label));
        } else {
            line.push_str(&label);
        }
        line
    }

    fn render_info(&self, indent: &str, keys: &KeyBindings) -> String {
        if !self.settings.info {
            return String::new();
        }
        let mut actions = vec![("Next", Action::Next), ("Previous", Action::Previous)];
        if self.navigator.has_groups() {
            actions.push(("Open", Action::Open));
            actions.push(("Back", Action::Back));
        }
        actions.push(("Next Page", Action::NextPage));
        actions.push(("Previous Page", Action::PreviousPage));
        actions.push(("Submit", Action::Submit));

        let described: Vec<String> = actions
            .into_iter()
            .map(|(name, action)| format!("{name}: {}", bold(&figures_by_keys(keys.keys(action)).join(", "))))
            .collect();
        let selected = self.navigator.list_index() + 1;
        format!(
            "\n{indent}{}{}{}",
            bright_blue(INFO),
            bold(&format!(" {selected}/{} ", self.navigator.rows().len())),
            described.join(", ")
        )
    }

    /// Open group names joined by the separator, shortened to the first name,
    /// an ellipsis and the innermost names when there are too many.
    pub fn breadcrumb(&self) -> String {
        let names = self.navigator.parent_names();
        let max = self.settings.max_breadcrumb_items;
        if names.is_empty() || max == 0 {
            return String::new();
        }
        let crumbs: Vec<&str> = if names.len() > max {
            let mut crumbs = vec![names[0], ELLIPSIS];
            crumbs.extend_from_slice(&names[names.len() - (max - 1)..]);
            crumbs
        } else {
            names
        };
        crumbs.join(&self.settings.breadcrumb_separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::style::strip_ansi;
    use crate::usecase::text_input::add_input_keys;

    fn keys(search: bool) -> KeyBindings {
        let mut keys = KeyBindings::new();
        add_input_keys(&mut keys);
        add_list_keys(&mut keys, search);
        keys
    }

    fn flat(names: &[&'static str]) -> Vec<ListEntry<&'static str>> {
        names.iter().map(|n| ListEntry::value(*n)).collect()
    }

    fn grouped() -> Vec<ListEntry<&'static str>> {
        vec![
            ListEntry::value("x"),
            ListEntry::group("G", vec![ListEntry::value("g1"), ListEntry::value("g2")]),
        ]
    }

    fn press(list: &mut OptionList<&'static str>, keys: &KeyBindings, names: &[&str]) {
        for name in names {
            list.handle_key(&KeyPress::named(name), keys);
        }
    }

    fn lines(list: &OptionList<&'static str>, keys: &KeyBindings) -> Vec<String> {
        strip_ansi(&list.body("", keys))
            .lines()
            .map(str::to_string)
            .collect()
    }

    // =========================================================================
    // Tests: rendering
    // =========================================================================

    #[test]
    fn rows_show_pointer_on_highlight() {
        let list = OptionList::new(flat(&["a", "b"]), ListSettings::default());
        assert_eq!(lines(&list, &keys(false)), vec!["\u{276f} a", "  b"]);
    }

    #[test]
    fn group_rows_carry_icon() {
        let keys = keys(false);
        let mut list = OptionList::new(grouped(), ListSettings::default());
        press(&mut list, &keys, &["down"]);
        assert_eq!(lines(&list, &keys)[1], "\u{276f} \u{1f4c1} G");
    }

    #[test]
    fn open_group_renders_back_row_and_indented_children() {
        let keys = keys(false);
        let mut list = OptionList::new(grouped(), ListSettings::default());
        press(&mut list, &keys, &["down", "right"]);
        let rendered = lines(&list, &keys);
        assert_eq!(rendered[0], "\u{276e} \u{1f4c2} G");
        assert_eq!(rendered[1], "   g1");
        assert_eq!(rendered[2], "   g2");
    }

    #[test]
    fn empty_view_shows_placeholder() {
        let keys = keys(true);
        let settings = ListSettings {
            search: true,
            ..ListSettings::default()
        };
        let mut list = OptionList::new(flat(&["apple"]), settings);
        list.handle_key(&KeyPress::char('z'), &keys);
        assert_eq!(lines(&list, &keys), vec!["  No matches..."]);
    }

    #[test]
    fn info_line_omits_group_actions_for_flat_lists() {
        let keys = keys(false);
        let settings = ListSettings {
            info: true,
            ..ListSettings::default()
        };
        let list = OptionList::new(flat(&["a", "b"]), settings);
        let body = strip_ansi(&list.body("", &keys));
        assert!(body.contains(
            "\u{2139} 1/2 Next: \u{2193}, d, n, 2, Previous: \u{2191}, u, p, 8, Next Page:"
        ));
        assert!(!body.contains("Open:"));
        assert!(body.ends_with("Submit: \u{21b5}"));
    }

    #[test]
    fn info_line_lists_group_actions_when_groups_are_visible() {
        let keys = keys(false);
        let settings = ListSettings {
            info: true,
            ..ListSettings::default()
        };
        let list = OptionList::new(grouped(), settings);
        let body = strip_ansi(&list.body("", &keys));
        assert!(body.contains("Open: \u{2192}, \u{21b5}, Back: \u{2190}, \u{238b}, \u{21b5}"));
    }

    #[test]
    fn search_message_places_cursor_after_label() {
        let keys = keys(true);
        let settings = ListSettings {
            search: true,
            search_label: "Search:".to_string(),
            ..ListSettings::default()
        };
        let mut list = OptionList::new(flat(&["apple", "banana"]), settings);
        list.handle_key(&KeyPress::char('a'), &keys);
        list.handle_key(&KeyPress::char('n'), &keys);
        let mut cursor = Cursor::default();
        let message = list.message("Q".to_string(), &mut cursor);
        assert_eq!(strip_ansi(&message), "Q Search: an");
        assert_eq!(cursor.x, 12);
    }

    // =========================================================================
    // Tests: breadcrumb
    // =========================================================================

    fn nested() -> Vec<ListEntry<&'static str>> {
        vec![ListEntry::group(
            "A",
            vec![ListEntry::group(
                "B",
                vec![ListEntry::group("C", vec![ListEntry::value("x")])],
            )],
        )]
    }

    #[test]
    fn breadcrumb_joins_open_groups() {
        let keys = keys(false);
        let mut list = OptionList::new(nested(), ListSettings::default());
        press(&mut list, &keys, &["right", "down", "right"]);
        assert_eq!(list.breadcrumb(), format!("A {POINTER_SMALL} B"));
    }

    #[test]
    fn breadcrumb_truncates_long_paths() {
        let keys = keys(false);
        let settings = ListSettings {
            max_breadcrumb_items: 2,
            ..ListSettings::default()
        };
        let mut list = OptionList::new(nested(), settings);
        press(&mut list, &keys, &["right", "down", "right", "down", "right"]);
        assert_eq!(list.breadcrumb(), format!("A {POINTER_SMALL} .. {POINTER_SMALL} C"));
    }

    #[test]
    fn breadcrumb_disabled_with_zero_items() {
        let keys = keys(false);
        let settings = ListSettings {
            max_breadcrumb_items: 0,
            ..ListSettings::default()
        };
        let mut list = OptionList::new(nested(), settings);
        press(&mut list, &keys, &["right"]);
        assert_eq!(list.breadcrumb(), "");
    }

    // =========================================================================
    // Tests: key handling
    // =========================================================================

    #[test]
    fn letter_keys_navigate_without_search() {
        let keys = keys(false);
        let mut list = OptionList::new(flat(&["a", "b", "c"]), ListSettings::default());
        list.handle_key(&KeyPress::char('n'), &keys);
        assert_eq!(list.selected_value(), Some(&"b"));
        list.handle_key(&KeyPress::char('u'), &keys);
        list.handle_key(&KeyPress::char('u'), &keys);
        assert_eq!(list.selected_value(), Some(&"c"));
    }

    #[test]
    fn text_is_ignored_without_search() {
        let keys = keys(false);
        let mut list = OptionList::new(flat(&["a"]), ListSettings::default());
        assert_eq!(list.handle_key(&KeyPress::char('z'), &keys), KeyOutcome::Handled);
        assert!(list.search_input().is_empty());
    }

    #[test]
    fn back_row_open_moves_to_first_child() {
        let keys = keys(false);
        let mut list = OptionList::new(grouped(), ListSettings::default());
        press(&mut list, &keys, &["down", "right"]);
        assert!(list.navigator().is_back_selected());
        press(&mut list, &keys, &["right"]);
        assert_eq!(list.selected_value(), Some(&"g1"));
    }

    #[test]
    fn back_returns_to_opened_group() {
        let keys = keys(false);
        let mut list = OptionList::new(grouped(), ListSettings::default());
        press(&mut list, &keys, &["down", "right", "down", "up", "left"]);
        assert!(!list.navigator().has_parent());
        assert_eq!(list.navigator().focus(), Focus::Row(1));
    }

    #[test]
    fn escape_closes_group_from_any_row() {
        let keys = keys(false);
        let mut list = OptionList::new(grouped(), ListSettings::default());
        press(&mut list, &keys, &["down", "right", "down", "escape"]);
        assert!(!list.navigator().has_parent());
    }

    #[test]
    fn search_typing_filters_rows() {
        let keys = keys(true);
        let settings = ListSettings {
            search: true,
            ..ListSettings::default()
        };
        let mut list = OptionList::new(flat(&["apple", "banana", "cherry"]), settings);
        for c in "dan".chars() {
            list.handle_key(&KeyPress::char(c), &keys);
        }
        list.handle_key(&KeyPress::named("backspace"), &keys);
        list.handle_key(&KeyPress::named("backspace"), &keys);
        list.handle_key(&KeyPress::named("backspace"), &keys);
        list.handle_key(&KeyPress::char('r'), &keys);
        assert_eq!(list.navigator().rows().len(), 1);
        assert_eq!(list.selected_value(), Some(&"cherry"));
    }

    #[test]
    fn unbound_key_is_left_to_the_engine() {
        let keys = keys(false);
        let mut list = OptionList::new(flat(&["a"]), ListSettings::default());
        assert_eq!(list.handle_key(&KeyPress::named("return"), &keys), KeyOutcome::Unhandled);
    }

    // =========================================================================
    // Tests: submit guard
    // =========================================================================

    #[test]
    fn submit_on_group_is_rejected_with_open_keys() {
        let keys = keys(false);
        let mut list = OptionList::new(grouped(), ListSettings::default());
        press(&mut list, &keys, &["down"]);
        assert_eq!(
            list.check_submit(&keys),
            Err(SubmitBlock::NotSelectable(
                "No option selected. To select a group use \u{2192}, \u{21b5}.".to_string()
            ))
        );
    }

    #[test]
    fn submit_on_leaf_passes() {
        let keys = keys(false);
        let mut list = OptionList::new(grouped(), ListSettings::default());
        assert_eq!(list.check_submit(&keys), Ok(()));
    }

    #[test]
    fn submit_with_search_focused_moves_to_rows() {
        let keys = keys(true);
        let settings = ListSettings {
            search: true,
            ..ListSettings::default()
        };
        let mut list = OptionList::new(flat(&["apple", "apricot"]), settings);
        list.handle_key(&KeyPress::char('a'), &keys);
        press(&mut list, &keys, &["up"]);
        assert!(list.navigator().is_search_focused());
        assert_eq!(list.check_submit(&keys), Err(SubmitBlock::Redirected));
        assert!(!list.navigator().is_search_focused());
    }
}
