use crate::domain::model::InputBuffer;
use crate::domain::primitive::{Action, KeyBindings, KeyPress};
use crate::shared::style::{StyleFn, display_width};

/// One editing operation on a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdit {
    MoveLeft,
    MoveRight,
    DeleteLeft,
    DeleteRight,
    Insert(char),
}

impl InputEdit {
    /// True for edits that change the text (as opposed to the cursor).
    pub fn modifies_text(self) -> bool {
        !matches!(self, InputEdit::MoveLeft | InputEdit::MoveRight)
    }
}

/// Add the text editing defaults to `keys`.
pub fn add_input_keys(keys: &mut KeyBindings) {
    keys.bind(Action::MoveCursorLeft, &["left"]);
    keys.bind(Action::MoveCursorRight, &["right"]);
    keys.bind(Action::DeleteCharLeft, &["backspace"]);
    keys.bind(Action::DeleteCharRight, &["delete"]);
}

/// Map a key to a text edit: bound editing actions first, then any printable
/// character without ctrl/meta.
pub fn edit_for(keys: &KeyBindings, key: &KeyPress) -> Option<InputEdit> {
    if keys.matches(Action::MoveCursorLeft, key) {
        Some(InputEdit::MoveLeft)
    } else if keys.matches(Action::MoveCursorRight, key) {
        Some(InputEdit::MoveRight)
    } else if keys.matches(Action::DeleteCharRight, key) {
        Some(InputEdit::DeleteRight)
    } else if keys.matches(Action::DeleteCharLeft, key) {
        Some(InputEdit::DeleteLeft)
    } else {
        key.printable().map(InputEdit::Insert)
    }
}

pub fn apply_edit(buffer: &mut InputBuffer, edit: InputEdit) {
    match edit {
        InputEdit::MoveLeft => buffer.move_left(),
        InputEdit::MoveRight => buffer.move_right(),
        InputEdit::DeleteLeft => buffer.delete_left(),
        InputEdit::DeleteRight => buffer.delete_right(),
        InputEdit::Insert(c) => {
            let mut utf8 = [0u8; 4];
            buffer.insert(c.encode_utf8(&mut utf8));
        }
    }
}

/// Caret column (0-based) for an input rendered right after `prefix`.
pub fn cursor_column(prefix: &str, before_cursor: &str) -> usize {
    display_width(prefix) + display_width(before_cursor)
}

fn find_ignore_case(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&start| {
        haystack[start..start + needle.len()]
            .iter()
            .zip(needle)
            .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
    })
}

/// Style the first case-insensitive occurrence of `query` in `value` with
/// `matched` and the rest with `unmatched`. Without an occurrence `value`
/// is returned untouched.
pub fn highlight(value: &str, query: &str, unmatched: StyleFn, matched: StyleFn) -> String {
    let chars: Vec<char> = value.chars().collect();
    let needle: Vec<char> = query.chars().collect();
    let Some(start) = find_ignore_case(&chars, &needle) else {
        return value.to_string();
    };
    let end = start + needle.len();

    let style = |span: &[char], f: StyleFn| -> String {
        if span.is_empty() {
            String::new()
        } else {
            f(&span.iter().collect::<String>())
        }
    };

    format!(
        "{}{}{}",
        style(&chars[..start], unmatched),
        style(&chars[start..end], matched),
        style(&chars[end..], unmatched)
    )
}
