/// A decoded key event, independent of the terminal backend.
///
/// `name` follows the conventional key names used by key bindings
/// (`"up"`, `"pagedown"`, `"return"`, `"a"`, ...). `sequence` holds the raw
/// bytes the key would produce, so bindings can also match on them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub name: Option<String>,
    pub sequence: Option<String>,
    pub ch: Option<char>,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyPress {
    /// A non-printable key identified only by name (arrows, enter, ...).
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// A printable character as typed.
    pub fn char(c: char) -> Self {
        let name = if c == ' ' {
            Some("space".to_string())
        } else if c.is_ascii_alphanumeric() {
            Some(c.to_ascii_lowercase().to_string())
        } else {
            None
        };
        Self {
            name,
            sequence: Some(c.to_string()),
            ch: Some(c),
            shift: c.is_uppercase(),
            ..Self::default()
        }
    }

    /// Ctrl + letter. The sequence is the matching C0 control byte.
    pub fn ctrl(c: char) -> Self {
        let lower = c.to_ascii_lowercase();
        let sequence = if lower.is_ascii_lowercase() {
            Some(((lower as u8 - b'a' + 1) as char).to_string())
        } else {
            None
        };
        Self {
            name: Some(lower.to_string()),
            sequence,
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn with_sequence(mut self, sequence: &str) -> Self {
        self.sequence = Some(sequence.to_string());
        self
    }

    pub fn is_ctrl_c(&self) -> bool {
        self.ctrl && self.name.as_deref() == Some("c")
    }

    /// The character to insert into a text buffer, if this key carries one
    /// and no ctrl/meta modifier is held.
    pub fn printable(&self) -> Option<char> {
        if self.ctrl || self.meta {
            return None;
        }
        self.ch.filter(|c| !c.is_control())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_lowercase_letter_has_name_and_no_shift() {
        let key = KeyPress::char('d');
        assert_eq!(key.name.as_deref(), Some("d"));
        assert_eq!(key.sequence.as_deref(), Some("d"));
        assert!(!key.shift);
    }

    #[test]
    fn char_uppercase_letter_sets_shift_and_lowercase_name() {
        let key = KeyPress::char('Y');
        assert_eq!(key.name.as_deref(), Some("y"));
        assert!(key.shift);
        assert_eq!(key.printable(), Some('Y'));
    }

    #[test]
    fn char_space_is_named_space() {
        assert_eq!(KeyPress::char(' ').name.as_deref(), Some("space"));
    }

    #[test]
    fn char_punctuation_has_no_name() {
        let key = KeyPress::char('/');
        assert!(key.name.is_none());
        assert_eq!(key.printable(), Some('/'));
    }

    #[test]
    fn ctrl_c_is_detected() {
        let key = KeyPress::ctrl('c');
        assert!(key.is_ctrl_c());
        assert_eq!(key.sequence.as_deref(), Some("\u{3}"));
        assert_eq!(key.printable(), None);
    }

    #[test]
    fn named_key_is_not_printable() {
        assert_eq!(KeyPress::named("down").printable(), None);
    }

    #[test]
    fn meta_char_is_not_printable() {
        let key = KeyPress {
            meta: true,
            ..KeyPress::char('x')
        };
        assert_eq!(key.printable(), None);
    }
}
