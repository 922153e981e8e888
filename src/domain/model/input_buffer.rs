/// Editable text with an insertion cursor.
///
/// The cursor counts characters (code points), not bytes, and always stays
/// within `0..=len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    chars: Vec<char>,
    index: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Text left of the cursor.
    pub fn before_cursor(&self) -> String {
        self.chars[..self.index].iter().collect()
    }

    /// Replace the whole value and put the cursor at the end.
    pub fn set(&mut self, value: &str) {
        self.chars = value.chars().collect();
        self.index = self.chars.len();
    }

    /// Splice `text` in at the cursor and advance past it.
    pub fn insert(&mut self, text: &str) {
        let inserted: Vec<char> = text.chars().collect();
        let count = inserted.len();
        self.chars.splice(self.index..self.index, inserted);
        self.index += count;
    }

    pub fn move_left(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.index < self.chars.len() {
            self.index += 1;
        }
    }

    /// Backspace: remove the character before the cursor.
    pub fn delete_left(&mut self) {
        if self.index > 0 {
            self.move_left();
            self.delete_right();
        }
    }

    /// Delete: remove the character under the cursor, cursor stays put.
    pub fn delete_right(&mut self) {
        if self.index < self.chars.len() {
            self.chars.remove(self.index);
        }
    }
}
