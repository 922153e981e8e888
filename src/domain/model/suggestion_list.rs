/// Cursor over the transient suggestion candidates.
///
/// `index` of `None` means no suggestion is highlighted. Navigation never
/// wraps; reaching either end stops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionList {
    items: Vec<String>,
    index: Option<usize>,
    offset: usize,
    max_rows: Option<usize>,
}

impl SuggestionList {
    pub fn new(max_rows: Option<usize>) -> Self {
        Self {
            max_rows: max_rows.filter(|rows| *rows > 0),
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn selected(&self) -> Option<&str> {
        self.index
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    pub fn height(&self) -> usize {
        let len = self.items.len();
        len.min(self.max_rows.unwrap_or(len))
    }

    /// Rows currently in the visible window.
    pub fn visible(&self) -> &[String] {
        &self.items[self.offset..self.offset + self.height()]
    }

    /// Swap in freshly matched candidates and clamp the cursor.
    ///
    /// With `allow_none` (blank input) the highlight may stay unset;
    /// otherwise it is pulled onto the first candidate.
    pub fn replace(&mut self, items: Vec<String>, allow_none: bool) {
        self.items = items;
        let last = self.items.len().checked_sub(1);
        self.index = match (self.index, last) {
            (_, None) => None,
            (None, Some(_)) if allow_none => None,
            (None, Some(_)) => Some(0),
            (Some(i), Some(last)) => Some(i.min(last)),
        };
        self.offset = self.offset.min(self.items.len() - self.height());
    }

    /// Drop the highlight and scroll back to the top.
    pub fn reset(&mut self) {
        self.index = None;
        self.offset = 0;
    }

    /// Highlight the first candidate and scroll back to the top.
    pub fn restart(&mut self) {
        self.index = (!self.items.is_empty()).then_some(0);
        self.offset = 0;
    }

    pub fn select_next(&mut self) {
        let next = self.index.map_or(0, |i| i + 1);
        if next >= self.items.len() {
            return;
        }
        self.index = Some(next);
        if next >= self.offset + self.height() {
            self.offset += 1;
        }
    }

    pub fn select_previous(&mut self) {
        let Some(i) = self.index else {
            return;
        };
        if i == 0 {
            self.index = None;
            return;
        }
        self.index = Some(i - 1);
        if i - 1 < self.offset {
            self.offset -= 1;
        }
    }

    pub fn select_next_page(&mut self) {
        let len = self.items.len();
        let height = self.height();
        let index = self.index.unwrap_or(0);
        if self.offset + height + height < len {
            self.index = Some(index + height);
            self.offset += height;
        } else if self.offset + height < len {
            let offset = len - height;
            self.index = Some((index + offset - self.offset).min(len - 1));
            self.offset = offset;
        }
    }

    pub fn select_previous_page(&mut self) {
        let height = self.height();
        let Some(index) = self.index else {
            return;
        };
        if self.offset >= height && height > 0 {
            self.index = Some(index.saturating_sub(height));
            self.offset -= height;
        } else if self.offset > 0 {
            self.index = Some(index.saturating_sub(self.offset));
            self.offset = 0;
        }
    }
}
