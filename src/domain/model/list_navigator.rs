use crate::domain::matcher::{flatten_matches, match_entries};
use crate::domain::model::list_entry::{ListEntry, entry_at};

/// One row of the flattened, currently visible option view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    /// Index path of the entry in the option tree.
    pub path: Vec<usize>,
    /// Nesting depth recorded by search flattening (0 outside search).
    pub indent_level: usize,
    /// The synthetic row standing for the open group.
    pub back: bool,
}

impl ViewRow {
    fn entry(path: Vec<usize>, indent_level: usize) -> Self {
        Self {
            path,
            indent_level,
            back: false,
        }
    }
}

/// Which part of the list holds the highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The search input itself (list index -1).
    Search,
    Row(usize),
}

/// Navigation state over a flat or grouped option tree.
///
/// Invariants, restored after every mutation of the visible rows:
/// - `offset + height <= rows.len()`
/// - focus is `Search` or a row index `< rows.len()`
/// - when a group is open, `rows[0]` is its back row
#[derive(Debug, Clone)]
pub struct ListNavigator<T> {
    entries: Vec<ListEntry<T>>,
    parents: Vec<Vec<usize>>,
    rows: Vec<ViewRow>,
    focus: Focus,
    offset: usize,
    max_rows: Option<usize>,
    search: bool,
    query: String,
}

impl<T> ListNavigator<T> {
    /// Build a navigator showing the root level with the first enabled
    /// option highlighted. `max_rows` of `None` (or 0) shows every row.
    pub fn new(entries: Vec<ListEntry<T>>, max_rows: Option<usize>, search: bool) -> Self {
        let mut navigator = Self {
            entries,
            parents: Vec::new(),
            rows: Vec::new(),
            focus: Focus::Row(0),
            offset: 0,
            max_rows: max_rows.filter(|rows| *rows > 0),
            search,
            query: String::new(),
        };
        navigator.rematch();
        let first = navigator.first_enabled().unwrap_or(0);
        navigator.highlight(first);
        navigator
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn entries(&self) -> &[ListEntry<T>] {
        &self.entries
    }

    pub fn rows(&self) -> &[ViewRow] {
        &self.rows
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Highlighted position with the search field as -1.
    pub fn list_index(&self) -> isize {
        match self.focus {
            Focus::Search => -1,
            Focus::Row(i) => i as isize,
        }
    }

    pub fn is_search_focused(&self) -> bool {
        self.focus == Focus::Search
    }

    pub fn has_parent(&self) -> bool {
        !self.parents.is_empty()
    }

    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// Visible page height.
    pub fn height(&self) -> usize {
        let len = self.rows.len();
        len.min(self.max_rows.unwrap_or(len))
    }

    pub fn entry(&self, row: &ViewRow) -> Option<&ListEntry<T>> {
        entry_at(&self.entries, &row.path)
    }

    pub fn selected_row(&self) -> Option<&ViewRow> {
        match self.focus {
            Focus::Search => None,
            Focus::Row(i) => self.rows.get(i),
        }
    }

    pub fn selected_entry(&self) -> Option<&ListEntry<T>> {
        self.selected_row().and_then(|row| self.entry(row))
    }

    pub fn is_back_selected(&self) -> bool {
        self.selected_row().is_some_and(|row| row.back)
    }

    /// Names of the open groups, outermost first.
    pub fn parent_names(&self) -> Vec<&str> {
        self.parents
            .iter()
            .filter_map(|path| entry_at(&self.entries, path))
            .map(|entry| entry.name())
            .collect()
    }

    /// True if any visible row is a group (the back row included).
    pub fn has_groups(&self) -> bool {
        self.rows
            .iter()
            .any(|row| self.entry(row).is_some_and(ListEntry::is_group))
    }

    /// Row index of the first option whose value satisfies `pred`.
    pub fn position_of(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.rows.iter().position(|row| {
            !row.back
                && self
                    .entry(row)
                    .and_then(ListEntry::as_option)
                    .is_some_and(|option| pred(&option.value))
        })
    }

    fn first_enabled(&self) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| self.entry(row).is_some_and(|e| !e.is_disabled()))
    }

    fn selected_is_disabled(&self) -> bool {
        self.selected_entry().is_some_and(ListEntry::is_disabled)
    }

    // =========================================================================
    // View recomputation
    // =========================================================================

    /// Update the search term and recompute the visible rows.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_lowercase();
        self.rematch();
    }

    /// Recompute the visible rows from the open group (or the root),
    /// filtered by the current query.
    pub fn rematch(&mut self) {
        let base: Vec<usize> = self.parents.last().cloned().unwrap_or_default();
        let children: &[ListEntry<T>] = if base.is_empty() {
            &self.entries
        } else {
            entry_at(&self.entries, &base)
                .and_then(ListEntry::children)
                .unwrap_or(&[])
        };

        let rows: Vec<ViewRow> = if self.query.is_empty() {
            (0..children.len())
                .map(|i| {
                    let mut path = base.clone();
                    path.push(i);
                    ViewRow::entry(path, 0)
                })
                .collect()
        } else {
            flatten_matches(&match_entries(&self.query, children, &base))
                .into_iter()
                .map(|(path, indent)| ViewRow::entry(path, indent))
                .collect()
        };

        self.set_rows(rows);
    }

    fn set_rows(&mut self, mut rows: Vec<ViewRow>) {
        if let Some(parent) = self.parents.last() {
            rows.insert(
                0,
                ViewRow {
                    path: parent.clone(),
                    indent_level: 0,
                    back: true,
                },
            );
        }
        self.rows = rows;
        self.clamp();
    }

    fn clamp(&mut self) {
        let len = self.rows.len();
        self.focus = if len == 0 {
            Focus::Search
        } else {
            match self.focus {
                Focus::Search => Focus::Row(0),
                Focus::Row(i) => Focus::Row(i.min(len - 1)),
            }
        };
        let height = self.height();
        self.offset = self.offset.min(len - height);
        if let Focus::Row(i) = self.focus {
            if i < self.offset {
                self.offset = i;
            } else if i >= self.offset + height {
                self.offset = i + 1 - height;
            }
        }
    }

    /// Highlight row `index` and align the page so it is visible.
    pub fn highlight(&mut self, index: usize) {
        if self.rows.is_empty() {
            return;
        }
        let index = index.min(self.rows.len() - 1);
        self.focus = Focus::Row(index);
        self.offset = self.page_offset(index);
    }

    fn page_offset(&self, index: usize) -> usize {
        if index == 0 {
            return 0;
        }
        let height = self.height().max(1);
        ((index / height) * height).min(self.rows.len() - self.height())
    }

    // =========================================================================
    // Group navigation
    // =========================================================================

    /// Open the highlighted group. Returns false when the highlight is not
    /// an openable group (leaf, back row, search field).
    pub fn open_selected_group(&mut self) -> bool {
        let Some(row) = self.selected_row() else {
            return false;
        };
        if row.back || !self.entry(row).is_some_and(ListEntry::is_group) {
            return false;
        }
        let path = row.path.clone();
        self.parents.push(path);
        self.rematch();
        self.focus = Focus::Row(0);
        self.offset = 0;
        true
    }

    /// Close the innermost open group and highlight it in the parent view.
    pub fn close_group(&mut self) -> bool {
        let Some(closed) = self.parents.pop() else {
            return false;
        };
        self.rematch();
        let position = self
            .rows
            .iter()
            .position(|row| !row.back && row.path == closed);
        self.highlight(position.unwrap_or(0));
        true
    }

    // =========================================================================
    // Row navigation
    // =========================================================================

    fn ends_at_search(&self) -> bool {
        self.search && !self.query.is_empty()
    }

    /// Move one row down, skipping disabled rows. Past the end it wraps to
    /// the top (when `wrap`), or moves to the search field while searching.
    pub fn select_next(&mut self, wrap: bool) {
        if self.rows.len() < 2 && !self.is_search_focused() {
            return;
        }
        self.skip_disabled(wrap, Self::step_next);
    }

    /// Move one row up, mirror image of [`ListNavigator::select_next`].
    pub fn select_previous(&mut self, wrap: bool) {
        if self.rows.len() < 2 && !self.is_search_focused() {
            return;
        }
        self.skip_disabled(wrap, Self::step_previous);
    }

    /// Repeat `step` until an enabled row (or the search field) is reached.
    /// If every reachable row is disabled the starting position is restored.
    fn skip_disabled(&mut self, wrap: bool, step: fn(&mut Self, bool) -> bool) {
        let start = (self.focus, self.offset);
        for _ in 0..=self.rows.len() {
            if !step(self, wrap) {
                break;
            }
            if !self.selected_is_disabled() {
                return;
            }
        }
        if self.selected_is_disabled() {
            (self.focus, self.offset) = start;
        }
    }

    fn step_next(&mut self, wrap: bool) -> bool {
        let len = self.rows.len() as isize;
        let index = self.list_index();
        if index < len - 1 {
            let next = (index + 1) as usize;
            self.focus = Focus::Row(next);
            if next < self.offset {
                self.offset = next;
            } else if next >= self.offset + self.height() {
                self.offset += 1;
            }
            true
        } else if self.ends_at_search() && index == len - 1 {
            let moved = !self.is_search_focused();
            self.focus = Focus::Search;
            moved
        } else if wrap && len > 0 {
            self.focus = Focus::Row(0);
            self.offset = 0;
            true
        } else {
            false
        }
    }

    fn step_previous(&mut self, wrap: bool) -> bool {
        let len = self.rows.len();
        match self.focus {
            Focus::Row(i) if i > 0 => {
                self.focus = Focus::Row(i - 1);
                if i - 1 < self.offset {
                    self.offset -= 1;
                }
                true
            }
            Focus::Row(0) if self.ends_at_search() => {
                self.focus = Focus::Search;
                true
            }
            _ if wrap && len > 0 => {
                self.focus = Focus::Row(len - 1);
                self.offset = len - self.height();
                true
            }
            _ => false,
        }
    }

    /// Jump one page down; lands on the nearest enabled row without wrapping.
    pub fn select_next_page(&mut self) {
        let Focus::Row(index) = self.focus else {
            return;
        };
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len();
        let height = self.height();
        if self.offset + height + height < len {
            self.focus = Focus::Row((index + height).min(len - 1));
            self.offset += height;
        } else if self.offset + height < len {
            let offset = len - height;
            self.focus = Focus::Row((index + offset - self.offset).min(len - 1));
            self.offset = offset;
        } else {
            self.focus = Focus::Row(len - 1);
        }
        if self.selected_is_disabled() {
            self.select_next(false);
        }
        if self.selected_is_disabled() {
            self.select_previous(false);
        }
    }

    /// Jump one page up; lands on the nearest enabled row without wrapping.
    pub fn select_previous_page(&mut self) {
        let Focus::Row(index) = self.focus else {
            return;
        };
        if self.rows.is_empty() {
            return;
        }
        let height = self.height();
        if self.offset >= height {
            self.focus = Focus::Row(index.saturating_sub(height));
            self.offset -= height;
        } else if self.offset > 0 {
            self.focus = Focus::Row(index.saturating_sub(self.offset));
            self.offset = 0;
        } else {
            self.focus = Focus::Row(0);
        }
        if self.selected_is_disabled() {
            self.select_previous(false);
        }
        if self.selected_is_disabled() {
            self.select_next(false);
        }
    }
}
