use crate::shared::error::PromptError;

/// Terminal output port.
///
/// Concrete implementations (e.g., CrosstermTerminal) translate these calls
/// into escape sequences on the output stream.
pub trait TerminalPort: Send {
    /// Write already styled text verbatim.
    fn write(&mut self, text: &str) -> Result<(), PromptError>;

    /// Terminal width in columns, if known.
    fn columns(&self) -> Option<usize>;

    fn cursor_up(&mut self, lines: usize) -> Result<(), PromptError>;

    /// Move the cursor to a 0-based column on the current line.
    fn cursor_to_column(&mut self, column: usize) -> Result<(), PromptError>;

    /// Return to column 0 and erase everything from the cursor down.
    fn erase_down(&mut self) -> Result<(), PromptError>;

    fn show_cursor(&mut self) -> Result<(), PromptError>;

    fn hide_cursor(&mut self) -> Result<(), PromptError>;
}
