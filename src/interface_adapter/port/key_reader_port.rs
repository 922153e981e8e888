use crate::domain::primitive::KeyPress;
use crate::shared::error::PromptError;

/// Raw keyboard input port.
///
/// Concrete implementations (e.g., CrosstermKeyReader) decode terminal
/// input into key presses.
pub trait KeyReaderPort: Send {
    /// Whether the input side is attached to a terminal.
    fn is_terminal(&self) -> bool;

    /// Toggle raw mode. `cbreak` keeps signal generation enabled where the
    /// platform distinguishes the two.
    fn set_raw(&mut self, enabled: bool, cbreak: bool) -> Result<(), PromptError>;

    /// Block until at least one input chunk arrives and return every key
    /// press decoded from it, in arrival order. An empty batch is valid.
    fn read_keys(&mut self) -> Result<Vec<KeyPress>, PromptError>;
}
