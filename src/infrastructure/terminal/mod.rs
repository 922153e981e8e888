pub mod crossterm_key_reader;
pub mod crossterm_terminal;

pub use crossterm_key_reader::CrosstermKeyReader;
pub use crossterm_terminal::CrosstermTerminal;
