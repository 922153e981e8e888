use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use crate::interface_adapter::port::TerminalPort;
use crate::shared::error::PromptError;

/// TerminalPort implementation emitting crossterm commands to a writer.
pub struct CrosstermTerminal<W: Write + Send = Stdout> {
    out: W,
}

impl CrosstermTerminal<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> CrosstermTerminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush(&mut self) -> Result<(), PromptError> {
        self.out.flush().map_err(PromptError::Terminal)
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

impl<W: Write + Send> TerminalPort for CrosstermTerminal<W> {
    fn write(&mut self, text: &str) -> Result<(), PromptError> {
        self.out.write_all(text.as_bytes()).map_err(PromptError::Terminal)?;
        self.flush()
    }

    fn columns(&self) -> Option<usize> {
        crossterm::terminal::size()
            .ok()
            .map(|(columns, _)| columns as usize)
            .filter(|columns| *columns > 0)
    }

    fn cursor_up(&mut self, lines: usize) -> Result<(), PromptError> {
        if lines == 0 {
            return Ok(());
        }
        queue!(self.out, MoveUp(to_u16(lines))).map_err(PromptError::Terminal)?;
        self.flush()
    }

    fn cursor_to_column(&mut self, column: usize) -> Result<(), PromptError> {
        queue!(self.out, MoveToColumn(to_u16(column))).map_err(PromptError::Terminal)?;
        self.flush()
    }

    fn erase_down(&mut self) -> Result<(), PromptError> {
        queue!(self.out, MoveToColumn(0), Clear(ClearType::FromCursorDown)).map_err(PromptError::Terminal)?;
        self.flush()
    }

    fn show_cursor(&mut self) -> Result<(), PromptError> {
        queue!(self.out, Show).map_err(PromptError::Terminal)?;
        self.flush()
    }

    fn hide_cursor(&mut self) -> Result<(), PromptError> {
        queue!(self.out, Hide).map_err(PromptError::Terminal)?;
        self.flush()
    }
}
