use std::io::{self, IsTerminal};
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::trace;

use crate::domain::primitive::KeyPress;
use crate::interface_adapter::port::KeyReaderPort;
use crate::shared::error::PromptError;

/// KeyReaderPort implementation on top of crossterm's event stream.
///
/// crossterm has a single raw mode, so the `cbreak` flag only shows up in
/// traces. Ctrl+C arrives as a key event either way and is handled by the
/// prompt engine.
pub struct CrosstermKeyReader {
    raw: bool,
}

impl CrosstermKeyReader {
    pub fn new() -> Self {
        Self { raw: false }
    }
}

impl Default for CrosstermKeyReader {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyReaderPort for CrosstermKeyReader {
    fn is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn set_raw(&mut self, enabled: bool, cbreak: bool) -> Result<(), PromptError> {
        if enabled == self.raw {
            return Ok(());
        }
        trace!(enabled, cbreak, "raw mode");
        if enabled {
            enable_raw_mode().map_err(PromptError::Terminal)?;
            execute!(io::stdout(), EnableBracketedPaste).map_err(PromptError::Terminal)?;
        } else {
            execute!(io::stdout(), DisableBracketedPaste).map_err(PromptError::Terminal)?;
            disable_raw_mode().map_err(PromptError::Terminal)?;
        }
        self.raw = enabled;
        Ok(())
    }

    fn read_keys(&mut self) -> Result<Vec<KeyPress>, PromptError> {
        let mut keys = decode_event(event::read().map_err(PromptError::Terminal)?);
        // Drain what is already queued so one input chunk stays one batch.
        while event::poll(Duration::ZERO).map_err(PromptError::Terminal)? {
            keys.extend(decode_event(event::read().map_err(PromptError::Terminal)?));
        }
        Ok(keys)
    }
}

/// Key presses carried by one terminal event. Pasted text becomes one
/// character press per char, in order.
pub fn decode_event(event: Event) -> Vec<KeyPress> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => decode_key(key).into_iter().collect(),
        Event::Paste(text) => text.chars().map(KeyPress::char).collect(),
        _ => Vec::new(),
    }
}

/// Map a crossterm key event to a key press with the conventional name and
/// the byte sequence a terminal would send for it.
pub fn decode_key(key: KeyEvent) -> Option<KeyPress> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let meta = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    let named = |name: &str, sequence: &str| KeyPress::named(name).with_sequence(sequence);
    let mut press = match key.code {
        KeyCode::Char(c) if ctrl => KeyPress::ctrl(c),
        KeyCode::Char(c) => KeyPress::char(c),
        KeyCode::Enter => named("return", "\r"),
        KeyCode::Backspace => named("backspace", "\x7f"),
        KeyCode::Tab => named("tab", "\t"),
        KeyCode::BackTab => named("tab", "\x1b[Z"),
        KeyCode::Esc => named("escape", "\x1b"),
        KeyCode::Up => named("up", "\x1b[A"),
        KeyCode::Down => named("down", "\x1b[B"),
        KeyCode::Right => named("right", "\x1b[C"),
        KeyCode::Left => named("left", "\x1b[D"),
        KeyCode::Home => named("home", "\x1b[H"),
        KeyCode::End => named("end", "\x1b[F"),
        KeyCode::PageUp => named("pageup", "\x1b[5~"),
        KeyCode::PageDown => named("pagedown", "\x1b[6~"),
        KeyCode::Delete => named("delete", "\x1b[3~"),
        KeyCode::Insert => named("insert", "\x1b[2~"),
        KeyCode::F(n) => KeyPress::named(&format!("f{n}")),
        _ => return None,
    };
    press.meta |= meta;
    press.shift |= shift || key.code == KeyCode::BackTab;
    Some(press)
}

// =============================================================================
// Tests
// =============================================================================
