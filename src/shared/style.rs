use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

/// A styling function applied to a span of prompt text.
pub type StyleFn = fn(&str) -> String;

pub fn bold(text: &str) -> String {
    text.bold().to_string()
}

pub fn dim(text: &str) -> String {
    text.dim().to_string()
}

pub fn italic(text: &str) -> String {
    text.italic().to_string()
}

pub fn underline(text: &str) -> String {
    text.underlined().to_string()
}

pub fn red(text: &str) -> String {
    text.red().to_string()
}

pub fn green(text: &str) -> String {
    text.green().to_string()
}

pub fn yellow(text: &str) -> String {
    text.yellow().to_string()
}

pub fn bright_blue(text: &str) -> String {
    text.blue().to_string()
}

/// Identity style, used where a span must stay unstyled.
pub fn plain(text: &str) -> String {
    text.to_string()
}

/// Collects printable characters while the VTE parser swallows escape sequences.
struct PlainText(String);

impl vte::Perform for PlainText {
    fn print(&mut self, c: char) {
        self.0.push(c);
    }

    fn execute(&mut self, byte: u8) {
        if byte == b'\n' || byte == b'\t' {
            self.0.push(byte as char);
        }
    }
}

/// Remove every ANSI escape sequence from `text`.
pub fn strip_ansi(text: &str) -> String {
    let mut parser = vte::Parser::new();
    let mut plain = PlainText(String::with_capacity(text.len()));
    parser.advance(&mut plain, text.as_bytes());
    plain.0
}

/// Display width in terminal cells of `text` once styling is removed.
pub fn display_width(text: &str) -> usize {
    strip_ansi(text).width()
}
