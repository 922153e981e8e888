pub const POINTER: &str = "\u{276f}";
pub const POINTER_SMALL: &str = "\u{203a}";
pub const POINTER_LEFT: &str = "\u{276e}";
pub const CROSS: &str = "\u{2718}";
pub const INFO: &str = "\u{2139}";
pub const SEARCH: &str = "\u{1f50e}";
pub const FOLDER: &str = "\u{1f4c1}";
pub const FOLDER_OPEN: &str = "\u{1f4c2}";
pub const ELLIPSIS: &str = "..";

const ARROW_UP: &str = "\u{2191}";
const ARROW_DOWN: &str = "\u{2193}";
const ARROW_LEFT: &str = "\u{2190}";
const ARROW_RIGHT: &str = "\u{2192}";
const PAGE_UP: &str = "\u{21de}";
const PAGE_DOWN: &str = "\u{21df}";
const TAB_RIGHT: &str = "\u{21e5}";
const ESCAPE: &str = "\u{238b}";
const ENTER: &str = "\u{21b5}";
const BACKSPACE: &str = "\u{232b}";
const DELETE: &str = "\u{2326}";

fn figure_for_key(key: &str) -> &str {
    match key {
        "up" => ARROW_UP,
        "down" => ARROW_DOWN,
        "left" => ARROW_LEFT,
        "right" => ARROW_RIGHT,
        "pageup" => PAGE_UP,
        "pagedown" => PAGE_DOWN,
        "tab" => TAB_RIGHT,
        "escape" => ESCAPE,
        "enter" | "return" => ENTER,
        "backspace" => BACKSPACE,
        "delete" => DELETE,
        other => other,
    }
}

/// Map bound key names to display glyphs, dropping duplicates
/// (`enter` and `return` share one glyph).
pub fn figures_by_keys(keys: &[String]) -> Vec<String> {
    let mut figures: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        let figure = figure_for_key(key);
        if !figures.iter().any(|f| f == figure) {
            figures.push(figure.to_string());
        }
    }
    figures
}
