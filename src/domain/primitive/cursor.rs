/// Caret position inside the rendered prompt frame.
///
/// `y` is the rendered line (0 = header line); `x` is the column in
/// terminal cells. Recomputed on every render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
}
