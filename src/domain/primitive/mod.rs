pub mod cursor;
pub mod figures;
pub mod key_bindings;
pub mod key_press;
pub mod validation;

pub use cursor::Cursor;
pub use key_bindings::{Action, KeyBindings};
pub use key_press::KeyPress;
pub use validation::{GENERIC_INVALID_MESSAGE, Validation};
