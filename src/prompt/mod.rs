pub mod builder;
pub mod confirm;
pub mod input;
pub mod options;
pub mod secret;
pub mod select;

pub use builder::{CommonOptions, PromptBuilder};
pub use confirm::Confirm;
pub use input::Input;
pub use options::PromptOptions;
pub use secret::Secret;
pub use select::Select;
