pub mod list;
pub mod prompt_engine;
pub mod prompt_io;
pub mod suggestions;
pub mod text_input;

pub use prompt_engine::{KeyOutcome, PromptBehavior, PromptCore, PromptEngine, PromptSettings};
pub use prompt_io::PromptIo;
