//! Interactive terminal prompts: free text with suggestions, masked
//! secrets, yes/no confirmation and grouped, searchable selection lists.
//!
//! Every prompt is a builder. Configure it, then call `prompt()`:
//!
//! ```no_run
//! use cli_prompt::{Confirm, Input, PromptBuilder};
//!
//! let name = Input::new("Project name").default("demo".to_string()).prompt()?;
//! if Confirm::new(format!("Create {name}?")).default(true).prompt()? {
//!     println!("creating {name}");
//! }
//! # Ok::<(), cli_prompt::PromptError>(())
//! ```
//!
//! Prompts talk to the outside world only through the ports in
//! [`interface_adapter::port`], bundled as a [`PromptIo`]. Pass your own
//! bundle with [`PromptBuilder::io`] to drive a prompt without a terminal.

pub mod domain;
pub mod infrastructure;
pub mod interface_adapter;
pub mod prompt;
pub mod shared;
pub mod usecase;

#[cfg(test)]
mod test_support;

pub use domain::model::ListEntry;
pub use domain::primitive::{Action, KeyPress, Validation};
pub use prompt::{Confirm, Input, PromptBuilder, PromptOptions, Secret, Select};
pub use shared::error::PromptError;
pub use usecase::PromptIo;
pub use usecase::suggestions::FileFilter;
