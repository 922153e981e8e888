pub mod input_buffer;
pub mod list_entry;
pub mod list_navigator;
pub mod suggestion_list;

pub use input_buffer::InputBuffer;
pub use list_entry::{ListEntry, ListGroup, ListOption, Separator};
pub use list_navigator::{Focus, ListNavigator, ViewRow};
pub use suggestion_list::SuggestionList;
