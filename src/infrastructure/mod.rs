pub mod host;
pub mod store;
pub mod terminal;
