use crate::shared::error::PromptError;

/// Durable key-value store for suggestion history.
///
/// Values are JSON-encoded arrays, keyed by the prompt id.
pub trait HistoryStorePort: Send {
    fn get(&self, key: &str) -> Result<Option<String>, PromptError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PromptError>;
}
