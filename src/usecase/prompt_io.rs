use crate::interface_adapter::port::{FsPort, HistoryStorePort, HostPort, KeyReaderPort, TerminalPort};

/// Every external collaborator a prompt talks to, bundled so a prompt can be
/// driven by real terminal adapters or by test fakes.
pub struct PromptIo {
    pub reader: Box<dyn KeyReaderPort>,
    pub terminal: Box<dyn TerminalPort>,
    pub host: Box<dyn HostPort>,
    pub fs: Box<dyn FsPort>,
    /// Suggestion history; prompts without an id never touch it.
    pub history: Option<Box<dyn HistoryStorePort>>,
}

impl PromptIo {
    pub fn new(
        reader: Box<dyn KeyReaderPort>,
        terminal: Box<dyn TerminalPort>,
        host: Box<dyn HostPort>,
        fs: Box<dyn FsPort>,
    ) -> Self {
        Self {
            reader,
            terminal,
            host,
            fs,
            history: None,
        }
    }

    pub fn with_history(mut self, store: Box<dyn HistoryStorePort>) -> Self {
        self.history = Some(store);
        self
    }
}
