pub mod fs_port;
pub mod history_port;
pub mod host_port;
pub mod key_reader_port;
pub mod terminal_port;

pub use fs_port::FsPort;
pub use history_port::HistoryStorePort;
pub use host_port::{HostPort, Permission};
pub use key_reader_port::KeyReaderPort;
pub use terminal_port::TerminalPort;
