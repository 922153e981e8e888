pub mod std_fs;
pub mod std_host;

pub use std_fs::StdFs;
pub use std_host::StdHost;
