use crate::interface_adapter::port::{HostPort, Permission};

/// HostPort for a native process.
///
/// There is no permission sandbox, so every check is granted.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdHost;

impl HostPort for StdHost {
    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn query_permission(&self, _permission: &Permission) -> bool {
        true
    }

    fn request_permission(&mut self, _permission: &Permission) -> bool {
        true
    }
}
