/// A capability the prompt may need from the host process.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Filesystem read access, required for file suggestions.
    Read,
    /// Access to a single environment variable.
    Env(String),
}

/// Host process port: exit, environment and permission checks.
pub trait HostPort: Send {
    /// Terminate the process. Implementations for tests record the code and
    /// return instead.
    fn exit(&mut self, code: i32);

    fn env_var(&self, name: &str) -> Option<String>;

    /// Check a permission without prompting.
    fn query_permission(&self, permission: &Permission) -> bool;

    /// Ask for a permission, possibly interactively.
    fn request_permission(&mut self, permission: &Permission) -> bool;
}
