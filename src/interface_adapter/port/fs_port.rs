use std::io;
use std::path::Path;

/// Read-only filesystem access used by file suggestions.
pub trait FsPort: Send {
    fn is_directory(&self, path: &Path) -> bool;

    /// File names (not paths) of the entries in `path`.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;
}
