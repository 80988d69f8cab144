//! Store abstraction shared by the registry and export-file backends.

use crate::error::StoreError;

/// Registry path of PuTTY's saved sessions, relative to `HKEY_CURRENT_USER`.
pub const SESSIONS_KEY: &str = r"Software\SimonTatham\PuTTY\Sessions";

/// Per-session field holding the target host.
pub const HOST_NAME_FIELD: &str = "HostName";

/// A hierarchical, read-only key-value store.
pub trait SessionStore {
    /// Open the namespace at `path` for enumeration and field access.
    ///
    /// Returns [`StoreError::NotFound`] when the namespace does not exist and
    /// [`StoreError::Open`] for any other failure.
    fn open_namespace(&self, path: &str) -> Result<Box<dyn Namespace + '_>, StoreError>;
}

/// An open namespace handle.
///
/// Handles must be released with [`Namespace::close`]; dropping one without
/// closing it discards any release error.
pub trait Namespace {
    /// Path this handle was opened with.
    fn path(&self) -> &str;

    /// Names of all immediate child namespaces.
    fn list_children(&self) -> Result<Vec<String>, StoreError>;

    /// String value of the named field.
    fn read_field(&self, field: &str) -> Result<String, StoreError>;

    /// Release the handle.
    fn close(self: Box<Self>) -> Result<(), StoreError>;
}

/// Join a parent namespace path and a child name.
pub fn child_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}\\{}", parent.trim_end_matches('\\'), child)
    }
}

/// Split a namespace path into its non-empty components.
pub fn path_components(path: &str) -> impl Iterator<Item = &str> {
    path.split('\\').filter(|c| !c.is_empty())
}
