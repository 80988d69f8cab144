//! In-memory namespace tree.
//!
//! Backs the regedit export parser and doubles as a store for tests. Names
//! are matched case-insensitively like the registry, but keep the spelling
//! they were first inserted with.

use super::error::StoreError;
use super::types::{Namespace, SessionStore, path_components};

/// A field value as found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A string value (`REG_SZ`).
    String(String),
    /// Any non-string value; the payload names its type (`dword`, `hex(7)`, ...).
    Other(String),
}

/// One node of the tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryNode {
    fields: Vec<(String, FieldValue)>,
    children: Vec<(String, MemoryNode)>,
}

impl MemoryNode {
    fn child(&self, name: &str) -> Option<&MemoryNode> {
        self.children
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, node)| node)
    }

    fn child_mut_or_insert(&mut self, name: &str) -> &mut MemoryNode {
        let idx = match self
            .children
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some(idx) => idx,
            None => {
                self.children.push((name.to_string(), MemoryNode::default()));
                self.children.len() - 1
            }
        };
        &mut self.children[idx].1
    }

    /// Set a field, replacing any existing field of the same name.
    pub fn set_field(&mut self, name: &str, value: FieldValue) {
        match self
            .fields
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Remove a field if present.
    pub fn remove_field(&mut self, name: &str) {
        self.fields.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

/// A store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    root: MemoryNode,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the namespace at `path`, creating it and any missing parents.
    pub fn namespace_mut(&mut self, path: &str) -> &mut MemoryNode {
        let mut node = &mut self.root;
        for component in path_components(path) {
            node = node.child_mut_or_insert(component);
        }
        node
    }

    /// Set a string field, creating the namespace if needed.
    pub fn set_string(&mut self, path: &str, field: &str, value: &str) {
        self.namespace_mut(path)
            .set_field(field, FieldValue::String(value.to_string()));
    }

    fn lookup(&self, path: &str) -> Option<&MemoryNode> {
        let mut node = &self.root;
        for component in path_components(path) {
            node = node.child(component)?;
        }
        Some(node)
    }
}

impl SessionStore for MemoryStore {
    fn open_namespace(&self, path: &str) -> Result<Box<dyn Namespace + '_>, StoreError> {
        match self.lookup(path) {
            Some(node) => {
                log::trace!("opened in-memory namespace '{}'", path);
                Ok(Box::new(MemoryNamespace {
                    path: path.to_string(),
                    node,
                }))
            }
            None => Err(StoreError::NotFound {
                path: path.to_string(),
            }),
        }
    }
}

struct MemoryNamespace<'a> {
    path: String,
    node: &'a MemoryNode,
}

impl Namespace for MemoryNamespace<'_> {
    fn path(&self) -> &str {
        &self.path
    }

    fn list_children(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.node.children.iter().map(|(n, _)| n.clone()).collect())
    }

    fn read_field(&self, field: &str) -> Result<String, StoreError> {
        match self.node.field(field) {
            Some(FieldValue::String(value)) => Ok(value.clone()),
            Some(FieldValue::Other(kind)) => Err(StoreError::ReadField {
                path: self.path.clone(),
                field: field.to_string(),
                reason: format!("value has type {kind}, expected a string"),
            }),
            None => Err(StoreError::FieldNotFound {
                path: self.path.clone(),
                field: field.to_string(),
            }),
        }
    }

    fn close(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HOST_NAME_FIELD, SESSIONS_KEY, child_path};

    fn sample_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set_string(&child_path(SESSIONS_KEY, "web"), HOST_NAME_FIELD, "web.example.com");
        store.set_string(&child_path(SESSIONS_KEY, "db"), HOST_NAME_FIELD, "10.0.0.9");
        store
    }

    #[test]
    fn test_list_children_in_insertion_order() {
        let store = sample_store();
        let ns = store.open_namespace(SESSIONS_KEY).unwrap();
        assert_eq!(ns.list_children().unwrap(), vec!["web", "db"]);
        ns.close().unwrap();
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let store = sample_store();
        let ns = store
            .open_namespace(r"software\simontatham\putty\sessions\WEB")
            .unwrap();
        assert_eq!(ns.read_field("hostname").unwrap(), "web.example.com");
    }

    #[test]
    fn test_missing_namespace() {
        let store = sample_store();
        let err = store.open_namespace(r"Software\Nope").err().unwrap();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_and_non_string_fields() {
        let mut store = sample_store();
        let path = child_path(SESSIONS_KEY, "db");
        store
            .namespace_mut(&path)
            .set_field("PortNumber", FieldValue::Other("dword".to_string()));

        let ns = store.open_namespace(&path).unwrap();
        assert!(ns.read_field("UserName").unwrap_err().is_field_not_found());
        assert!(matches!(
            ns.read_field("PortNumber"),
            Err(StoreError::ReadField { .. })
        ));
    }

    #[test]
    fn test_set_field_replaces_existing() {
        let mut store = sample_store();
        let path = child_path(SESSIONS_KEY, "web");
        store.set_string(&path, "hostname", "other.example.com");
        let ns = store.open_namespace(&path).unwrap();
        assert_eq!(ns.read_field(HOST_NAME_FIELD).unwrap(), "other.example.com");
        ns.close().unwrap();

        store.namespace_mut(&path).remove_field(HOST_NAME_FIELD);
        let ns = store.open_namespace(&path).unwrap();
        assert!(ns.read_field(HOST_NAME_FIELD).unwrap_err().is_field_not_found());
    }
}
