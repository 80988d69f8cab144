//! Live Windows registry backend.

use super::error::StoreError;
use super::types::{Namespace, SessionStore};
use std::io;
use winreg::RegKey;
use winreg::enums::{HKEY_CURRENT_USER, KEY_ENUMERATE_SUB_KEYS, KEY_QUERY_VALUE};

/// Read-only view of `HKEY_CURRENT_USER`.
pub struct RegistryStore {
    hive: RegKey,
}

impl RegistryStore {
    pub fn current_user() -> Self {
        Self {
            hive: RegKey::predef(HKEY_CURRENT_USER),
        }
    }
}

impl SessionStore for RegistryStore {
    fn open_namespace(&self, path: &str) -> Result<Box<dyn Namespace + '_>, StoreError> {
        match self
            .hive
            .open_subkey_with_flags(path, KEY_QUERY_VALUE | KEY_ENUMERATE_SUB_KEYS)
        {
            Ok(key) => {
                log::trace!("opened registry key '{}'", path);
                Ok(Box::new(RegistryNamespace {
                    path: path.to_string(),
                    key,
                }))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound {
                path: path.to_string(),
            }),
            Err(source) => Err(StoreError::Open {
                path: path.to_string(),
                source,
            }),
        }
    }
}

struct RegistryNamespace {
    path: String,
    key: RegKey,
}

impl Namespace for RegistryNamespace {
    fn path(&self) -> &str {
        &self.path
    }

    fn list_children(&self) -> Result<Vec<String>, StoreError> {
        self.key
            .enum_keys()
            .collect::<io::Result<Vec<String>>>()
            .map_err(|source| StoreError::Enumerate {
                path: self.path.clone(),
                source,
            })
    }

    fn read_field(&self, field: &str) -> Result<String, StoreError> {
        self.key
            .get_value::<String, _>(field)
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => StoreError::FieldNotFound {
                    path: self.path.clone(),
                    field: field.to_string(),
                },
                _ => StoreError::ReadField {
                    path: self.path.clone(),
                    field: field.to_string(),
                    reason: e.to_string(),
                },
            })
    }

    fn close(self: Box<Self>) -> Result<(), StoreError> {
        // RegKey calls RegCloseKey on drop and does not report its status.
        drop(self.key);
        Ok(())
    }
}
