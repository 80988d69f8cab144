//! PuTTY saved-session store access.
//!
//! This crate provides read-only access to the hierarchical store where PuTTY
//! keeps its saved sessions. It includes:
//!
//! - The [`SessionStore`] / [`Namespace`] traits
//! - The live Windows registry backend (Windows only)
//! - A parser for `regedit` export files
//! - An in-memory store used by the parser and by tests

pub mod error;
pub mod memory;
pub mod reg_file;
#[cfg(windows)]
pub mod registry;
pub mod types;

pub use error::StoreError;
pub use memory::{FieldValue, MemoryNode, MemoryStore};
pub use reg_file::{parse_reg_file, parse_reg_str};
#[cfg(windows)]
pub use registry::RegistryStore;
pub use types::{HOST_NAME_FIELD, Namespace, SESSIONS_KEY, SessionStore, child_path};
