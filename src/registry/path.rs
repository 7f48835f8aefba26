//! Dot-path lookups across the registry and into entry values.
//!
//! A dot path names a root registry entry plus a chain of nested-key
//! traversals into its value. Precedence is fixed and documented:
//!
//! 1. A full dotted string that is itself a registered identifier resolves
//!    directly; traversal is never attempted.
//! 2. Otherwise the first segment is resolved as an identifier and the rest
//!    is traversed. At each step the *entire remaining suffix* is first
//!    tried as a single key (so a nested registry entry whose identifier
//!    contains dots is found), and only when that fails as not-found is a
//!    single segment consumed.

use crate::error::Result;
use crate::registry::Registry;
use crate::value::path::traverse_key;
use crate::value::Value;

impl Registry {
    /// Resolve a `.`-separated path to a value.
    ///
    /// Fails with a not-found error when the root identifier is missing or
    /// a key cannot be traversed; see [`Registry::get_path_or`] for the
    /// default-value variant.
    pub fn get_path(&self, path: &str) -> Result<Value> {
        if self.has(path) {
            return self.get(path);
        }

        let mut segments = path.split('.');
        let first = segments.next().unwrap_or_default();
        let remaining: Vec<&str> = segments.collect();

        let mut value = self.get(first)?;
        let mut keys: &[&str] = &remaining;

        while let Some((head, rest)) = keys.split_first() {
            let suffix = keys.join(".");
            match traverse_key(&value, &suffix) {
                Ok(next) => {
                    value = next;
                    break;
                }
                Err(err) if err.is_not_found() => {
                    value = traverse_key(&value, head)?;
                    keys = rest;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(value)
    }

    /// Resolve a path, returning the default when the path does not exist.
    ///
    /// Suppresses only not-found failures; every other error propagates.
    pub fn get_path_or(&self, path: &str, default: impl Into<Value>) -> Result<Value> {
        match self.get_path(path) {
            Ok(value) => Ok(value),
            Err(err) if err.is_not_found() => Ok(default.into()),
            Err(err) => Err(err),
        }
    }

    /// Tells whether the path resolves, driving production to find out.
    ///
    /// Errors other than not-found propagate.
    pub fn has_path(&self, path: &str) -> Result<bool> {
        match self.get_path(path) {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }
}
