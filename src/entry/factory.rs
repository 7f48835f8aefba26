//! Factory wrapping: entries whose values are never cached.

use crate::entry::Entry;
use crate::error::Result;
use crate::registry::Registry;
use crate::snapshot::SnapshotRow;
use crate::value::Value;

/// Wraps any other entry and disallows caching of its values.
///
/// The wrapped entry's own recompute flag is irrelevant: wrapping forces
/// recomputation on every request.
pub struct FactoryEntry {
    inner: Box<Entry>,
}

impl FactoryEntry {
    /// Wrap an entry.
    pub fn new(inner: Entry) -> Self {
        FactoryEntry {
            inner: Box::new(inner),
        }
    }

    /// The wrapped entry.
    pub fn inner(&self) -> &Entry {
        &self.inner
    }

    pub(crate) fn produce(&self, registry: &Registry) -> Result<Value> {
        self.inner.produce(registry)
    }

    pub(crate) fn cache_parameters(&self) -> Option<serde_json::Value> {
        let row = SnapshotRow {
            kind: self.inner.kind(),
            params: self.inner.cache_parameters()?,
        };
        serde_json::to_value(row).ok()
    }

    pub(crate) fn from_cache_parameters(params: &serde_json::Value) -> Result<Self> {
        let row: SnapshotRow = serde_json::from_value(params.clone())?;
        let inner = Entry::from_snapshot(row.kind, &row.params)?;
        Ok(FactoryEntry::new(inner))
    }
}
