//! Snapshots: the plain-data serialized form of a registry's entry table.
//!
//! A [`Snapshot`] is an identifier-sorted table of rows, each pairing an
//! entry-kind tag with that entry's reconstruction parameters. Parameters
//! are [`serde_json::Value`], which structurally guarantees the plain-data
//! contract: nulls, booleans, numbers, strings, and maps/sequences thereof —
//! never a live closure or object handle.
//!
//! Encoding goes through `serde_json` over `BTreeMap`s, so the emitted bytes
//! are a deterministic function of the registry contents regardless of
//! registration order: dumping unchanged contents twice yields identical
//! bytes.
//!
//! A loaded registry rebuilds each entry lazily the first time its
//! identifier is requested, keeping load cheap. Blueprints and provider
//! initializers hold live closures and are therefore not part of the
//! snapshot; the loader supplies them as a [`Catalog`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::entry::EntryKind;
use crate::error::Result;
use crate::registry::Registry;

/// One serialized entry: kind tag plus plain reconstruction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub kind: EntryKind,
    pub params: serde_json::Value,
}

/// An identifier-sorted table of serialized entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    rows: BTreeMap<String, SnapshotRow>,
}

impl Snapshot {
    pub(crate) fn from_rows(rows: BTreeMap<String, SnapshotRow>) -> Self {
        Snapshot { rows }
    }

    pub(crate) fn into_rows(self) -> BTreeMap<String, SnapshotRow> {
        self.rows
    }

    /// The row stored for an identifier, if any.
    pub fn get(&self, id: &str) -> Option<&SnapshotRow> {
        self.rows.get(id)
    }

    /// Identifiers and rows in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SnapshotRow)> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Serializes registries to snapshots and reconstructs them.
pub struct SnapshotCodec;

impl SnapshotCodec {
    /// Serialize a live registry's entry table.
    ///
    /// Fails with [`UncacheableEntry`](crate::RiggingError::UncacheableEntry)
    /// if any entry's parameters are not plain data.
    pub fn dump(registry: &Registry) -> Result<Snapshot> {
        registry.to_snapshot()
    }

    /// Construct a registry from a snapshot.
    ///
    /// Entries are not eagerly instantiated: each identifier's entry is
    /// rebuilt from its stored row only the first time it is requested. The
    /// catalog supplies the construction recipes and provider initializers
    /// the rows refer to by name.
    pub fn load(snapshot: Snapshot, catalog: Catalog) -> Registry {
        tracing::debug!("loading registry from snapshot with {} rows", snapshot.len());
        Registry::from_snapshot(snapshot, catalog)
    }

    /// Encode a snapshot to deterministic bytes.
    pub fn to_bytes(snapshot: &Snapshot) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(snapshot)?)
    }

    /// Decode a snapshot from bytes produced by [`SnapshotCodec::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Snapshot> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Write an encoded snapshot to a file.
    pub fn write_file(snapshot: &Snapshot, path: impl AsRef<Path>) -> Result<()> {
        let bytes = Self::to_bytes(snapshot)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Read a snapshot back from a file.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Snapshot> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
