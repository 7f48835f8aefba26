//! Entry kinds: the production strategies bound to identifiers.
//!
//! An [`Entry`] is a closed sum over the four production strategies. The
//! registry dispatches exhaustively over the kinds — production, the
//! recompute flag, cache-parameter extraction, and snapshot reconstruction
//! are all matches on this enum, so adding a kind forces every site to
//! handle it.
//!
//! # Kinds
//!
//! - [`ValueEntry`] — store-and-return: a literal, a deferred producer
//!   invoked once, or a named catalog initializer
//! - [`FactoryEntry`] — wraps any other entry and forces recomputation
//! - [`ProviderMethodEntry`] — delegates production to a method on another
//!   resolved entry
//! - [`WiredEntry`] — constructs an instance from an ordered list of
//!   dependency identifiers

pub mod factory;
pub mod provider;
pub mod value;
pub mod wired;

pub use factory::FactoryEntry;
pub use provider::ProviderMethodEntry;
pub use value::{Producer, ValueEntry};
pub use wired::{MethodCall, WiredEntry};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::Registry;
use crate::value::Value;

/// Tag selecting an entry kind's reconstruction function in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Value,
    Factory,
    ProviderMethod,
    Wired,
}

/// A unit of production logic bound to one identifier.
pub enum Entry {
    Value(ValueEntry),
    Factory(FactoryEntry),
    ProviderMethod(ProviderMethodEntry),
    Wired(WiredEntry),
}

impl Entry {
    /// Produce the entry's value, resolving dependencies through `registry`
    /// (the delegate view of the owning registry).
    pub fn produce(&self, registry: &Registry) -> Result<Value> {
        match self {
            Entry::Value(entry) => entry.produce(registry),
            Entry::Factory(entry) => entry.produce(registry),
            Entry::ProviderMethod(entry) => entry.produce(registry),
            Entry::Wired(entry) => entry.produce(registry),
        }
    }

    /// True if the produced value must never be cached.
    ///
    /// Only factory wrapping forces this; the flag ignores whatever the
    /// wrapped entry would report on its own.
    pub fn is_recomputed(&self) -> bool {
        matches!(self, Entry::Factory(_))
    }

    /// The kind tag used in snapshots.
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Value(_) => EntryKind::Value,
            Entry::Factory(_) => EntryKind::Factory,
            Entry::ProviderMethod(_) => EntryKind::ProviderMethod,
            Entry::Wired(_) => EntryKind::Wired,
        }
    }

    /// The entry's reconstruction parameters as plain data, or `None` when
    /// the entry holds live state (a closure or a non-plain literal) that
    /// cannot be represented in a snapshot.
    pub fn cache_parameters(&self) -> Option<serde_json::Value> {
        match self {
            Entry::Value(entry) => entry.cache_parameters(),
            Entry::Factory(entry) => entry.cache_parameters(),
            Entry::ProviderMethod(entry) => entry.cache_parameters(),
            Entry::Wired(entry) => entry.cache_parameters(),
        }
    }

    /// Rebuild an entry from its snapshot row: the exhaustive
    /// kind-to-constructor table.
    pub fn from_snapshot(kind: EntryKind, params: &serde_json::Value) -> Result<Entry> {
        match kind {
            EntryKind::Value => ValueEntry::from_cache_parameters(params).map(Entry::Value),
            EntryKind::Factory => FactoryEntry::from_cache_parameters(params).map(Entry::Factory),
            EntryKind::ProviderMethod => {
                ProviderMethodEntry::from_cache_parameters(params).map(Entry::ProviderMethod)
            }
            EntryKind::Wired => WiredEntry::from_cache_parameters(params).map(Entry::Wired),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&EntryKind::ProviderMethod).unwrap(),
            "\"provider_method\""
        );
        assert_eq!(
            serde_json::from_str::<EntryKind>("\"wired\"").unwrap(),
            EntryKind::Wired
        );
    }

    #[test]
    fn only_factories_are_recomputed() {
        let literal = Entry::Value(ValueEntry::literal(1));
        assert!(!literal.is_recomputed());

        let factory = Entry::Factory(FactoryEntry::new(Entry::Value(ValueEntry::literal(1))));
        assert!(factory.is_recomputed());

        let wired = Entry::Wired(WiredEntry::new("Widget", ["dep"]));
        assert!(!wired.is_recomputed());
    }

    #[test]
    fn kind_round_trips_through_snapshot_dispatch() {
        let entry = Entry::ProviderMethod(ProviderMethodEntry::new("TimeProvider", "clock"));
        let params = entry.cache_parameters().unwrap();
        let rebuilt = Entry::from_snapshot(entry.kind(), &params).unwrap();
        assert!(matches!(rebuilt, Entry::ProviderMethod(_)));
    }
}
