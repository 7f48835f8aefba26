//! Rigging - lazy dependency-resolution registry.
//!
//! Rigging maps string identifiers to lazily-produced values. Each
//! identifier's production strategy — constant, computed once, recomputed
//! every time, constructed from wired dependencies, or delegated to a
//! provider method — is a pluggable entry kind, and entries resolve their
//! own dependencies by identifier lookup, recursively, through an optional
//! delegate registry.
//!
//! # Modules
//!
//! - [`builder`] - Convenience registration of configuration, providers, and autowired classes
//! - [`catalog`] - Named construction recipes and provider initializers
//! - [`entry`] - The entry kinds and their production protocol
//! - [`error`] - Error types and result alias
//! - [`provider`] - Provider objects with declared method tables
//! - [`registry`] - The resolution and cache store, including dot-path lookup
//! - [`snapshot`] - Deterministic serialization to reloadable snapshots
//! - [`value`] - The value model, object capabilities, and key-path traversal
//!
//! # Example
//!
//! ```
//! use rigging::{Registry, Value};
//!
//! let registry = Registry::new();
//! registry.set("cfg", Value::from_plain(&serde_json::json!({
//!     "database": {"host": "localhost"}
//! }))).unwrap();
//!
//! // Dotted paths walk from an entry into its nested value.
//! let host = registry.get_path("cfg.database.host").unwrap();
//! assert_eq!(host, Value::from("localhost"));
//!
//! // A default suppresses only "not found".
//! let port = registry.get_path_or("cfg.database.port", 5432).unwrap();
//! assert_eq!(port, Value::from(5432));
//! ```
//!
//! The registry is single-threaded by construction; see the concurrency
//! notes on [`registry`].

pub mod builder;
pub mod catalog;
pub mod entry;
pub mod error;
pub mod provider;
pub mod registry;
pub mod snapshot;
pub mod value;

pub use builder::Builder;
pub use catalog::{Blueprint, Catalog, ParameterSpec};
pub use entry::{Entry, EntryKind, FactoryEntry, MethodCall, ProviderMethodEntry, ValueEntry, WiredEntry};
pub use error::{Result, RiggingError};
pub use provider::{ProvidedMethod, Provider};
pub use registry::{InjectionRule, Registry};
pub use snapshot::{Snapshot, SnapshotCodec, SnapshotRow};
pub use value::{Accessor, Indexable, ObjectValue, Record, Value};
