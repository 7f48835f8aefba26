//! The registry: identifier-to-value resolution and caching.
//!
//! A [`Registry`] owns a table of entries, a value cache for entries whose
//! values are computed once, and an optional delegate registry substituted
//! for dependency resolution during production. Entries loaded from a
//! snapshot start as plain rows and are rebuilt lazily on first request.
//!
//! # Resolution
//!
//! [`Registry::get`] consults the value cache first; a hit is returned
//! unchanged with no side effects. Otherwise the entry produces its value
//! against the delegate (the registry itself when no delegate is set), and
//! the result is cached unless the entry is recomputed each time.
//!
//! # Concurrency
//!
//! Single-threaded by construction (`Rc`/`RefCell`). The entry table and
//! value cache are mutated in place during `get`/`add_entry`/`remove`, so
//! concurrent callers must serialize access externally.
//!
//! # Example
//!
//! ```
//! use rigging::{Registry, Value};
//!
//! let registry = Registry::new();
//! registry.set("greeting", "hello").unwrap();
//!
//! assert_eq!(registry.get("greeting").unwrap(), Value::from("hello"));
//! assert!(registry.has("greeting"));
//! assert!(!registry.has("missing"));
//! ```

pub mod path;

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::catalog::{Blueprint, Catalog, Initializer};
use crate::entry::{Entry, FactoryEntry, MethodCall, Producer, ValueEntry, WiredEntry};
use crate::error::{Result, RiggingError};
use crate::snapshot::{Snapshot, SnapshotRow};
use crate::value::Value;

/// An injection rule: extra calls applied to every constructed instance
/// that satisfies the capability, after the blueprint's own explicit calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionRule {
    capability: String,
    calls: Vec<MethodCall>,
}

impl InjectionRule {
    pub fn new<I>(capability: impl Into<String>, calls: I) -> Self
    where
        I: IntoIterator<Item = MethodCall>,
    {
        InjectionRule {
            capability: capability.into(),
            calls: calls.into_iter().collect(),
        }
    }

    pub fn capability(&self) -> &str {
        &self.capability
    }
}

/// The identifier-to-value resolution and cache store.
pub struct Registry {
    /// Reconstructable entry rows, populated by snapshot loading.
    rows: RefCell<BTreeMap<String, SnapshotRow>>,
    /// Live entry instances used to resolve values.
    entries: RefCell<BTreeMap<String, Rc<Entry>>>,
    /// Cached values for non-recomputing entries.
    values: RefCell<BTreeMap<String, Value>>,
    /// Identifiers currently mid-production, for cycle detection.
    resolving: RefCell<BTreeSet<String>>,
    /// Delegate used for dependency resolution. `None` means the registry
    /// itself.
    delegate: RefCell<Option<Rc<Registry>>>,
    /// Named construction recipes and provider initializers.
    catalog: RefCell<Catalog>,
    /// Injection rules in registration order.
    injections: RefCell<Vec<InjectionRule>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").finish_non_exhaustive()
    }
}

impl Registry {
    /// Create an empty registry that is its own delegate.
    pub fn new() -> Self {
        Registry {
            rows: RefCell::new(BTreeMap::new()),
            entries: RefCell::new(BTreeMap::new()),
            values: RefCell::new(BTreeMap::new()),
            resolving: RefCell::new(BTreeSet::new()),
            delegate: RefCell::new(None),
            catalog: RefCell::new(Catalog::new()),
            injections: RefCell::new(Vec::new()),
        }
    }

    /// Create an empty registry with a pre-populated catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        let registry = Registry::new();
        *registry.catalog.borrow_mut() = catalog;
        registry
    }

    pub(crate) fn from_snapshot(snapshot: Snapshot, catalog: Catalog) -> Self {
        let registry = Registry::with_catalog(catalog);
        *registry.rows.borrow_mut() = snapshot.into_rows();
        registry
    }

    /// Replace the delegate used for dependency resolution inside entry
    /// production. Already-cached values are unaffected.
    ///
    /// The handle is shared and non-owning in spirit: the delegate's own
    /// cache is never written through it. Avoid registries that delegate to
    /// each other in a cycle of `Rc` handles, as neither will be dropped.
    pub fn set_delegate(&self, delegate: Rc<Registry>) {
        *self.delegate.borrow_mut() = Some(delegate);
    }

    /// Adds an entry under an identifier.
    ///
    /// Fails with [`RiggingError::RegistrationConflict`] if the identifier
    /// already has an entry, a snapshot row, or a cached value; the failed
    /// call has no effect.
    pub fn add_entry(&self, id: impl Into<String>, entry: Entry) -> Result<()> {
        let id = id.into();
        if self.has(&id) || self.values.borrow().contains_key(&id) {
            return Err(RiggingError::RegistrationConflict { id });
        }
        self.entries.borrow_mut().insert(id, Rc::new(entry));
        Ok(())
    }

    /// Returns the value for the identifier, producing it if needed.
    pub fn get(&self, id: &str) -> Result<Value> {
        if let Some(value) = self.values.borrow().get(id) {
            return Ok(value.clone());
        }

        let entry = self.entry(id)?;

        if !self.resolving.borrow_mut().insert(id.to_string()) {
            return Err(RiggingError::CircularDependency { id: id.to_string() });
        }

        tracing::debug!("producing value for entry '{}'", id);
        let delegate = self.delegate.borrow().clone();
        let produced = match &delegate {
            Some(registry) => entry.produce(registry),
            None => entry.produce(self),
        };
        self.resolving.borrow_mut().remove(id);

        let value = produced?;
        if !entry.is_recomputed() {
            self.values.borrow_mut().insert(id.to_string(), value.clone());
        }

        Ok(value)
    }

    /// Returns the live entry for the identifier, rebuilding it from a
    /// snapshot row on first request.
    fn entry(&self, id: &str) -> Result<Rc<Entry>> {
        if let Some(entry) = self.entries.borrow().get(id) {
            return Ok(Rc::clone(entry));
        }

        let row = self
            .rows
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| RiggingError::NotFound { id: id.to_string() })?;

        let entry = Rc::new(Entry::from_snapshot(row.kind, &row.params)?);
        self.entries
            .borrow_mut()
            .insert(id.to_string(), Rc::clone(&entry));
        Ok(entry)
    }

    /// Tells whether the identifier has a live entry or a snapshot row.
    /// Never triggers production.
    pub fn has(&self, id: &str) -> bool {
        self.entries.borrow().contains_key(id) || self.rows.borrow().contains_key(id)
    }

    /// Alias for [`Registry::has`].
    pub fn contains(&self, id: &str) -> bool {
        self.has(id)
    }

    /// Removes an identifier's snapshot row, live entry, and cached value
    /// atomically. Returns true if anything was removed.
    pub fn remove(&self, id: &str) -> bool {
        let row = self.rows.borrow_mut().remove(id).is_some();
        let entry = self.entries.borrow_mut().remove(id).is_some();
        let value = self.values.borrow_mut().remove(id).is_some();
        row || entry || value
    }

    /// Adds a single literal value entry.
    pub fn set(&self, id: impl Into<String>, value: impl Into<Value>) -> Result<&Self> {
        self.add_entry(id, Entry::Value(ValueEntry::literal(value)))?;
        Ok(self)
    }

    /// Adds a batch of literal value entries.
    pub fn set_values<I, K, V>(&self, values: I) -> Result<&Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (id, value) in values {
            self.set(id, value)?;
        }
        Ok(self)
    }

    /// Adds an entry whose value is computed on first request and cached.
    pub fn set_deferred<F>(&self, id: impl Into<String>, producer: F) -> Result<&Self>
    where
        F: Fn(&Registry) -> Result<Value> + 'static,
    {
        self.add_entry(id, Entry::Value(ValueEntry::deferred(producer)))?;
        Ok(self)
    }

    /// Adds an entry whose value is recomputed on every request.
    pub fn set_factory<F>(&self, id: impl Into<String>, producer: F) -> Result<&Self>
    where
        F: Fn(&Registry) -> Result<Value> + 'static,
    {
        self.add_entry(
            id,
            Entry::Factory(FactoryEntry::new(Entry::Value(ValueEntry::deferred(
                producer,
            )))),
        )?;
        Ok(self)
    }

    /// Adds a batch of factory entries.
    pub fn set_factories<I, K>(&self, producers: I) -> Result<&Self>
    where
        I: IntoIterator<Item = (K, Producer)>,
        K: Into<String>,
    {
        for (id, producer) in producers {
            self.add_entry(
                id,
                Entry::Factory(FactoryEntry::new(Entry::Value(ValueEntry::Producer(
                    producer,
                )))),
            )?;
        }
        Ok(self)
    }

    /// Adds a batch of wired entries.
    pub fn set_blueprints<I, K>(&self, blueprints: I) -> Result<&Self>
    where
        I: IntoIterator<Item = (K, WiredEntry)>,
        K: Into<String>,
    {
        for (id, entry) in blueprints {
            self.add_entry(id, Entry::Wired(entry))?;
        }
        Ok(self)
    }

    /// Registers injection rules, applied to constructed instances in
    /// registration order. A capability registered twice is a conflict.
    pub fn set_injections<I>(&self, rules: I) -> Result<&Self>
    where
        I: IntoIterator<Item = InjectionRule>,
    {
        for rule in rules {
            let duplicate = self
                .injections
                .borrow()
                .iter()
                .any(|existing| existing.capability == rule.capability);
            if duplicate {
                return Err(RiggingError::RegistrationConflict {
                    id: rule.capability,
                });
            }
            self.injections.borrow_mut().push(rule);
        }
        Ok(self)
    }

    /// Apply every matching injection rule to a constructed instance.
    /// Non-object values satisfy no capability and are left untouched.
    pub(crate) fn apply_injections(&self, instance: &Value) -> Result<()> {
        let object = match instance {
            Value::Object(object) => object,
            _ => return Ok(()),
        };

        let matching: Vec<InjectionRule> = self
            .injections
            .borrow()
            .iter()
            .filter(|rule| object.implements(&rule.capability))
            .cloned()
            .collect();

        for rule in matching {
            for call in &rule.calls {
                call.apply(instance, self)?;
            }
        }
        Ok(())
    }

    /// Registers a blueprint in the registry's catalog.
    pub fn register_blueprint(&self, blueprint: Rc<Blueprint>) -> Result<()> {
        self.catalog.borrow_mut().register_blueprint(blueprint)
    }

    /// Registers a provider initializer in the registry's catalog.
    pub fn register_initializer<F>(&self, name: impl Into<String>, initializer: F) -> Result<()>
    where
        F: Fn(&Registry) -> Result<Value> + 'static,
    {
        self.catalog
            .borrow_mut()
            .register_initializer(name, initializer)
    }

    pub(crate) fn blueprint(&self, name: &str) -> Option<Rc<Blueprint>> {
        self.catalog.borrow().blueprint(name)
    }

    pub(crate) fn initializer(&self, name: &str) -> Option<Initializer> {
        self.catalog.borrow().initializer(name)
    }

    /// Serializes the entry table into a snapshot.
    ///
    /// Every live entry must yield plain reconstruction parameters, else the
    /// call fails with [`RiggingError::UncacheableEntry`] naming the
    /// offending identifier. Rows are keyed by identifier in sorted order,
    /// so repeated dumps of unchanged contents are byte-identical.
    pub fn to_snapshot(&self) -> Result<Snapshot> {
        let mut rows = self.rows.borrow().clone();

        for (id, entry) in self.entries.borrow().iter() {
            let params = entry
                .cache_parameters()
                .ok_or_else(|| RiggingError::UncacheableEntry { id: id.clone() })?;
            rows.insert(
                id.clone(),
                SnapshotRow {
                    kind: entry.kind(),
                    params,
                },
            );
        }

        tracing::debug!("dumped registry snapshot with {} rows", rows.len());
        Ok(Snapshot::from_rows(rows))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}
