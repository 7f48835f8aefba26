//! The type catalog: named construction recipes and initializers.
//!
//! Snapshot rows refer to types by name only, so something at runtime must
//! map those names back to construction logic. The catalog is that table:
//!
//! - a [`Blueprint`] per wirable type — its declared constructor parameters
//!   and a construct closure,
//! - an initializer closure per provider type.
//!
//! The catalog itself is never serialized; a process loading a snapshot
//! supplies an equivalently-populated catalog (see
//! [`SnapshotCodec::load`](crate::snapshot::SnapshotCodec::load)).

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{Result, RiggingError};
use crate::registry::Registry;
use crate::value::Value;

/// Initializer closure producing a provider object on first request.
pub type Initializer = Rc<dyn Fn(&Registry) -> Result<Value>>;

type ConstructFn = Rc<dyn Fn(Vec<Value>) -> Result<Value>>;

/// A declared constructor parameter: name plus optional declared type.
///
/// Autowiring derives each parameter's dependency identifier from an
/// override keyed by the parameter name or, failing that, from the declared
/// type name. A parameter with neither is a registration-time error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    name: String,
    declared_type: Option<String>,
}

impl ParameterSpec {
    /// A parameter with a declared concrete type.
    pub fn typed(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        ParameterSpec {
            name: name.into(),
            declared_type: Some(declared_type.into()),
        }
    }

    /// A parameter without a usable declared type; it must be covered by an
    /// override at registration.
    pub fn untyped(name: impl Into<String>) -> Self {
        ParameterSpec {
            name: name.into(),
            declared_type: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }
}

/// A construction recipe: type name, declared parameters, construct closure.
pub struct Blueprint {
    name: String,
    parameters: Vec<ParameterSpec>,
    construct: ConstructFn,
}

impl Blueprint {
    pub fn new<F>(name: impl Into<String>, parameters: Vec<ParameterSpec>, construct: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value> + 'static,
    {
        Blueprint {
            name: name.into(),
            parameters,
            construct: Rc::new(construct),
        }
    }

    /// The type name this blueprint constructs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared constructor parameters, in argument order.
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Construct an instance from resolved arguments.
    ///
    /// The argument count must match the declared parameter count.
    pub fn construct(&self, arguments: Vec<Value>) -> Result<Value> {
        if arguments.len() != self.parameters.len() {
            return Err(RiggingError::MisconfiguredWiring {
                class: self.name.clone(),
                parameter: format!(
                    "expected {} constructor arguments, got {}",
                    self.parameters.len(),
                    arguments.len()
                ),
            });
        }
        (self.construct)(arguments)
    }
}

/// Name-keyed table of blueprints and provider initializers.
#[derive(Default, Clone)]
pub struct Catalog {
    blueprints: BTreeMap<String, Rc<Blueprint>>,
    initializers: BTreeMap<String, Initializer>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Register a blueprint under its own type name.
    pub fn register_blueprint(&mut self, blueprint: Rc<Blueprint>) -> Result<()> {
        let name = blueprint.name().to_string();
        if self.blueprints.contains_key(&name) {
            return Err(RiggingError::RegistrationConflict { id: name });
        }
        self.blueprints.insert(name, blueprint);
        Ok(())
    }

    /// Register a provider initializer under a type name.
    pub fn register_initializer<F>(&mut self, name: impl Into<String>, initializer: F) -> Result<()>
    where
        F: Fn(&Registry) -> Result<Value> + 'static,
    {
        let name = name.into();
        if self.initializers.contains_key(&name) {
            return Err(RiggingError::RegistrationConflict { id: name });
        }
        self.initializers.insert(name, Rc::new(initializer));
        Ok(())
    }

    pub fn blueprint(&self, name: &str) -> Option<Rc<Blueprint>> {
        self.blueprints.get(name).cloned()
    }

    pub fn initializer(&self, name: &str) -> Option<Initializer> {
        self.initializers.get(name).cloned()
    }

    /// True if the name maps to a blueprint or an initializer.
    pub fn contains(&self, name: &str) -> bool {
        self.blueprints.contains_key(name) || self.initializers.contains_key(name)
    }
}
