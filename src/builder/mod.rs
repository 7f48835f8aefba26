//! Convenience layer for setting up registries.
//!
//! The builder registers batches of constant values, provider objects, and
//! structurally-wired classes. It carries no resolution logic of its own:
//! everything goes through the registry's public registration contract, and
//! conflicts propagate unchanged.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::catalog::Blueprint;
use crate::entry::{Entry, ProviderMethodEntry, ValueEntry, WiredEntry};
use crate::error::{Result, RiggingError};
use crate::provider::Provider;
use crate::registry::Registry;
use crate::value::{ObjectValue, Value};

/// Builds a registry from configuration, providers, and wirable classes.
#[derive(Default)]
pub struct Builder {
    registry: Rc<Registry>,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            registry: Rc::new(Registry::new()),
        }
    }

    /// The registry being built.
    pub fn registry(&self) -> Rc<Registry> {
        Rc::clone(&self.registry)
    }

    /// Registers identifier/value pairs as literal value entries.
    pub fn register_configuration<I, K, V>(&self, configuration: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (id, value) in configuration {
            self.registry
                .add_entry(id, Entry::Value(ValueEntry::literal(value)))?;
        }
        Ok(())
    }

    /// Registers a provider object and its declared methods.
    ///
    /// The provider's own type name becomes an initializer-backed value
    /// entry, and each declared method with a concrete return type becomes a
    /// provider-method entry keyed by that return type name. Methods without
    /// a declared return type are skipped, not registered.
    pub fn register_provider<P>(&self, provider: Rc<P>) -> Result<()>
    where
        P: Provider + ObjectValue + 'static,
    {
        let name = provider.type_name().to_string();
        let methods = provider.provided_methods();

        let instance: Rc<dyn ObjectValue> = Rc::clone(&provider) as Rc<dyn ObjectValue>;
        self.registry
            .register_initializer(name.clone(), move |_| Ok(Value::Object(Rc::clone(&instance))))?;
        self.registry
            .add_entry(name.clone(), Entry::Value(ValueEntry::initializer(name.clone())))?;

        for method in methods {
            if let Some(return_type) = method.return_type {
                self.registry.add_entry(
                    return_type,
                    Entry::ProviderMethod(ProviderMethodEntry::new(name.clone(), method.name)),
                )?;
            }
        }
        Ok(())
    }

    /// Registers blueprints whose dependencies are derived from declared
    /// constructor parameters.
    ///
    /// Each parameter resolves to a dependency identifier from an override
    /// keyed by the parameter name, or else from the parameter's declared
    /// type name. A parameter with neither fails immediately with
    /// [`RiggingError::MisconfiguredWiring`] — misconfiguration is caught at
    /// registration, not at first use.
    pub fn register_autowired_classes<I>(
        &self,
        blueprints: I,
        overrides: &BTreeMap<String, String>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = Rc<Blueprint>>,
    {
        for blueprint in blueprints {
            let arguments = wired_arguments(&blueprint, overrides)?;
            let name = blueprint.name().to_string();

            self.registry.register_blueprint(blueprint)?;
            self.registry
                .add_entry(name.clone(), Entry::Wired(WiredEntry::new(name.clone(), arguments)))?;
        }
        Ok(())
    }
}

/// Derive the dependency identifier for each declared constructor parameter.
fn wired_arguments(
    blueprint: &Blueprint,
    overrides: &BTreeMap<String, String>,
) -> Result<Vec<String>> {
    blueprint
        .parameters()
        .iter()
        .map(|parameter| {
            if let Some(id) = overrides.get(parameter.name()) {
                return Ok(id.clone());
            }
            match parameter.declared_type() {
                Some(declared) => Ok(declared.to_string()),
                None => Err(RiggingError::MisconfiguredWiring {
                    class: blueprint.name().to_string(),
                    parameter: parameter.name().to_string(),
                }),
            }
        })
        .collect()
}
