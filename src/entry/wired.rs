//! Structurally-wired entries: construction from resolved dependencies.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RiggingError};
use crate::registry::Registry;
use crate::value::Value;

/// A named method call applied to a constructed instance, with its
/// arguments given as dependency identifiers resolved at call time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    pub arguments: Vec<String>,
}

impl MethodCall {
    pub fn new<I, S>(method: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MethodCall {
            method: method.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve the argument identifiers and invoke the method on the target.
    pub(crate) fn apply(&self, target: &Value, registry: &Registry) -> Result<()> {
        let arguments = self
            .arguments
            .iter()
            .map(|id| registry.get(id))
            .collect::<Result<Vec<_>>>()?;

        match target {
            Value::Object(object) => object.invoke(&self.method, arguments),
            other => Err(RiggingError::UnsupportedCall {
                class: other.type_label(),
                method: self.method.clone(),
            }),
        }
    }
}

/// Constructs a new instance from a fixed, ordered list of dependency
/// identifiers, then applies post-construction calls.
///
/// The target type name selects a [`Blueprint`](crate::catalog::Blueprint)
/// in the producing registry's catalog. The argument list's length and order
/// are fixed at registration and must match the blueprint's declared
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiredEntry {
    class: String,
    arguments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    calls: Vec<MethodCall>,
}

impl WiredEntry {
    pub fn new<I, S>(class: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WiredEntry {
            class: class.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
            calls: Vec::new(),
        }
    }

    /// Add an explicit post-construction call, applied in declaration order
    /// before any injection rules.
    pub fn with_call<I, S>(mut self, method: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.calls.push(MethodCall::new(method, arguments));
        self
    }

    /// The target type name.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// The ordered dependency identifiers supplied to construction.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// The entry's explicit post-construction calls.
    pub fn calls(&self) -> &[MethodCall] {
        &self.calls
    }

    pub(crate) fn produce(&self, registry: &Registry) -> Result<Value> {
        let blueprint = registry
            .blueprint(&self.class)
            .ok_or_else(|| RiggingError::UnknownType {
                name: self.class.clone(),
            })?;

        let arguments = self
            .arguments
            .iter()
            .map(|id| registry.get(id))
            .collect::<Result<Vec<_>>>()?;

        let instance = blueprint.construct(arguments)?;

        for call in &self.calls {
            call.apply(&instance, registry)?;
        }
        registry.apply_injections(&instance)?;

        Ok(instance)
    }

    pub(crate) fn cache_parameters(&self) -> Option<serde_json::Value> {
        serde_json::to_value(self).ok()
    }

    pub(crate) fn from_cache_parameters(params: &serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(params.clone())?)
    }
}
