//! Integration tests for builder-driven registry setup.

use std::collections::BTreeMap;
use std::rc::Rc;

use rigging::error::Result;
use rigging::{
    Blueprint, Builder, InjectionRule, MethodCall, ObjectValue, ParameterSpec, ProvidedMethod,
    Provider, Record, Registry, RiggingError, Value, WiredEntry,
};

struct TimeProvider;

impl Provider for TimeProvider {
    fn provided_methods(&self) -> Vec<ProvidedMethod> {
        vec![
            ProvidedMethod::returning("clock", "Clock"),
            ProvidedMethod::untyped("helper"),
        ]
    }

    fn call_method(&self, method: &str, _registry: &Registry) -> Result<Value> {
        match method {
            "clock" => Ok(Value::from("08:00")),
            other => Err(RiggingError::InvalidProviderResult {
                provider: "TimeProvider".to_string(),
                method: other.to_string(),
            }),
        }
    }
}

impl ObjectValue for TimeProvider {
    fn type_name(&self) -> &str {
        "TimeProvider"
    }

    fn as_provider(&self) -> Option<&dyn Provider> {
        Some(self)
    }
}

fn dependency_blueprint() -> Rc<Blueprint> {
    Rc::new(Blueprint::new("DependencyA", Vec::new(), |_| {
        Ok(Value::object(Rc::new(Record::new("DependencyA"))))
    }))
}

fn reporter_blueprint() -> Rc<Blueprint> {
    Rc::new(Blueprint::new(
        "Reporter",
        vec![
            ParameterSpec::typed("history", "DependencyA"),
            ParameterSpec::untyped("label"),
            ParameterSpec::typed("now", "DependencyA"),
        ],
        |arguments| {
            let record = Record::new("Reporter");
            record.set_field("history", arguments[0].clone());
            record.set_field("label", arguments[1].clone());
            record.set_field("now", arguments[2].clone());
            Ok(Value::object(Rc::new(record)))
        },
    ))
}

#[test]
fn configuration_registers_literal_entries() {
    let builder = Builder::new();
    builder
        .register_configuration([
            ("cfg.label", Value::from("main")),
            (
                "cfg.database",
                Value::from_plain(&serde_json::json!({"host": "localhost"})),
            ),
        ])
        .unwrap();

    let registry = builder.registry();
    assert_eq!(registry.get("cfg.label").unwrap(), Value::from("main"));
    assert_eq!(
        registry.get_path("cfg.database.host").unwrap(),
        Value::from("localhost")
    );
}

#[test]
fn conflicting_configuration_propagates() {
    let builder = Builder::new();
    builder
        .register_configuration([("cfg.label", "first")])
        .unwrap();

    let err = builder
        .register_configuration([("cfg.label", "second")])
        .unwrap_err();
    assert!(matches!(err, RiggingError::RegistrationConflict { id } if id == "cfg.label"));
}

#[test]
fn providers_register_typed_methods_only() {
    let builder = Builder::new();
    builder.register_provider(Rc::new(TimeProvider)).unwrap();

    let registry = builder.registry();
    assert!(registry.has("TimeProvider"));
    assert!(registry.has("Clock"));
    // The untyped method has no registration identifier.
    assert!(!registry.has("helper"));

    assert_eq!(registry.get("Clock").unwrap(), Value::from("08:00"));
}

#[test]
fn provider_instances_resolve_to_a_single_shared_object() {
    let builder = Builder::new();
    builder.register_provider(Rc::new(TimeProvider)).unwrap();

    let registry = builder.registry();
    let first = registry.get("TimeProvider").unwrap();
    let second = registry.get("TimeProvider").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_object().unwrap().type_name(), "TimeProvider");
}

#[test]
fn autowiring_constructs_with_declared_order_and_overrides() {
    let builder = Builder::new();
    builder
        .register_configuration([("cfg.label", "main")])
        .unwrap();
    builder
        .register_autowired_classes(
            [dependency_blueprint(), reporter_blueprint()],
            &BTreeMap::from([("label".to_string(), "cfg.label".to_string())]),
        )
        .unwrap();

    let registry = builder.registry();
    let reporter = registry.get("Reporter").unwrap();
    let object = reporter.as_object().unwrap();

    assert_eq!(object.public_field("label"), Some(Value::from("main")));

    // Both typed parameters resolve to the same cached dependency instance.
    let history = object.public_field("history").unwrap();
    let now = object.public_field("now").unwrap();
    assert_eq!(history, now);
    assert_eq!(history, registry.get("DependencyA").unwrap());
}

#[test]
fn autowiring_rejects_uncovered_untyped_parameters() {
    let builder = Builder::new();
    let err = builder
        .register_autowired_classes([reporter_blueprint()], &BTreeMap::new())
        .unwrap_err();
    assert!(matches!(
        err,
        RiggingError::MisconfiguredWiring { class, parameter }
            if class == "Reporter" && parameter == "label"
    ));

    // Wiring is validated before anything is registered for the class.
    assert!(!builder.registry().has("Reporter"));
}

#[test]
fn injections_run_after_the_entrys_own_calls() {
    let registry = Registry::new();
    registry
        .register_blueprint(Rc::new(Blueprint::new("Widget", Vec::new(), |_| {
            Ok(Value::object(Rc::new(
                Record::new("Widget").with_capability("Configurable"),
            )))
        })))
        .unwrap();
    registry
        .set_values([("mode.initial", "explicit"), ("mode.injected", "injected")])
        .unwrap()
        .set_blueprints([(
            "widget",
            WiredEntry::new("Widget", Vec::<String>::new())
                .with_call("configure", ["mode.initial"]),
        )])
        .unwrap()
        .set_injections([InjectionRule::new(
            "Configurable",
            [MethodCall::new("configure", ["mode.injected"])],
        )])
        .unwrap();

    let widget = registry.get("widget").unwrap();
    let object = widget.as_object().unwrap();
    // The injection overwrote the entry's own call.
    assert_eq!(
        object.public_field("configure"),
        Some(Value::from("injected"))
    );
}

#[test]
fn injection_rules_apply_in_registration_order() {
    let registry = Registry::new();
    registry
        .register_blueprint(Rc::new(Blueprint::new("Widget", Vec::new(), |_| {
            Ok(Value::object(Rc::new(
                Record::new("Widget").with_capability("Configurable"),
            )))
        })))
        .unwrap();
    registry
        .set_values([("mode.first", "first"), ("mode.second", "second")])
        .unwrap()
        .set_blueprints([("widget", WiredEntry::new("Widget", Vec::<String>::new()))])
        .unwrap()
        .set_injections([
            InjectionRule::new("Configurable", [MethodCall::new("mode", ["mode.first"])]),
            InjectionRule::new("Widget", [MethodCall::new("mode", ["mode.second"])]),
        ])
        .unwrap();

    let widget = registry.get("widget").unwrap();
    let object = widget.as_object().unwrap();
    // Both rules match; the later-registered rule wrote last.
    assert_eq!(object.public_field("mode"), Some(Value::from("second")));
}

#[test]
fn injections_skip_instances_without_the_capability() {
    let registry = Registry::new();
    registry
        .register_blueprint(Rc::new(Blueprint::new("Widget", Vec::new(), |_| {
            Ok(Value::object(Rc::new(Record::new("Widget"))))
        })))
        .unwrap();
    registry
        .set("mode.injected", "injected")
        .unwrap()
        .set_blueprints([("widget", WiredEntry::new("Widget", Vec::<String>::new()))])
        .unwrap()
        .set_injections([InjectionRule::new(
            "Configurable",
            [MethodCall::new("configure", ["mode.injected"])],
        )])
        .unwrap();

    let widget = registry.get("widget").unwrap();
    let object = widget.as_object().unwrap();
    assert_eq!(object.public_field("configure"), None);
}

#[test]
fn duplicate_injection_capability_is_a_conflict() {
    let registry = Registry::new();
    registry
        .set_injections([InjectionRule::new(
            "Configurable",
            [MethodCall::new("configure", ["a"])],
        )])
        .unwrap();

    let err = registry
        .set_injections([InjectionRule::new(
            "Configurable",
            [MethodCall::new("configure", ["b"])],
        )])
        .unwrap_err();
    assert!(matches!(err, RiggingError::RegistrationConflict { id } if id == "Configurable"));
}
