//! Integration tests for the registry resolution and caching contract.

use std::cell::Cell;
use std::rc::Rc;

use rigging::{Entry, FactoryEntry, Record, Registry, RiggingError, Value, ValueEntry, WiredEntry};

#[test]
fn unregistered_identifiers_are_absent() {
    let registry = Registry::new();

    assert!(!registry.has("missing"));
    let err = registry.get("missing").unwrap_err();
    assert!(matches!(err, RiggingError::NotFound { id } if id == "missing"));
}

#[test]
fn literal_values_resolve_unchanged() {
    let registry = Registry::new();
    registry.set("name", "core").unwrap();

    assert!(registry.has("name"));
    assert_eq!(registry.get("name").unwrap(), Value::from("core"));
}

#[test]
fn batch_setters_chain() {
    let registry = Registry::new();
    registry
        .set("standard", "standard entry")
        .unwrap()
        .set_values([("value", "value entry"), ("other", "other entry")])
        .unwrap()
        .set_factory("factory", |_| Ok(Value::from("factory entry")))
        .unwrap();

    assert_eq!(registry.get("standard").unwrap(), Value::from("standard entry"));
    assert_eq!(registry.get("value").unwrap(), Value::from("value entry"));
    assert_eq!(registry.get("factory").unwrap(), Value::from("factory entry"));
}

#[test]
fn deferred_producers_run_exactly_once() {
    let registry = Registry::new();
    let runs = Rc::new(Cell::new(0));

    let counter = Rc::clone(&runs);
    registry
        .set_deferred("computed", move |_| {
            counter.set(counter.get() + 1);
            Ok(Value::Int(counter.get()))
        })
        .unwrap();

    assert_eq!(registry.get("computed").unwrap(), Value::Int(1));
    assert_eq!(registry.get("computed").unwrap(), Value::Int(1));
    assert_eq!(runs.get(), 1);
}

#[test]
fn cached_object_values_keep_their_identity() {
    let registry = Registry::new();
    registry
        .set_deferred("widget", |_| {
            Ok(Value::object(Rc::new(Record::new("Widget"))))
        })
        .unwrap();

    let first = registry.get("widget").unwrap();
    let second = registry.get("widget").unwrap();
    // Pointer identity, not mere structural equality.
    assert_eq!(first, second);
}

#[test]
fn factories_recompute_on_every_request() {
    let registry = Registry::new();
    let runs = Rc::new(Cell::new(0));

    let counter = Rc::clone(&runs);
    registry
        .set_factory("fresh", move |_| {
            counter.set(counter.get() + 1);
            Ok(Value::Int(counter.get()))
        })
        .unwrap();

    assert_eq!(registry.get("fresh").unwrap(), Value::Int(1));
    assert_eq!(registry.get("fresh").unwrap(), Value::Int(2));
    assert_eq!(runs.get(), 2);
}

#[test]
fn factory_wrapping_forces_recomputation_of_wired_entries() {
    let registry = Registry::new();
    registry
        .register_blueprint(Rc::new(rigging::Blueprint::new(
            "Widget",
            Vec::new(),
            |_| Ok(Value::object(Rc::new(Record::new("Widget")))),
        )))
        .unwrap();
    registry
        .add_entry(
            "widget",
            Entry::Factory(FactoryEntry::new(Entry::Wired(WiredEntry::new(
                "Widget",
                Vec::<String>::new(),
            )))),
        )
        .unwrap();

    let first = registry.get("widget").unwrap();
    let second = registry.get("widget").unwrap();
    assert_ne!(first, second);
}

#[test]
fn duplicate_registration_is_a_conflict_and_leaves_the_first_intact() {
    let registry = Registry::new();
    registry.set("id", "first").unwrap();

    let err = registry.set("id", "second").unwrap_err();
    assert!(matches!(err, RiggingError::RegistrationConflict { id } if id == "id"));

    // The failed call has no effect.
    assert_eq!(registry.get("id").unwrap(), Value::from("first"));
}

#[test]
fn cached_values_also_conflict_with_new_registrations() {
    let registry = Registry::new();
    registry.set("id", "value").unwrap();
    registry.get("id").unwrap();

    let err = registry.add_entry("id", Entry::Value(ValueEntry::literal("other")));
    assert!(matches!(
        err,
        Err(RiggingError::RegistrationConflict { .. })
    ));
}

#[test]
fn remove_makes_an_identifier_reusable() {
    let registry = Registry::new();
    registry.set("id", "first").unwrap();
    registry.get("id").unwrap();

    assert!(registry.remove("id"));
    assert!(!registry.has("id"));
    assert!(registry.get("id").unwrap_err().is_not_found());
    assert!(!registry.remove("id"));

    registry.set("id", "second").unwrap();
    assert_eq!(registry.get("id").unwrap(), Value::from("second"));
}

#[test]
fn dependencies_resolve_through_the_delegate() {
    let shared = Rc::new(Registry::new());
    shared.set("suffix", "-shared").unwrap();

    let registry = Registry::new();
    registry.set("suffix", "-own").unwrap();
    registry
        .set_deferred("label", |delegate| {
            let suffix = delegate.get("suffix")?;
            Ok(Value::Str(format!("name{}", suffix.as_str().unwrap_or(""))))
        })
        .unwrap();

    // Without a delegate, production sees the registry itself.
    assert_eq!(registry.get("label").unwrap(), Value::from("name-own"));

    let registry = Registry::new();
    registry.set("suffix", "-own").unwrap();
    registry
        .set_deferred("label", |delegate| {
            let suffix = delegate.get("suffix")?;
            Ok(Value::Str(format!("name{}", suffix.as_str().unwrap_or(""))))
        })
        .unwrap();
    registry.set_delegate(Rc::clone(&shared));

    // With a delegate, entries see the delegate's view of the world.
    assert_eq!(registry.get("label").unwrap(), Value::from("name-shared"));
}

#[test]
fn delegate_replacement_does_not_affect_cached_values() {
    let registry = Registry::new();
    registry.set("suffix", "-own").unwrap();
    registry
        .set_deferred("label", |delegate| delegate.get("suffix"))
        .unwrap();

    assert_eq!(registry.get("label").unwrap(), Value::from("-own"));

    let other = Rc::new(Registry::new());
    other.set("suffix", "-other").unwrap();
    registry.set_delegate(other);

    // Already cached; not re-resolved.
    assert_eq!(registry.get("label").unwrap(), Value::from("-own"));
}

#[test]
fn delegates_do_not_cache_into_each_other() {
    let shared = Rc::new(Registry::new());
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    shared
        .set_factory("fresh", move |_| {
            counter.set(counter.get() + 1);
            Ok(Value::Int(counter.get()))
        })
        .unwrap();

    let registry = Registry::new();
    registry
        .set_deferred("reading", |delegate| delegate.get("fresh"))
        .unwrap();
    registry.set_delegate(Rc::clone(&shared));

    assert_eq!(registry.get("reading").unwrap(), Value::Int(1));
    // The delegate's factory was not cached by the referencing registry.
    assert_eq!(shared.get("fresh").unwrap(), Value::Int(2));
}

#[test]
fn self_referential_production_fails_fast() {
    let registry = Registry::new();
    registry
        .set_deferred("loop", |delegate| delegate.get("loop"))
        .unwrap();

    let err = registry.get("loop").unwrap_err();
    assert!(matches!(err, RiggingError::CircularDependency { id } if id == "loop"));
}

#[test]
fn mutual_cycles_fail_fast_instead_of_recursing() {
    let registry = Registry::new();
    registry
        .set_deferred("a", |delegate| delegate.get("b"))
        .unwrap();
    registry
        .set_deferred("b", |delegate| delegate.get("a"))
        .unwrap();

    let err = registry.get("a").unwrap_err();
    assert!(matches!(err, RiggingError::CircularDependency { .. }));

    // The guard is cleared: unrelated entries still resolve afterwards.
    registry.set("c", 1).unwrap();
    assert_eq!(registry.get("c").unwrap(), Value::Int(1));
}

#[test]
fn failed_production_can_be_retried() {
    let registry = Registry::new();
    let attempts = Rc::new(Cell::new(0));

    let counter = Rc::clone(&attempts);
    registry
        .set_deferred("flaky", move |_| {
            counter.set(counter.get() + 1);
            if counter.get() == 1 {
                Err(anyhow::anyhow!("first attempt fails").into())
            } else {
                Ok(Value::Int(counter.get()))
            }
        })
        .unwrap();

    assert!(registry.get("flaky").is_err());
    // Nothing was cached; the next request produces again.
    assert_eq!(registry.get("flaky").unwrap(), Value::Int(2));
}
