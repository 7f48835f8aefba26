//! Key-path traversal over nested values.
//!
//! Given a root value and a sequence of keys, walks into nested structures
//! one key at a time. A traversed value's shape is not known statically, so
//! each key is tried against the supported shapes in a fixed priority order,
//! stopping at the first one that both applies and contains the key:
//!
//! 1. map lookup (exact key-existence test, so a key holding `Null` counts)
//! 2. nested registry lookup (`has`/`get`)
//! 3. indexable object lookup ([`Indexable`](crate::value::Indexable))
//! 4. accessor lookup ([`Accessor`](crate::value::Accessor))
//! 5. public-field lookup
//!
//! A shape that applies but lacks the key falls through to the next
//! strategy; when every strategy is exhausted the traversal fails with
//! [`RiggingError::KeyNotFound`] naming the key and the traversed shape.

use crate::error::{Result, RiggingError};
use crate::value::Value;

/// Resolve a sequence of keys against a root value.
pub fn traverse(root: &Value, keys: &[&str]) -> Result<Value> {
    let mut value = root.clone();
    for key in keys {
        value = traverse_key(&value, key)?;
    }
    Ok(value)
}

/// Resolve a single key against a value, trying each strategy in order.
pub fn traverse_key(value: &Value, key: &str) -> Result<Value> {
    match value {
        Value::Map(map) => {
            if let Some(found) = map.get(key) {
                return Ok(found.clone());
            }
        }
        Value::Registry(registry) => {
            if registry.has(key) {
                return registry.get(key);
            }
        }
        Value::Object(object) => {
            if let Some(indexable) = object.as_indexable() {
                if indexable.offset_exists(key) {
                    return indexable.offset_get(key);
                }
            }
            if let Some(accessor) = object.as_accessor() {
                if accessor.has(key) {
                    return accessor.get(key);
                }
            }
            if let Some(field) = object.public_field(key) {
                return Ok(field);
            }
        }
        _ => {}
    }

    Err(RiggingError::KeyNotFound {
        key: key.to_string(),
        context: value.type_label(),
    })
}
