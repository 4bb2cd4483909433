//! Client-side filter predicates for lazily-evaluated queries.
//!
//! Endpoints return unfiltered collections; narrowing always happens locally
//! after the pages are fetched and parsed. A [`Predicate`] names a field on
//! the underlying resource model and the value it must equal; queries apply
//! their predicates as a logical AND, preserving fetch order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A `{field name, expected value}` equality filter applied client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    /// Field addressed on the underlying resource model. Nested fields use
    /// `.`-separated paths.
    pub name: String,

    /// Value the field must equal.
    pub param: Value,
}

impl Predicate {
    /// Create a predicate from a field name and expected value.
    pub fn new(name: impl Into<String>, param: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            param: param.into(),
        }
    }

    /// Returns true when the item's named field equals the expected value.
    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        item.field(&self.name)
            .is_some_and(|value| value == self.param)
    }
}

/// Resources whose fields can be addressed by name for predicate evaluation.
///
/// Comparisons always operate on the parsed model's fields, never on any
/// wrapper-only state.
pub trait Filterable {
    /// Return the value of the named field, or `None` when the model has no
    /// such field.
    fn field(&self, name: &str) -> Option<Value>;
}

/// Look up a (possibly nested) field on any serializable model.
///
/// The model is serialized once and the `.`-separated path is resolved over
/// the resulting JSON, so enum-valued attributes compare in their wire
/// representation.
pub fn lookup_field<T: Serialize>(item: &T, name: &str) -> Option<Value> {
    let value = serde_json::to_value(item).ok()?;
    let pointer = format!("/{}", name.replace('.', "/"));
    value.pointer(&pointer).cloned()
}

/// Keep only the items matching every predicate, preserving order.
#[must_use]
pub fn apply_predicates<T: Filterable>(items: Vec<T>, predicates: &[Predicate]) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| predicates.iter().all(|predicate| predicate.matches(item)))
        .collect()
}
