// acta/src/core/arguments.rs

//! Named, type-erased argument bags handed to activity bodies, behaviors and
//! transition handlers, plus the `ArgValue` cell they store.

use crate::error::{ActaError, ActaResult};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A cheaply clonable, type-erased argument value.
///
/// Values are stored behind `Arc<dyn Any + Send + Sync>`; consumers downcast
/// to the concrete type they expect. `ArgValue::none()` is the designated
/// empty value (a unit payload) used when a declared parameter has no bound
/// argument and for activities that produce no result.
#[derive(Clone)]
pub struct ArgValue(Arc<dyn Any + Send + Sync>);

impl ArgValue {
  pub fn of<V: Any + Send + Sync>(value: V) -> Self {
    ArgValue(Arc::new(value))
  }

  /// The empty value. `is_none` is true only for values built here.
  pub fn none() -> Self {
    ArgValue(Arc::new(()))
  }

  pub fn is_none(&self) -> bool {
    self.0.is::<()>()
  }

  pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
    self.0.downcast_ref::<V>()
  }

  /// Clones the payload out, if it is a `V`.
  pub fn get<V: Any + Clone>(&self) -> Option<V> {
    self.downcast_ref::<V>().cloned()
  }
}

impl fmt::Debug for ArgValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_none() {
      write!(f, "ArgValue(none)")
    } else {
      write!(f, "ArgValue(..)")
    }
  }
}

/// Get/set-by-name access to a named argument bag.
///
/// The concrete map behind an implementation is an implementation detail;
/// insertion order is irrelevant everywhere bags are consumed.
pub trait ArgumentBag {
  fn get_raw(&self, name: &str) -> Option<&ArgValue>;
  fn set_raw(&mut self, name: &str, value: ArgValue);
  fn contains(&self, name: &str) -> bool;
}

/// The concrete argument bag used throughout the engine.
#[derive(Clone, Default)]
pub struct Arguments {
  values: HashMap<String, ArgValue>,
}

impl Arguments {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets a typed value under `name`, replacing any previous entry.
  pub fn set<V: Any + Send + Sync>(&mut self, name: impl Into<String>, value: V) {
    self.values.insert(name.into(), ArgValue::of(value));
  }

  /// Fluent variant of [`Arguments::set`].
  pub fn with<V: Any + Send + Sync>(mut self, name: impl Into<String>, value: V) -> Self {
    self.set(name, value);
    self
  }

  /// Clones the value under `name` out of the bag, if present and a `V`.
  pub fn get<V: Any + Clone>(&self, name: &str) -> Option<V> {
    self.values.get(name).and_then(|v| v.get::<V>())
  }

  /// Like [`Arguments::get`], but a missing or differently-typed entry is an
  /// error instead of `None`.
  pub fn require<V: Any + Clone>(&self, name: &str) -> ActaResult<V> {
    self.get::<V>(name).ok_or_else(|| ActaError::ArgumentTypeMismatch {
      name: name.to_string(),
      expected_type: std::any::type_name::<V>().to_string(),
    })
  }

  /// Returns a new bag with every entry of `self` layered over `defaults`.
  /// Entries of `self` win on name collisions.
  pub fn merge_over(&self, defaults: &Arguments) -> Arguments {
    let mut merged = defaults.clone();
    for (name, value) in &self.values {
      merged.values.insert(name.clone(), value.clone());
    }
    merged
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.values.keys().map(|k| k.as_str())
  }
}

impl ArgumentBag for Arguments {
  fn get_raw(&self, name: &str) -> Option<&ArgValue> {
    self.values.get(name)
  }

  fn set_raw(&mut self, name: &str, value: ArgValue) {
    self.values.insert(name.to_string(), value);
  }

  fn contains(&self, name: &str) -> bool {
    self.values.contains_key(name)
  }
}

impl fmt::Debug for Arguments {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.values.iter()).finish()
  }
}
