// acta/src/registry.rs

//! The collaborator registries consumed by the `ActivityProcessor`:
//! `ActivityRegistry` (declared activity descriptors, keyed by kind) and
//! `BehaviorRegistry` (behavior registrations, filterable by activity kind
//! and ordered by priority). Both are built at startup, replacing the
//! reflection-based metadata lookup of ambient-container frameworks.

use crate::error::ActaError;
use crate::processor::behavior::{ActivityBehavior, BehaviorRegistration};
use crate::processor::descriptor::ActivityDescriptor;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{event, Level};

/// Registry of declared activity descriptors, keyed by activity kind.
pub struct ActivityRegistry<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  descriptors: Mutex<HashMap<String, Arc<ActivityDescriptor<T, Err>>>>,
}

impl<T, Err> ActivityRegistry<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  /// Creates a new, empty registry.
  pub fn new() -> Self {
    Self {
      descriptors: Mutex::new(HashMap::new()),
    }
  }

  /// Registers a descriptor under its kind. A later registration for the
  /// same kind replaces the earlier one.
  pub fn register(&self, descriptor: ActivityDescriptor<T, Err>) {
    event!(Level::DEBUG, kind = %descriptor.kind(), "Registering activity descriptor.");
    self
      .descriptors
      .lock()
      .unwrap()
      .insert(descriptor.kind().to_string(), Arc::new(descriptor));
  }

  pub fn lookup(&self, kind: &str) -> Option<Arc<ActivityDescriptor<T, Err>>> {
    let found = self.descriptors.lock().unwrap().get(kind).cloned();
    if found.is_none() {
      event!(Level::DEBUG, kind, "Activity descriptor lookup missed.");
    }
    found
  }

  pub fn len(&self) -> usize {
    self.descriptors.lock().unwrap().len()
  }

  pub fn is_empty(&self) -> bool {
    self.descriptors.lock().unwrap().is_empty()
  }
}

impl<T, Err> Default for ActivityRegistry<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

/// Registry of behavior registrations.
///
/// `for_kind` selects registrations whose filter is `None` (applies to all)
/// or exactly matches the activity kind, sorted ascending by priority. The
/// sort is stable: registrations with equal priority keep registration
/// order.
pub struct BehaviorRegistry<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  entries: Mutex<Vec<BehaviorRegistration<T, Err>>>,
}

impl<T, Err> BehaviorRegistry<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  /// Creates a new, empty registry.
  pub fn new() -> Self {
    Self {
      entries: Mutex::new(Vec::new()),
    }
  }

  /// Registers a behavior with an optional kind filter and a priority.
  pub fn register(&self, behavior: Arc<dyn ActivityBehavior<T, Err>>, kind: Option<String>, priority: i32) {
    event!(Level::DEBUG, kind = ?kind, priority, "Registering activity behavior.");
    self.entries.lock().unwrap().push(BehaviorRegistration {
      behavior,
      kind,
      priority,
    });
  }

  /// The behaviors applicable to `kind`, in ascending priority order. The
  /// caller reverses this same list for the after-phase.
  pub fn for_kind(&self, kind: &str) -> Vec<Arc<dyn ActivityBehavior<T, Err>>> {
    let entries = self.entries.lock().unwrap();
    let mut matching: Vec<BehaviorRegistration<T, Err>> =
      entries.iter().filter(|r| r.applies_to(kind)).cloned().collect();
    matching.sort_by_key(|r| r.priority);
    matching.into_iter().map(|r| r.behavior).collect()
  }

  pub fn len(&self) -> usize {
    self.entries.lock().unwrap().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.lock().unwrap().is_empty()
  }
}

impl<T, Err> Default for BehaviorRegistry<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}
