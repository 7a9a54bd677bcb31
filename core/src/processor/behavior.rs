// acta/src/processor/behavior.rs

//! The `ActivityBehavior` interceptor trait and its registration metadata.
//!
//! Behaviors wrap activity execution onion-style: `before_execute` runs in
//! ascending priority order, `after_execute` in the exact reverse of that
//! same order, so the highest-priority behavior wraps all others.

use crate::core::shared::Shared;
use crate::error::ActaError;
use crate::processor::context::ActivityContext;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// A polymorphic interceptor invoked around one activity execution.
///
/// Both hooks receive the shared execution context and default to no-ops, so
/// an implementor overrides only the side it cares about. `after_execute`
/// runs whether the body succeeded or failed and observes the populated
/// result-or-error context.
#[async_trait]
pub trait ActivityBehavior<T, Err>: Send + Sync
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  async fn before_execute(&self, _context: Shared<ActivityContext<T, Err>>) -> Result<(), Err> {
    Ok(())
  }

  async fn after_execute(&self, _context: Shared<ActivityContext<T, Err>>) -> Result<(), Err> {
    Ok(())
  }
}

/// One behavior registration: the behavior instance, an optional activity
/// kind filter (`None` applies to every kind), and the ordering priority.
pub struct BehaviorRegistration<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  pub behavior: Arc<dyn ActivityBehavior<T, Err>>,
  pub kind: Option<String>,
  pub priority: i32,
}

impl<T, Err> BehaviorRegistration<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  pub fn applies_to(&self, kind: &str) -> bool {
    match &self.kind {
      None => true,
      Some(filter) => filter == kind,
    }
  }
}

impl<T, Err> Clone for BehaviorRegistration<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  fn clone(&self) -> Self {
    Self {
      behavior: Arc::clone(&self.behavior),
      kind: self.kind.clone(),
      priority: self.priority,
    }
  }
}

impl<T, Err> fmt::Debug for BehaviorRegistration<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BehaviorRegistration")
      .field("kind", &self.kind)
      .field("priority", &self.priority)
      .finish()
  }
}
