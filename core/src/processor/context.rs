// acta/src/processor/context.rs

//! The scoped execution state for one `ActivityProcessor::execute` call.

use crate::core::activity::Activity;
use crate::core::arguments::{ArgValue, Arguments};
use crate::core::shared::Shared;
use crate::error::ActaError;
use std::time::Duration;

/// Carrier for one activity execution: the activity and target being operated
/// on, the effective (post-default-filling) arguments, an optional timeout,
/// and the captured outcome.
///
/// A context is built by the processor per call, shared with behaviors as
/// `Shared<ActivityContext<T, Err>>`, and drained on every exit path.
///
/// `result` and `error` are independently settable; the engine does not
/// enforce mutual exclusivity, and an after-phase behavior may observe both
/// populated (e.g. a partial result alongside a captured failure).
pub struct ActivityContext<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  pub activity: Shared<Activity>,
  pub target: Shared<T>,
  /// Effective arguments; some non-empty-or-empty bag is always present.
  pub arguments: Arguments,
  /// Body timeout. `None` or zero means the body runs unbounded.
  pub timeout: Option<Duration>,
  /// Output value, set once the body succeeds.
  pub result: Option<ArgValue>,
  /// Captured failure, rethrown to the caller after the after-phase runs.
  pub error: Option<Err>,
}

impl<T, Err> ActivityContext<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  pub(crate) fn new(activity: Shared<Activity>, target: Shared<T>, arguments: Arguments) -> Self {
    Self {
      activity,
      target,
      arguments,
      timeout: None,
      result: None,
      error: None,
    }
  }

  pub fn set_timeout(&mut self, timeout: Duration) {
    self.timeout = Some(timeout);
  }

  /// True once a failure has been captured for this execution.
  pub fn is_faulted(&self) -> bool {
    self.error.is_some()
  }
}
