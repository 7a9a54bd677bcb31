// acta/src/processor/descriptor.rs

//! Declared activity metadata: parameter defaults and the optional body
//! callable, registered at startup instead of resolved by reflection.
//! Also hosts the pluggable default-filling seam (`ArgumentResolver`).

use crate::core::activity::Activity;
use crate::core::arguments::{ArgValue, Arguments};
use crate::core::shared::Shared;
use crate::error::ActaError;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Type alias for an activity body callable.
///
/// A body is an asynchronous function invoked once per execution with the
/// activity, the target, the effective argument bag, and the execution's
/// cancellation token (the timeout-linked child token when a timeout is
/// configured). It resolves to the produced value, or to the body's own
/// error type `Err`.
pub type ActivityBody<T, Err> = Arc<
  dyn Fn(
      Shared<Activity>,
      Shared<T>,
      Arguments,
      CancellationToken,
    ) -> Pin<Box<dyn Future<Output = Result<ArgValue, Err>> + Send>>
    + Send
    + Sync,
>;

/// Declared metadata for one activity kind: argument defaults and, for
/// activities with a body, the callable that executes it.
///
/// Descriptors are built at startup and registered with an
/// [`ActivityRegistry`](crate::registry::ActivityRegistry). An activity
/// without a body is legal; executing it produces an empty value.
pub struct ActivityDescriptor<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  kind: String,
  defaults: Arguments,
  body: Option<ActivityBody<T, Err>>,
}

impl<T, Err> ActivityDescriptor<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  pub fn new(kind: impl Into<String>) -> Self {
    Self {
      kind: kind.into(),
      defaults: Arguments::new(),
      body: None,
    }
  }

  /// Declares a default value for a named argument.
  pub fn with_default<V: Any + Send + Sync>(mut self, name: impl Into<String>, value: V) -> Self {
    self.defaults.set(name, value);
    self
  }

  /// Attaches the body callable.
  pub fn with_body<F, Fut>(mut self, body_fn: F) -> Self
  where
    F: Fn(Shared<Activity>, Shared<T>, Arguments, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ArgValue, Err>> + Send + 'static,
  {
    let body: ActivityBody<T, Err> = Arc::new(move |activity, target, arguments, token| {
      Box::pin(body_fn(activity, target, arguments, token))
    });
    self.body = Some(body);
    self
  }

  pub fn kind(&self) -> &str {
    &self.kind
  }

  pub fn defaults(&self) -> &Arguments {
    &self.defaults
  }

  pub(crate) fn body(&self) -> Option<&ActivityBody<T, Err>> {
    self.body.as_ref()
  }
}

impl<T, Err> fmt::Debug for ActivityDescriptor<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ActivityDescriptor")
      .field("kind", &self.kind)
      .field("defaults", &self.defaults)
      .field("body_present", &self.body.is_some())
      .finish()
  }
}

/// Computes the effective argument bag for one execution.
///
/// Default-filling is a seam: the processor guarantees that *some* non-null
/// bag reaches the body and the behaviors, but how declared defaults, the
/// activity instance's own bag, and the explicit call arguments are layered
/// is swappable via [`ActivityProcessor::with_resolver`](crate::processor::execution::ActivityProcessor::with_resolver).
pub trait ArgumentResolver: Send + Sync {
  fn resolve(&self, declared: &Arguments, instance: &Arguments, supplied: Option<Arguments>) -> Arguments;
}

/// The shipped resolver: explicit call arguments over the activity
/// instance's bag over the descriptor's declared defaults.
pub struct LayeredArgumentResolver;

impl ArgumentResolver for LayeredArgumentResolver {
  fn resolve(&self, declared: &Arguments, instance: &Arguments, supplied: Option<Arguments>) -> Arguments {
    let base = instance.merge_over(declared);
    match supplied {
      Some(explicit) => explicit.merge_over(&base),
      None => base,
    }
  }
}
