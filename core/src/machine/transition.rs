// acta/src/machine/transition.rs

//! Declared transition metadata: the `(name, from-set, to, parameters)`
//! descriptor for one legal state change, its handler callable, and the
//! `TransitionOutcome` sum type every handler resolves to.

use crate::core::arguments::ArgValue;
use crate::core::shared::Shared;
use crate::error::ActaError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Declared kind of one transition parameter. `CancellationToken` parameters
/// with no same-named argument receive the call's token at binding time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
  Value,
  CancellationToken,
}

/// One declared parameter of a transition's underlying logic. Parameters are
/// bound in declaration order.
#[derive(Debug, Clone)]
pub struct ParameterDef {
  pub name: String,
  pub kind: ParameterKind,
}

impl ParameterDef {
  pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
    Self {
      name: name.into(),
      kind,
    }
  }
}

/// What a transition's underlying logic produced.
///
/// Every handler returns this one shape, whether its logic is effectively
/// synchronous or asynchronous: `Empty` for completion-signal transitions,
/// `Value` for those that produce a result.
#[derive(Debug, Clone)]
pub enum TransitionOutcome {
  Empty,
  Value(ArgValue),
}

impl TransitionOutcome {
  pub fn value(&self) -> Option<&ArgValue> {
    match self {
      TransitionOutcome::Empty => None,
      TransitionOutcome::Value(v) => Some(v),
    }
  }

  pub fn into_value(self) -> Option<ArgValue> {
    match self {
      TransitionOutcome::Empty => None,
      TransitionOutcome::Value(v) => Some(v),
    }
  }
}

/// Type alias for a transition handler.
///
/// A handler is an asynchronous function over the shared target and the
/// positionally bound argument values (one per declared parameter, in
/// declaration order).
pub type TransitionHandler<T, Err> = Arc<
  dyn Fn(Shared<T>, Vec<ArgValue>) -> Pin<Box<dyn Future<Output = Result<TransitionOutcome, Err>> + Send>>
    + Send
    + Sync,
>;

/// Declared metadata for one legal state change: from which states it
/// applies, the destination state it commits, its name, and its parameter
/// signature.
pub struct TransitionDef<T, S, Err>
where
  T: 'static + Send + Sync,
  S: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  name: String,
  from: Vec<S>,
  to: S,
  parameters: Vec<ParameterDef>,
  handler: TransitionHandler<T, Err>,
}

impl<T, S, Err> TransitionDef<T, S, Err>
where
  T: 'static + Send + Sync,
  S: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  pub fn new<F, Fut>(name: impl Into<String>, from: &[S], to: S, handler_fn: F) -> Self
  where
    F: Fn(Shared<T>, Vec<ArgValue>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<TransitionOutcome, Err>> + Send + 'static,
  {
    let handler: TransitionHandler<T, Err> =
      Arc::new(move |target, arguments| Box::pin(handler_fn(target, arguments)));
    Self {
      name: name.into(),
      from: from.to_vec(),
      to,
      parameters: Vec::new(),
      handler,
    }
  }

  /// Appends a declared parameter. Declaration order is binding order.
  pub fn with_parameter(mut self, name: impl Into<String>, kind: ParameterKind) -> Self {
    self.parameters.push(ParameterDef::new(name, kind));
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn from(&self) -> &[S] {
    &self.from
  }

  pub fn to(&self) -> &S {
    &self.to
  }

  pub fn parameters(&self) -> &[ParameterDef] {
    &self.parameters
  }

  pub fn applies_from(&self, state: &S) -> bool {
    self.from.contains(state)
  }

  pub(crate) fn handler(&self) -> &TransitionHandler<T, Err> {
    &self.handler
  }
}

// The handler (Arc<dyn Fn...>) doesn't implement Debug; print its presence
// alongside the declared metadata.
impl<T, S, Err> fmt::Debug for TransitionDef<T, S, Err>
where
  T: 'static + Send + Sync,
  S: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TransitionDef")
      .field("name", &self.name)
      .field("from", &self.from)
      .field("to", &self.to)
      .field("parameters", &self.parameters)
      .finish()
  }
}
