// acta/src/machine/context.rs

//! The scoped input state for one `StateMachine::transition` call.

use crate::core::arguments::Arguments;
use crate::error::ActaError;
use crate::machine::transition::TransitionDef;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Carrier for one transition request: the requested destination state, the
/// argument bag consumed when invoking the transition's underlying logic,
/// and optionally a pre-resolved transition descriptor.
///
/// When `transition` is set it takes precedence over `to`-based resolution;
/// a `to` that disagrees with the descriptor's own destination is rejected
/// as an invalid transition.
pub struct TransitionContext<T, S, Err>
where
  T: 'static + Send + Sync,
  S: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  pub to: Option<S>,
  pub arguments: Arguments,
  pub transition: Option<Arc<TransitionDef<T, S, Err>>>,
}

impl<T, S, Err> TransitionContext<T, S, Err>
where
  T: 'static + Send + Sync,
  S: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  /// A request to reach `to`, resolved against the machine's declared
  /// transitions and current state.
  pub fn to_state(to: S) -> Self {
    Self {
      to: Some(to),
      arguments: Arguments::new(),
      transition: None,
    }
  }

  /// A request carrying an explicit, pre-resolved transition descriptor.
  pub fn for_transition(transition: Arc<TransitionDef<T, S, Err>>) -> Self {
    Self {
      to: None,
      arguments: Arguments::new(),
      transition: Some(transition),
    }
  }

  /// Also requests a destination state. Meaningful alongside
  /// [`TransitionContext::for_transition`]; the machine rejects a
  /// destination that contradicts the descriptor.
  pub fn destination(mut self, to: S) -> Self {
    self.to = Some(to);
    self
  }

  /// Fluent named argument for the transition's underlying logic.
  pub fn argument<V: Any + Send + Sync>(mut self, name: impl Into<String>, value: V) -> Self {
    self.arguments.set(name, value);
    self
  }

  /// Replaces the whole argument bag.
  pub fn with_arguments(mut self, arguments: Arguments) -> Self {
    self.arguments = arguments;
    self
  }
}

impl<T, S, Err> fmt::Debug for TransitionContext<T, S, Err>
where
  T: 'static + Send + Sync,
  S: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TransitionContext")
      .field("to", &self.to)
      .field("arguments", &self.arguments)
      .field("transition", &self.transition.as_ref().map(|t| t.name()))
      .finish()
  }
}
