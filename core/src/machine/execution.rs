// acta/src/machine/execution.rs

//! Contains `StateMachine::transition`: resolution of the applicable
//! transition descriptor, positional parameter binding, invocation, and the
//! commit of the target's state strictly after a successful invocation.

use crate::core::arguments::{ArgValue, ArgumentBag, Arguments};
use crate::core::shared::Shared;
use crate::error::ActaError;
use crate::machine::context::TransitionContext;
use crate::machine::transition::{ParameterDef, ParameterKind, TransitionDef, TransitionOutcome};
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{event, instrument, Level};

/// Read/write access to the target's declared state-holding property.
///
/// The explicit seam replacing reflected property lookup: a target declares
/// where its state lives by implementing this trait.
pub trait StateHolder<S>: Send + Sync
where
  S: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
{
  fn current_state(&self) -> S;
  fn set_state(&mut self, next: S);
}

/// The declared transition set for one kind of target: a fixed directed
/// multigraph of `(from-set, to)` edges, built at startup.
pub struct MachineDescriptor<T, S, Err>
where
  T: 'static + Send + Sync,
  S: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  transitions: Vec<Arc<TransitionDef<T, S, Err>>>,
}

impl<T, S, Err> MachineDescriptor<T, S, Err>
where
  T: 'static + Send + Sync,
  S: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      transitions: Vec::new(),
    }
  }

  /// Adds a declared transition.
  pub fn transition(mut self, def: TransitionDef<T, S, Err>) -> Self {
    self.transitions.push(Arc::new(def));
    self
  }

  pub fn transitions(&self) -> &[Arc<TransitionDef<T, S, Err>>] {
    &self.transitions
  }
}

impl<T, S, Err> Default for MachineDescriptor<T, S, Err>
where
  T: 'static + Send + Sync,
  S: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

/// Validates and performs declared state transitions on a target.
///
/// The machine is stateless across calls beyond the live value of the
/// target's state property, which it reads once to resolve a transition and
/// writes at most once on success. Concurrent calls against the same target
/// are not synchronized here and must be serialized by the caller if
/// required.
pub struct StateMachine<T, S, Err>
where
  T: StateHolder<S> + 'static + Send + Sync,
  S: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  target: Shared<T>,
  descriptor: Arc<MachineDescriptor<T, S, Err>>,
}

impl<T, S, Err> StateMachine<T, S, Err>
where
  T: StateHolder<S> + 'static + Send + Sync,
  S: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  pub fn new(target: Shared<T>, descriptor: Arc<MachineDescriptor<T, S, Err>>) -> Self {
    Self { target, descriptor }
  }

  pub fn target(&self) -> &Shared<T> {
    &self.target
  }

  pub fn descriptor(&self) -> &Arc<MachineDescriptor<T, S, Err>> {
    &self.descriptor
  }

  /// The target's live state. Read from the state-holding property on every
  /// call, never cached.
  pub fn current_state(&self) -> S {
    self.target.read().current_state()
  }

  /// Resolves the transition descriptor a context applies to, without
  /// invoking anything or mutating any state.
  ///
  /// Resolution is deterministic for a fixed current state and declared
  /// transition set: a supplied descriptor is validated against the current
  /// state (and against `to`, if both are present); otherwise the declared
  /// set is scanned for edges matching `(current, to)`. Zero matches and
  /// contradictory requests are invalid-transition errors; more than one
  /// match is an ambiguous-transition error naming every candidate, which
  /// the caller resolves by supplying an explicit descriptor.
  pub fn resolve(&self, context: &TransitionContext<T, S, Err>) -> Result<Arc<TransitionDef<T, S, Err>>, ActaError> {
    let current = self.current_state();

    if let Some(info) = &context.transition {
      if let Some(to) = &context.to {
        if to != info.to() {
          return Err(ActaError::InvalidTransition {
            to: format!("{to:?}"),
            reason: format!(
              "requested destination contradicts supplied transition '{}' (declared destination {:?})",
              info.name(),
              info.to()
            ),
          });
        }
      }
      if !info.applies_from(&current) {
        return Err(ActaError::InvalidTransition {
          to: format!("{:?}", info.to()),
          reason: format!(
            "transition '{}' does not apply from current state {:?}",
            info.name(),
            current
          ),
        });
      }
      return Ok(Arc::clone(info));
    }

    let Some(to) = &context.to else {
      return Err(ActaError::InvalidTransition {
        to: "<none>".to_string(),
        reason: "no destination state or transition descriptor supplied".to_string(),
      });
    };

    let matches: Vec<Arc<TransitionDef<T, S, Err>>> = self
      .descriptor
      .transitions()
      .iter()
      .filter(|t| t.to() == to && t.applies_from(&current))
      .cloned()
      .collect();

    match matches.len() {
      0 => Err(ActaError::InvalidTransition {
        to: format!("{to:?}"),
        reason: format!("no declared transition from current state {current:?}"),
      }),
      1 => Ok(matches.into_iter().next().unwrap()),
      _ => {
        let candidates = matches.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ");
        Err(ActaError::AmbiguousTransition {
          to: format!("{to:?}"),
          candidates,
        })
      }
    }
  }

  /// Resolves and performs exactly one state transition.
  ///
  /// On success the target's state property is set to the resolved
  /// transition's declared destination, strictly after the invocation
  /// returns. On any failure (resolution or invocation) no state mutation
  /// occurs; invocation failures are logged with transition context and
  /// rethrown unmodified. The caller's token is forwarded to the underlying
  /// logic via parameter binding; the machine applies no timeout of its own.
  #[instrument(
        name = "StateMachine::transition",
        skip_all,
        fields(
            target_type = %std::any::type_name::<T>(),
            state_type = %std::any::type_name::<S>(),
        ),
        err(Display)
    )]
  pub async fn transition(
    &self,
    context: TransitionContext<T, S, Err>,
    token: CancellationToken,
  ) -> Result<TransitionOutcome, Err> {
    let resolved = self.resolve(&context).map_err(Err::from)?;
    event!(Level::DEBUG, transition = %resolved.name(), to = ?resolved.to(), "Transition resolved.");

    let bound = bind_parameters(resolved.parameters(), &context.arguments, &token);

    match (resolved.handler())(self.target.clone(), bound).await {
      Ok(outcome) => {
        self.target.write().set_state(resolved.to().clone());
        event!(Level::DEBUG, transition = %resolved.name(), to = ?resolved.to(), "Transition committed.");
        Ok(outcome)
      }
      Err(e) => {
        event!(
          Level::ERROR,
          target_type = %std::any::type_name::<T>(),
          to = ?resolved.to(),
          transition = %resolved.name(),
          error = %e,
          "Transition invocation failed; target state left untouched."
        );
        Err(e)
      }
    }
  }
}

/// Binds argument values to a declared parameter list, in declaration order:
/// a same-named entry from the bag, else the call's cancellation token for
/// token-kind parameters, else the empty value.
fn bind_parameters(parameters: &[ParameterDef], arguments: &Arguments, token: &CancellationToken) -> Vec<ArgValue> {
  parameters
    .iter()
    .map(|parameter| {
      if let Some(value) = arguments.get_raw(&parameter.name) {
        value.clone()
      } else if parameter.kind == ParameterKind::CancellationToken {
        ArgValue::of(token.clone())
      } else {
        ArgValue::none()
      }
    })
    .collect()
}
