// acta/src/processor/execution.rs

//! Contains `ActivityProcessor` and its `execute` methods: one activity, one
//! target, one argument bag, run through the ordered behavior pipeline under
//! an optional timeout.

use crate::core::activity::Activity;
use crate::core::arguments::{ArgValue, Arguments};
use crate::core::shared::Shared;
use crate::error::ActaError;
use crate::processor::context::ActivityContext;
use crate::processor::descriptor::{ActivityBody, ArgumentResolver, LayeredArgumentResolver};
use crate::registry::{ActivityRegistry, BehaviorRegistry};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{event, instrument, Level};

/// How the body phase ended; decides the activity's terminal state once the
/// after-phase has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyDisposition {
  Succeeded,
  Faulted,
  Canceled,
}

/// The orchestrator: resolves the activity's descriptor and applicable
/// behaviors, computes effective arguments, runs the body (racing a timeout
/// if one is configured), and sequences the before/after behavior calls.
///
/// `Err` is the error type returned by bodies and behaviors; it must be
/// constructible from [`ActaError`] so framework failures (unknown kind,
/// timeout, cancellation) travel the same channel.
pub struct ActivityProcessor<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  activities: Arc<ActivityRegistry<T, Err>>,
  behaviors: Arc<BehaviorRegistry<T, Err>>,
  resolver: Arc<dyn ArgumentResolver>,
}

impl<T, Err> ActivityProcessor<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<ActaError> + Send + Sync + 'static,
{
  pub fn new(activities: Arc<ActivityRegistry<T, Err>>, behaviors: Arc<BehaviorRegistry<T, Err>>) -> Self {
    Self {
      activities,
      behaviors,
      resolver: Arc::new(LayeredArgumentResolver),
    }
  }

  /// Swaps the default-filling strategy.
  pub fn with_resolver(mut self, resolver: Arc<dyn ArgumentResolver>) -> Self {
    self.resolver = resolver;
    self
  }

  pub fn activities(&self) -> &Arc<ActivityRegistry<T, Err>> {
    &self.activities
  }

  pub fn behaviors(&self) -> &Arc<BehaviorRegistry<T, Err>> {
    &self.behaviors
  }

  /// Executes `activity` against `target` with optional explicit arguments.
  ///
  /// Returns the produced value, or the captured failure after the
  /// after-phase has run. See [`ActivityProcessor::execute_with`].
  pub async fn execute(
    &self,
    activity: Shared<Activity>,
    target: Shared<T>,
    arguments: Option<Arguments>,
    token: CancellationToken,
  ) -> Result<ArgValue, Err> {
    self.execute_with(activity, target, arguments, |_| {}, token).await
  }

  /// Like [`ActivityProcessor::execute`], with a `configure` hook that may
  /// mutate the freshly built context (e.g. set a timeout) before execution
  /// begins.
  ///
  /// Ordering guarantees: before-behaviors run strictly in ascending
  /// priority order; after-behaviors run in the exact reverse of that same
  /// computed order, unconditionally. Cancellation is checked at every phase
  /// boundary. The context is drained on every exit path.
  #[instrument(
        name = "ActivityProcessor::execute",
        skip_all,
        fields(
            target_type = %std::any::type_name::<T>(),
            error_type = %std::any::type_name::<Err>(),
        ),
        err(Display)
    )]
  pub async fn execute_with<F>(
    &self,
    activity: Shared<Activity>,
    target: Shared<T>,
    arguments: Option<Arguments>,
    configure: F,
    token: CancellationToken,
  ) -> Result<ArgValue, Err>
  where
    F: FnOnce(&mut ActivityContext<T, Err>),
  {
    let kind = activity.read().kind().to_string();
    event!(Level::DEBUG, activity_kind = %kind, "Activity execution starting.");

    // Descriptor lookup fails before any context is built.
    self.check_cancellation(&token, "resolve_descriptor")?;
    let descriptor = self.activities.lookup(&kind).ok_or_else(|| {
      event!(Level::ERROR, activity_kind = %kind, "No descriptor registered for activity kind.");
      Err::from(ActaError::UnknownActivity { kind: kind.clone() })
    })?;

    self.check_cancellation(&token, "resolve_arguments")?;
    let effective = {
      let activity_guard = activity.read();
      self
        .resolver
        .resolve(descriptor.defaults(), activity_guard.arguments(), arguments)
    };

    let mut context = ActivityContext::new(activity.clone(), target.clone(), effective);
    configure(&mut context);
    let timeout = context.timeout.filter(|t| !t.is_zero());

    self.check_cancellation(&token, "resolve_behaviors")?;
    let behaviors = self.behaviors.for_kind(&kind);
    event!(Level::DEBUG, behavior_count = behaviors.len(), "Behaviors resolved.");

    self.check_cancellation(&token, "execute")?;
    activity.write().mark_running();
    let context = Shared::new(context);

    // BEFORE phase, ascending priority. A failure here propagates without
    // entering the body or the after-phase and is not captured on the
    // context.
    for (behavior_index, behavior) in behaviors.iter().enumerate() {
      event!(Level::TRACE, behavior_index, "Executing 'before' behavior.");
      if let Err(e) = behavior.before_execute(context.clone()).await {
        event!(Level::ERROR, behavior_index, error = %e, "'before' behavior failed.");
        activity.write().mark_faulted();
        return Err(e);
      }
    }

    // BODY phase. Failures are captured on the context, not rethrown yet.
    let (captured, disposition) = match descriptor.body() {
      None => {
        event!(Level::DEBUG, "Activity has no body; producing an empty value.");
        (Ok(ArgValue::none()), BodyDisposition::Succeeded)
      }
      Some(body) => {
        let bound_arguments = context.read().arguments.clone();
        match timeout {
          None => {
            let outcome = body(activity.clone(), target.clone(), bound_arguments, token.clone()).await;
            let disposition = if outcome.is_ok() {
              BodyDisposition::Succeeded
            } else {
              BodyDisposition::Faulted
            };
            (outcome, disposition)
          }
          Some(limit) => {
            self
              .race_body_against_timeout(body, &activity, &target, bound_arguments, &kind, limit, &token)
              .await
          }
        }
      }
    };

    {
      let mut guard = context.write();
      match captured {
        Ok(value) => guard.result = Some(value),
        Err(e) => guard.error = Some(e),
      }
    }

    // AFTER phase, exact reverse of the before order, runs whether the body
    // succeeded or failed.
    for (behavior_index, behavior) in behaviors.iter().enumerate().rev() {
      event!(Level::TRACE, behavior_index, "Executing 'after' behavior.");
      if let Err(e) = behavior.after_execute(context.clone()).await {
        event!(Level::ERROR, behavior_index, error = %e, "'after' behavior failed.");
        activity.write().mark_faulted();
        return Err(e);
      }
    }

    // Drain the context; rethrow the captured failure or return the value.
    let (result, error) = {
      let mut guard = context.write();
      (guard.result.take(), guard.error.take())
    };

    match error {
      Some(e) => {
        if disposition == BodyDisposition::Canceled {
          activity.write().mark_canceled();
        } else {
          activity.write().mark_faulted();
        }
        event!(Level::DEBUG, activity_kind = %kind, "Activity execution failed; rethrowing captured error.");
        Err(e)
      }
      None => {
        let value = result.unwrap_or_else(ArgValue::none);
        activity.write().mark_completed(value.clone());
        event!(Level::DEBUG, activity_kind = %kind, "Activity execution completed.");
        Ok(value)
      }
    }
  }

  /// Races the body task against the configured timeout and the caller's
  /// cancellation.
  ///
  /// The body runs under a child of the caller's token; a watchdog fires
  /// that child at `limit + 100ms` so the delay below always decides the
  /// race and a body that loses it still receives a cancellation signal.
  /// The losing body task is not awaited further.
  async fn race_body_against_timeout(
    &self,
    body: &ActivityBody<T, Err>,
    activity: &Shared<Activity>,
    target: &Shared<T>,
    arguments: Arguments,
    kind: &str,
    limit: Duration,
    token: &CancellationToken,
  ) -> (Result<ArgValue, Err>, BodyDisposition) {
    let linked = token.child_token();

    let grace = limit + Duration::from_millis(100);
    {
      let watchdog = linked.clone();
      tokio::spawn(async move {
        tokio::select! {
          _ = tokio::time::sleep(grace) => watchdog.cancel(),
          _ = watchdog.cancelled() => {}
        }
      });
    }

    let mut body_task = tokio::spawn(body(activity.clone(), target.clone(), arguments, linked.clone()));

    tokio::select! {
      joined = &mut body_task => {
        linked.cancel();
        match joined {
          Ok(Ok(value)) => (Ok(value), BodyDisposition::Succeeded),
          Ok(Err(e)) => (Err(e), BodyDisposition::Faulted),
          Err(join_err) => (
            Err(Err::from(ActaError::Internal(format!(
              "activity body task failed: {join_err}"
            )))),
            BodyDisposition::Faulted,
          ),
        }
      }
      _ = tokio::time::sleep(limit) => {
        event!(Level::WARN, activity_kind = %kind, timeout = ?limit, "Activity body timed out; abandoning its task.");
        (
          Err(Err::from(ActaError::Timeout {
            kind: kind.to_string(),
            timeout: limit,
          })),
          BodyDisposition::Faulted,
        )
      }
      _ = token.cancelled() => {
        event!(Level::DEBUG, activity_kind = %kind, "Caller canceled during body execution.");
        (
          Err(Err::from(ActaError::Canceled {
            phase: "execute".to_string(),
          })),
          BodyDisposition::Canceled,
        )
      }
    }
  }

  fn check_cancellation(&self, token: &CancellationToken, phase: &str) -> Result<(), Err> {
    if token.is_cancelled() {
      event!(Level::DEBUG, phase, "Cancellation observed at phase boundary.");
      return Err(Err::from(ActaError::Canceled {
        phase: phase.to_string(),
      }));
    }
    Ok(())
  }
}
