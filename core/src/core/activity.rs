// acta/src/core/activity.rs

//! The `Activity` data holder: one unit of work with a declared kind, an
//! argument bag, a produced value, and progress/timing telemetry.
//!
//! An `Activity` has no behavior of its own beyond bookkeeping. It is created
//! by the caller, mutated exclusively by the `ActivityProcessor` during one
//! execution, and must not be reused concurrently by two executions.

use crate::core::arguments::{ArgValue, Arguments};
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::time::{Duration, Instant};

/// Lifecycle of one activity execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationState {
  #[default]
  NotStarted,
  Running,
  Completed,
  Faulted,
  Canceled,
}

pub struct Activity {
  /// Declared activity kind; keys descriptor lookup and behavior filtering.
  kind: String,
  state: OperationState,
  /// Per-instance arguments, layered between the descriptor's declared
  /// defaults and the explicit arguments of one `execute` call.
  arguments: Arguments,
  /// Produced result; meaningful only when `state == Completed`.
  value: Option<ArgValue>,
  percent_completed: u8,
  started_at: Option<Instant>,
  ended_at: Option<Instant>,
  frozen_elapsed: Option<Duration>,
  /// Append-only diagnostic/progress messages. The one structure on an
  /// activity that is safe for concurrent append through `&self`.
  messages: Mutex<Vec<String>>,
}

impl Activity {
  pub fn new(kind: impl Into<String>) -> Self {
    Self {
      kind: kind.into(),
      state: OperationState::default(),
      arguments: Arguments::new(),
      value: None,
      percent_completed: 0,
      started_at: None,
      ended_at: None,
      frozen_elapsed: None,
      messages: Mutex::new(Vec::new()),
    }
  }

  /// Fluent per-instance argument.
  pub fn with_argument<V: Any + Send + Sync>(mut self, name: impl Into<String>, value: V) -> Self {
    self.arguments.set(name, value);
    self
  }

  pub fn kind(&self) -> &str {
    &self.kind
  }

  pub fn state(&self) -> OperationState {
    self.state
  }

  pub fn arguments(&self) -> &Arguments {
    &self.arguments
  }

  pub fn value(&self) -> Option<&ArgValue> {
    self.value.as_ref()
  }

  pub fn percent_completed(&self) -> u8 {
    self.percent_completed
  }

  pub fn set_progress(&mut self, percent: u8) {
    self.percent_completed = percent.min(100);
  }

  pub fn started_at(&self) -> Option<Instant> {
    self.started_at
  }

  pub fn ended_at(&self) -> Option<Instant> {
    self.ended_at
  }

  /// Elapsed execution time: live-computed from `started_at` while running,
  /// frozen once the execution ends, zero before it starts.
  pub fn elapsed(&self) -> Duration {
    if let Some(frozen) = self.frozen_elapsed {
      return frozen;
    }
    self.started_at.map(|s| s.elapsed()).unwrap_or_default()
  }

  /// Appends a diagnostic message. Takes `&self`; safe to call from
  /// concurrently running behaviors and bodies.
  pub fn add_message(&self, text: impl Into<String>) {
    self.messages.lock().push(text.into());
  }

  /// Snapshot of the message list in append order.
  pub fn messages(&self) -> Vec<String> {
    self.messages.lock().clone()
  }

  pub(crate) fn mark_running(&mut self) {
    self.state = OperationState::Running;
    self.started_at = Some(Instant::now());
  }

  pub(crate) fn mark_completed(&mut self, value: ArgValue) {
    self.state = OperationState::Completed;
    self.value = Some(value);
    self.percent_completed = 100;
    self.freeze_clock();
  }

  pub(crate) fn mark_faulted(&mut self) {
    self.state = OperationState::Faulted;
    self.freeze_clock();
  }

  pub(crate) fn mark_canceled(&mut self) {
    self.state = OperationState::Canceled;
    self.freeze_clock();
  }

  fn freeze_clock(&mut self) {
    let now = Instant::now();
    self.ended_at = Some(now);
    self.frozen_elapsed = self.started_at.map(|started| now - started);
  }
}

impl fmt::Debug for Activity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Activity")
      .field("kind", &self.kind)
      .field("state", &self.state)
      .field("arguments", &self.arguments)
      .field("value_present", &self.value.is_some())
      .field("percent_completed", &self.percent_completed)
      .field("message_count", &self.messages.lock().len())
      .finish()
  }
}
