// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use acta::{
  ActaError, Activity, ActivityBehavior, ActivityContext, ActivityDescriptor, ActivityProcessor, ActivityRegistry,
  ArgValue, BehaviorRegistry, Shared, StateHolder, TransitionDef, TransitionOutcome,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::Level;

// --- Common Activity Target ---
#[derive(Clone, Debug, Default)]
pub struct TestTarget {
  pub counter: i32,
  pub log: Vec<String>,
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)] // Clone, PartialEq, Eq for assertions
pub enum TestError {
  #[error("Acta framework error: {0:?}")] // Use :? for ActaError as it doesn't impl PartialEq
  Acta(String), // Store as String for Eq comparison

  #[error("Test body failed: {0}")]
  Body(String),

  #[error("Test behavior failed: {0}")]
  Behavior(String),

  #[error("Test transition failed: {0}")]
  Transition(String),
}

impl From<ActaError> for TestError {
  fn from(ae: ActaError) -> Self {
    // Simple conversion for testing, might lose some detail but good for Eq.
    // In a real app, you'd preserve more info.
    TestError::Acta(format!("{:?}", ae))
  }
}

// --- Processor Assembly Helpers ---
pub type TestRegistries = (
  Arc<ActivityRegistry<TestTarget, TestError>>,
  Arc<BehaviorRegistry<TestTarget, TestError>>,
);

pub fn registries() -> TestRegistries {
  (Arc::new(ActivityRegistry::new()), Arc::new(BehaviorRegistry::new()))
}

pub fn processor_over(registries: &TestRegistries) -> ActivityProcessor<TestTarget, TestError> {
  ActivityProcessor::new(registries.0.clone(), registries.1.clone())
}

// --- Common Descriptor Creators ---

/// Body that bumps the target counter and echoes the "input" argument back
/// as the produced value (empty value when absent).
pub fn echo_descriptor(kind: &str) -> ActivityDescriptor<TestTarget, TestError> {
  ActivityDescriptor::new(kind)
    .with_default("greeting", "hello".to_string())
    .with_body(|activity, target: Shared<TestTarget>, arguments, _token| async move {
      target.write().counter += 1;
      activity.read().add_message("echo body ran");
      match arguments.get::<String>("input") {
        Some(input) => Ok(ArgValue::of(input)),
        None => Ok(ArgValue::none()),
      }
    })
}

pub fn failing_descriptor(kind: &str, error_message: &'static str) -> ActivityDescriptor<TestTarget, TestError> {
  ActivityDescriptor::new(kind).with_body(move |_activity, target: Shared<TestTarget>, _arguments, _token| {
    let error_message_owned = error_message.to_string();
    async move {
      target.write().log.push("body attempted".to_string());
      Err(TestError::Body(error_message_owned))
    }
  })
}

/// Body that sleeps for `sleep_for` before producing a value; used to drive
/// the timeout race from both sides.
pub fn slow_descriptor(kind: &str, sleep_for: Duration) -> ActivityDescriptor<TestTarget, TestError> {
  ActivityDescriptor::new(kind).with_body(move |_activity, target: Shared<TestTarget>, _arguments, _token| async move {
    tokio::time::sleep(sleep_for).await;
    target.write().counter += 1;
    Ok(ArgValue::of("done".to_string()))
  })
}

// --- Common Behavior: records before/after calls into a shared list ---

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
  Arc::new(Mutex::new(Vec::new()))
}

pub struct RecordingBehavior {
  pub name: String,
  pub calls: CallLog,
  pub fail_before: bool,
  pub fail_after: bool,
}

impl RecordingBehavior {
  pub fn new(name: impl Into<String>, calls: &CallLog) -> Arc<Self> {
    Arc::new(Self {
      name: name.into(),
      calls: calls.clone(),
      fail_before: false,
      fail_after: false,
    })
  }

  pub fn failing_before(name: impl Into<String>, calls: &CallLog) -> Arc<Self> {
    Arc::new(Self {
      name: name.into(),
      calls: calls.clone(),
      fail_before: true,
      fail_after: false,
    })
  }
}

#[async_trait]
impl ActivityBehavior<TestTarget, TestError> for RecordingBehavior {
  async fn before_execute(&self, _context: Shared<ActivityContext<TestTarget, TestError>>) -> Result<(), TestError> {
    self.calls.lock().unwrap().push(format!("before:{}", self.name));
    if self.fail_before {
      return Err(TestError::Behavior(format!("{} refused in before", self.name)));
    }
    Ok(())
  }

  async fn after_execute(&self, context: Shared<ActivityContext<TestTarget, TestError>>) -> Result<(), TestError> {
    let faulted = context.read().is_faulted();
    let mut calls = self.calls.lock().unwrap();
    calls.push(format!("after:{}", self.name));
    if faulted {
      calls.push(format!("after:{}:saw-error", self.name));
    }
    drop(calls);
    if self.fail_after {
      return Err(TestError::Behavior(format!("{} refused in after", self.name)));
    }
    Ok(())
  }
}

// --- Common State Machine Target ---

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocState {
  Draft,
  Review,
  Published,
  Archived,
}

#[derive(Clone, Debug)]
pub struct DocTarget {
  pub state: DocState,
  pub revision: u32,
  pub log: Vec<String>,
}

impl Default for DocTarget {
  fn default() -> Self {
    Self {
      state: DocState::Draft,
      revision: 0,
      log: Vec::new(),
    }
  }
}

impl StateHolder<DocState> for DocTarget {
  fn current_state(&self) -> DocState {
    self.state
  }

  fn set_state(&mut self, next: DocState) {
    self.state = next;
  }
}

/// Draft -> Review, bumps the revision, produces no value.
pub fn submit_transition() -> TransitionDef<DocTarget, DocState, TestError> {
  TransitionDef::new("submit", &[DocState::Draft], DocState::Review, |target: Shared<DocTarget>, _arguments| {
    async move {
      target.write().revision += 1;
      Ok(TransitionOutcome::Empty)
    }
  })
}

/// Review -> Published, produces the new revision as its value.
pub fn publish_transition() -> TransitionDef<DocTarget, DocState, TestError> {
  TransitionDef::new(
    "publish",
    &[DocState::Review],
    DocState::Published,
    |target: Shared<DocTarget>, _arguments| async move {
      let revision = {
        let mut guard = target.write();
        guard.revision += 1;
        guard.revision
      };
      Ok(TransitionOutcome::Value(ArgValue::of(revision)))
    },
  )
}

// --- Helpers for building execution inputs ---

pub fn shared_activity(kind: &str) -> Shared<Activity> {
  Shared::new(Activity::new(kind))
}

pub fn shared_target() -> Shared<TestTarget> {
  Shared::new(TestTarget::default())
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
