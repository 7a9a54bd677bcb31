// tests/registry_tests.rs
mod common;

use acta::{ActivityDescriptor, ActivityRegistry, BehaviorRegistry};
use common::*;
use std::sync::Arc;

#[test]
fn test_activity_registry_register_and_lookup() {
  setup_tracing();
  let registry: ActivityRegistry<TestTarget, TestError> = ActivityRegistry::new();
  assert!(registry.is_empty());

  registry.register(echo_descriptor("echo"));
  assert_eq!(registry.len(), 1);

  let found = registry.lookup("echo").expect("descriptor should be registered");
  assert_eq!(found.kind(), "echo");
  assert!(registry.lookup("unknown").is_none());
}

#[test]
fn test_activity_registry_later_registration_replaces() {
  setup_tracing();
  let registry: ActivityRegistry<TestTarget, TestError> = ActivityRegistry::new();

  registry.register(ActivityDescriptor::new("echo").with_default("version", 1u32));
  registry.register(ActivityDescriptor::new("echo").with_default("version", 2u32));

  assert_eq!(registry.len(), 1);
  let found = registry.lookup("echo").unwrap();
  assert_eq!(found.defaults().get::<u32>("version"), Some(2));
}

#[test]
fn test_behavior_registry_filters_and_sorts() {
  setup_tracing();
  let registry: BehaviorRegistry<TestTarget, TestError> = BehaviorRegistry::new();
  let calls = call_log();

  // Registered deliberately out of priority order.
  registry.register(RecordingBehavior::new("late", &calls), None, 50);
  registry.register(RecordingBehavior::new("early", &calls), None, 10);
  registry.register(RecordingBehavior::new("scoped", &calls), Some("echo".to_string()), 20);
  registry.register(RecordingBehavior::new("elsewhere", &calls), Some("other".to_string()), 5);

  assert_eq!(registry.len(), 4);
  // "elsewhere" is filtered out; the rest come back ascending by priority.
  assert_eq!(registry.for_kind("echo").len(), 3);
  assert_eq!(registry.for_kind("other").len(), 3); // wildcard entries + its own
  assert_eq!(registry.for_kind("unrelated").len(), 2); // wildcard entries only
}

#[test]
fn test_behavior_registry_empty_selection() {
  setup_tracing();
  let registry: BehaviorRegistry<TestTarget, TestError> = BehaviorRegistry::new();
  assert!(registry.is_empty());
  assert!(registry.for_kind("anything").is_empty());

  let calls = call_log();
  let behavior: Arc<RecordingBehavior> = RecordingBehavior::new("only", &calls);
  registry.register(behavior, Some("echo".to_string()), 1);
  assert!(registry.for_kind("not_echo").is_empty());
}
