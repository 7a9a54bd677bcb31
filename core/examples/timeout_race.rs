// acta_core/examples/timeout_race.rs

use acta::{
  ActaError, Activity, ActivityDescriptor, ActivityProcessor, ActivityRegistry, ArgValue, BehaviorRegistry, Shared,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Clone, Debug, Default)]
struct Archive {
  documents_indexed: u32,
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Timeout Race Example ---");

  // 1. An activity whose body takes much longer than the timeout we'll set
  let activities = Arc::new(ActivityRegistry::new());
  activities.register(
    ActivityDescriptor::<Archive, ActaError>::new("index_documents").with_body(
      |_activity, target, _arguments, token| async move {
        // Cooperative body: stop early if the execution's token fires.
        tokio::select! {
          _ = tokio::time::sleep(Duration::from_secs(5)) => {
            target.write().documents_indexed += 1;
            Ok(ArgValue::of("indexed".to_string()))
          }
          _ = token.cancelled() => {
            info!("body observed cancellation and unwound");
            Ok(ArgValue::none())
          }
        }
      },
    ),
  );

  let processor = ActivityProcessor::new(activities, Arc::new(BehaviorRegistry::new()));

  // 2. Execute with a 100ms timeout; the delay wins the race
  let activity = Shared::new(Activity::new("index_documents"));
  let target = Shared::new(Archive::default());

  let result = processor
    .execute_with(
      activity.clone(),
      target.clone(),
      None,
      |context| context.set_timeout(Duration::from_millis(100)),
      CancellationToken::new(),
    )
    .await;

  // 3. Timeout is a distinct failure kind, observable by callers
  match result {
    Err(ActaError::Timeout { kind, timeout }) => {
      info!("'{kind}' timed out after {timeout:?}, as expected");
    }
    other => panic!("expected a timeout failure, got {other:?}"),
  }

  // Give the abandoned body its grace window to observe cancellation.
  tokio::time::sleep(Duration::from_millis(300)).await;
  info!("documents indexed: {}", target.read().documents_indexed);
}
