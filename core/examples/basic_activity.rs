// acta_core/examples/basic_activity.rs

use acta::{
  ActaError, Activity, ActivityBehavior, ActivityContext, ActivityDescriptor, ActivityProcessor, ActivityRegistry,
  ArgValue, Arguments, BehaviorRegistry, Shared,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

// 1. Define the target your activities operate on
#[derive(Clone, Debug, Default)]
struct Greeter {
  greetings_sent: u32,
}

// 2. Define an Error type for the engine
//    For simplicity, this example uses ActaError directly.
//    In real applications, you'd typically define a custom error:
//    #[derive(Debug, thiserror::Error)]
//    enum MyError { #[error("Acta: {0}")] Acta(#[from] ActaError), /* ... */ }

// 3. A behavior that logs around every execution
struct LoggingBehavior;

#[async_trait]
impl ActivityBehavior<Greeter, ActaError> for LoggingBehavior {
  async fn before_execute(&self, context: Shared<ActivityContext<Greeter, ActaError>>) -> Result<(), ActaError> {
    let kind = context.read().activity.read().kind().to_string();
    info!("about to execute '{kind}'");
    Ok(())
  }

  async fn after_execute(&self, context: Shared<ActivityContext<Greeter, ActaError>>) -> Result<(), ActaError> {
    let faulted = context.read().is_faulted();
    info!("finished (faulted: {faulted})");
    Ok(())
  }
}

#[tokio::main]
async fn main() -> Result<(), ActaError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Activity Example ---");

  // 4. Register the activity descriptor: a default argument plus the body
  let activities = Arc::new(ActivityRegistry::new());
  activities.register(
    ActivityDescriptor::<Greeter, ActaError>::new("greet")
      .with_default("name", "world".to_string())
      .with_body(|_activity, target, arguments, _token| async move {
        let name: String = arguments.require("name")?;
        target.write().greetings_sent += 1;
        Ok(ArgValue::of(format!("hello, {name}!")))
      }),
  );

  // 5. Register behaviors (None = applies to every activity kind)
  let behaviors = Arc::new(BehaviorRegistry::new());
  behaviors.register(Arc::new(LoggingBehavior), None, 10);

  // 6. Build the processor and execute
  let processor = ActivityProcessor::new(activities, behaviors);
  let activity = Shared::new(Activity::new("greet"));
  let target = Shared::new(Greeter::default());

  // First run uses the declared default for "name"
  let value = processor
    .execute(activity.clone(), target.clone(), None, CancellationToken::new())
    .await?;
  info!("produced: {:?}", value.get::<String>());

  // Second run overrides it with an explicit argument
  let activity2 = Shared::new(Activity::new("greet"));
  let arguments = Arguments::new().with("name", "acta".to_string());
  let value2 = processor
    .execute(activity2, target.clone(), Some(arguments), CancellationToken::new())
    .await?;
  info!("produced: {:?}", value2.get::<String>());

  assert_eq!(value.get::<String>(), Some("hello, world!".to_string()));
  assert_eq!(value2.get::<String>(), Some("hello, acta!".to_string()));
  assert_eq!(target.read().greetings_sent, 2);

  Ok(())
}
