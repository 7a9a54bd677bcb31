use acta::{
  ActaError, Activity, ActivityBehavior, ActivityContext, ActivityDescriptor, ActivityProcessor, ActivityRegistry,
  ArgValue, BehaviorRegistry, MachineDescriptor, Shared, StateHolder, StateMachine, TransitionContext, TransitionDef,
  TransitionOutcome,
};
use async_trait::async_trait;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion
use tokio_util::sync::CancellationToken;

// --- Common Benchmark Target and Error ---
#[derive(Clone, Debug, Default)]
struct BenchTarget {
  counter: u64,
}

// Using ActaError directly for benchmark simplicity.
type BenchError = ActaError;

// --- Helper: no-op behavior, exercises the pipeline plumbing only ---
struct PassthroughBehavior;

#[async_trait]
impl ActivityBehavior<BenchTarget, BenchError> for PassthroughBehavior {
  async fn before_execute(&self, _context: Shared<ActivityContext<BenchTarget, BenchError>>) -> Result<(), BenchError> {
    Ok(())
  }

  async fn after_execute(&self, _context: Shared<ActivityContext<BenchTarget, BenchError>>) -> Result<(), BenchError> {
    Ok(())
  }
}

fn build_processor(num_behaviors: usize) -> ActivityProcessor<BenchTarget, BenchError> {
  let activities = Arc::new(ActivityRegistry::new());
  activities.register(
    ActivityDescriptor::<BenchTarget, BenchError>::new("bump").with_body(
      |_activity, target, _arguments, _token| async move {
        let mut guard = target.write();
        guard.counter = guard.counter.wrapping_add(1);
        drop(guard);
        Ok(ArgValue::none())
      },
    ),
  );

  let behaviors = Arc::new(BehaviorRegistry::new());
  for priority in 0..num_behaviors {
    behaviors.register(Arc::new(PassthroughBehavior), None, priority as i32);
  }

  ActivityProcessor::new(activities, behaviors)
}

// --- Benchmark Functions ---

fn bench_activity_execution(c: &mut Criterion) {
  let mut group = c.benchmark_group("ActivityExecution");
  let rt = Runtime::new().unwrap();

  for num_behaviors in [0usize, 1, 4].iter() {
    let processor = Arc::new(build_processor(*num_behaviors));

    group.throughput(Throughput::Elements(1));
    group.bench_with_input(
      BenchmarkId::new("behaviors", num_behaviors),
      num_behaviors,
      |b, _num_behaviors_param| {
        b.to_async(&rt).iter(|| {
          let processor = processor.clone();
          async move {
            let activity = Shared::new(Activity::new("bump"));
            let target = Shared::new(BenchTarget::default());
            processor
              .execute(activity, target, None, CancellationToken::new())
              .await
              .expect("bench execution should succeed")
          }
        });
      },
    );
  }
  group.finish();
}

// --- State machine benchmark ---

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
  Idle,
  Busy,
}

#[derive(Clone, Debug)]
struct PhasedTarget {
  phase: Phase,
}

impl StateHolder<Phase> for PhasedTarget {
  fn current_state(&self) -> Phase {
    self.phase
  }

  fn set_state(&mut self, next: Phase) {
    self.phase = next;
  }
}

fn bench_state_transition(c: &mut Criterion) {
  let mut group = c.benchmark_group("StateTransition");
  let rt = Runtime::new().unwrap();

  let descriptor = Arc::new(
    MachineDescriptor::<PhasedTarget, Phase, BenchError>::new().transition(TransitionDef::new(
      "engage",
      &[Phase::Idle],
      Phase::Busy,
      |_target, _arguments| async move { Ok(TransitionOutcome::Empty) },
    )),
  );

  group.throughput(Throughput::Elements(1));
  group.bench_function("resolve_and_commit", |b| {
    let descriptor = descriptor.clone();
    b.to_async(&rt).iter(|| {
      let descriptor = descriptor.clone();
      async move {
        let target = Shared::new(PhasedTarget { phase: Phase::Idle });
        let machine = StateMachine::new(target, descriptor);
        machine
          .transition(TransitionContext::to_state(Phase::Busy), CancellationToken::new())
          .await
          .expect("bench transition should succeed")
      }
    });
  });
  group.finish();
}

criterion_group!(benches, bench_activity_execution, bench_state_transition);
criterion_main!(benches);
