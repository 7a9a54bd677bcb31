// acta_core/examples/state_machine.rs

use acta::{
  ActaError, MachineDescriptor, ParameterKind, Shared, StateHolder, StateMachine, TransitionContext, TransitionDef,
  TransitionOutcome,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

// 1. The target's logical states
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TicketState {
  Open,
  InProgress,
  Resolved,
}

// 2. The target declares where its state lives via StateHolder
#[derive(Clone, Debug)]
struct Ticket {
  state: TicketState,
  assignee: Option<String>,
}

impl StateHolder<TicketState> for Ticket {
  fn current_state(&self) -> TicketState {
    self.state
  }

  fn set_state(&mut self, next: TicketState) {
    self.state = next;
  }
}

#[tokio::main]
async fn main() -> Result<(), ActaError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- State Machine Example ---");

  // 3. Declare the legal transitions as a fixed descriptor set
  let descriptor = Arc::new(
    MachineDescriptor::<Ticket, TicketState, ActaError>::new()
      .transition(
        TransitionDef::new(
          "assign",
          &[TicketState::Open],
          TicketState::InProgress,
          |target: Shared<Ticket>, arguments| async move {
            let assignee = arguments[0].get::<String>().unwrap_or_else(|| "unassigned".to_string());
            target.write().assignee = Some(assignee);
            Ok(TransitionOutcome::Empty)
          },
        )
        .with_parameter("assignee", ParameterKind::Value),
      )
      .transition(TransitionDef::new(
        "resolve",
        &[TicketState::InProgress],
        TicketState::Resolved,
        |_target, _arguments| async move { Ok(TransitionOutcome::Empty) },
      )),
  );

  // 4. Build the machine over a shared target
  let target = Shared::new(Ticket {
    state: TicketState::Open,
    assignee: None,
  });
  let machine = StateMachine::new(target.clone(), descriptor);

  // 5. Drive it by destination state; arguments bind by parameter name
  machine
    .transition(
      TransitionContext::to_state(TicketState::InProgress).argument("assignee", "sam".to_string()),
      CancellationToken::new(),
    )
    .await?;
  info!("after assign: {:?}", *target.read());

  machine
    .transition(TransitionContext::to_state(TicketState::Resolved), CancellationToken::new())
    .await?;
  info!("after resolve: {:?}", *target.read());

  // 6. A destination with no declared edge from the current state is refused
  let refused = machine
    .transition(TransitionContext::to_state(TicketState::InProgress), CancellationToken::new())
    .await;
  info!("re-assigning a resolved ticket: {:?}", refused.err().map(|e| e.to_string()));

  assert_eq!(target.read().state, TicketState::Resolved);
  assert_eq!(target.read().assignee.as_deref(), Some("sam"));

  Ok(())
}
