// acta/src/machine/mod.rs

//! The state-transition side of the engine: declared transition metadata,
//! the per-call `TransitionContext`, and the `StateMachine` that resolves,
//! invokes, and commits exactly one transition per call.

pub mod context;
pub mod execution;
pub mod transition;

// Re-export the primary types
pub use context::TransitionContext;
pub use execution::{MachineDescriptor, StateHolder, StateMachine};
pub use transition::{ParameterDef, ParameterKind, TransitionDef, TransitionHandler, TransitionOutcome};
