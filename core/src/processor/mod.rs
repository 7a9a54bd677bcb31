// acta/src/processor/mod.rs

//! The activity execution side of the engine: the `ActivityProcessor`
//! orchestrator, its per-call `ActivityContext`, declared activity
//! descriptors, and the before/after behavior pipeline.

pub mod behavior;
pub mod context;
pub mod descriptor;
pub mod execution;

// Re-export the primary types
pub use behavior::{ActivityBehavior, BehaviorRegistration};
pub use context::ActivityContext;
pub use descriptor::{ActivityBody, ActivityDescriptor, ArgumentResolver, LayeredArgumentResolver};
pub use execution::ActivityProcessor;
