// src/lib.rs

//! Acta: an ASYNC activity execution and state-transition engine for Rust.
//!
//! Acta runs one unit of work (an "activity") through an ordered behavior
//! pipeline with features like:
//!  - Declared activity descriptors with argument defaults and async bodies.
//!  - Before/after interceptor behaviors, ordered by priority and nested
//!    onion-style (the after-phase is the exact reverse of the before-phase).
//!  - Optional per-execution timeouts raced against the body.
//!  - Cooperative cancellation checked at every phase boundary.
//!  - A companion state machine that validates and performs declared state
//!    transitions on a target, with ambiguity detection.

// Declare modules according to the planned structure
pub mod core;
pub mod machine;
pub mod processor;
pub mod registry;
pub mod error;

// --- Re-exports for the Public API ---

// Core types that users will interact with frequently
pub use crate::core::activity::{Activity, OperationState};
pub use crate::core::arguments::{ArgValue, ArgumentBag, Arguments};
pub use crate::core::shared::Shared;

// The activity execution surface
pub use crate::processor::behavior::{ActivityBehavior, BehaviorRegistration};
pub use crate::processor::context::ActivityContext;
pub use crate::processor::descriptor::{ActivityBody, ActivityDescriptor, ArgumentResolver, LayeredArgumentResolver};
pub use crate::processor::execution::ActivityProcessor;

// The state-transition surface
pub use crate::machine::context::TransitionContext;
pub use crate::machine::execution::{MachineDescriptor, StateHolder, StateMachine};
pub use crate::machine::transition::{ParameterDef, ParameterKind, TransitionDef, TransitionOutcome};

pub use crate::error::{ActaError, ActaResult};

// The startup-built registries consumed by the processor
pub use crate::registry::{ActivityRegistry, BehaviorRegistry};

// --- General Crate-Level Items ---

// Standard Result type used throughout acta, typically wrapping anyhow::Error
// pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;
// However, individual modules/functions will likely define their own Result<T> = anyhow::Result<T>
// or Result<T, SpecificError>. `anyhow::Result` is often used directly.

// Example of a high-level comment explaining a core concept if needed.
/*
    Core Workflow:
    1. Define a target struct `MyTarget` your activities operate on.
    2. Build an `ActivityDescriptor<MyTarget, MyError>` per activity kind,
       declaring argument defaults and the async body, and register it with
       an `ActivityRegistry`.
    3. Register `ActivityBehavior` implementations with a `BehaviorRegistry`,
       each with an optional kind filter and a priority.
    4. Create an `ActivityProcessor` over both registries.
    5. Per execution: create an `Activity`, wrap it and the target in
       `Shared`, and call `processor.execute(...)` (or `execute_with` to set
       a timeout on the context).
    6. For state transitions: implement `StateHolder<MyState>` on the target,
       declare `TransitionDef`s in a `MachineDescriptor`, build a
       `StateMachine`, and call `machine.transition(TransitionContext::...)`.
*/

// Ensure all public items are documented.
// Consider using `#![warn(missing_docs)]` at the crate level once stable.
