pub mod activity;
pub mod arguments;
pub mod shared;

// Re-export key types for easier access from other acta modules (and lib.rs)
pub use activity::{Activity, OperationState};
pub use arguments::{ArgValue, ArgumentBag, Arguments};
pub use shared::Shared;
