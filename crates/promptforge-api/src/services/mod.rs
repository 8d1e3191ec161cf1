//! Application services.

mod execution;

pub use execution::{ExecutionRequest, ExecutionService};
