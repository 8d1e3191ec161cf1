//! PromptForge API Library
//!
//! This crate provides the HTTP API handlers, auth middleware, and
//! application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
mod telemetry;

// Public modules
pub mod auth;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use services::{ExecutionRequest, ExecutionService};
