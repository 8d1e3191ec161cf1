//! PromptForge Core Library
//!
//! This crate provides core domain models, error types, configuration, the
//! credential vault, and template resolution that are shared across all
//! PromptForge components.

pub mod config;
pub mod error;
pub mod models;
pub mod template;
pub mod vault;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use template::resolve_variables;
pub use vault::CredentialVault;
