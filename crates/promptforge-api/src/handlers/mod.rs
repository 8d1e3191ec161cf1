//! HTTP request handlers, grouped by resource.

pub mod credits;
pub mod executions;
pub mod generations;
pub mod health;
pub mod organizations;
pub mod prompts;
pub mod provider_keys;
