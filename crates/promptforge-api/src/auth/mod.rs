//! Authentication and authorization.
//!
//! JWT bearer auth populates an [`AuthContext`](models::AuthContext) in
//! request extensions; organization-scoped role checks live in
//! [`authorize`](authorize).

pub mod authorize;
pub mod jwt;
pub mod middleware;
pub mod models;
