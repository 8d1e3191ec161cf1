//! PromptForge database layer
//!
//! Repository implementations over sqlx/Postgres. Each repository owns a
//! specific domain entity and provides tenant-scoped queries; the execution
//! recorder bundles the writes that must commit atomically.

pub mod db;

pub use db::{
    ExecutionRecord, ExecutionRecorder, GenerationRepository, LedgerRepository,
    MembershipRepository, OrganizationRepository, PromptRepository, ProviderKeyRepository,
    UserRepository,
};
