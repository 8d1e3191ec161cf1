//! Database repositories for data access layer
//!
//! Repositories are organized by domain entity: tenancy (organizations,
//! members, users), prompt management (prompts, versions), billing
//! (credit ledger), BYOK credentials (provider keys), and execution records
//! (generations + the transactional recorder).

pub mod execution;
pub mod generation;
pub mod ledger;
pub mod membership;
pub mod organization;
pub mod prompt;
pub mod provider_key;
pub mod user;

pub use execution::{ExecutionRecord, ExecutionRecorder};
pub use generation::GenerationRepository;
pub use ledger::LedgerRepository;
pub use membership::MembershipRepository;
pub use organization::OrganizationRepository;
pub use prompt::PromptRepository;
pub use provider_key::ProviderKeyRepository;
pub use user::UserRepository;
