//! Domain models shared across PromptForge components

pub mod generation;
pub mod ledger;
pub mod org;
pub mod prompt;
pub mod provider_key;
pub mod user;

pub use generation::Generation;
pub use ledger::CreditLedgerEntry;
pub use org::{OrgRole, Organization, OrganizationMember};
pub use prompt::{generate_slug, Prompt, PromptVersion};
pub use provider_key::ProviderKey;
pub use user::User;
