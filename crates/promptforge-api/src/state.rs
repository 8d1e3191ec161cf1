//! Application state.
//!
//! AppState aggregates the repositories, the credential vault, the provider
//! registry, and the execution service. The registry and vault are injected
//! at construction time so tests can substitute mock adapters and fixed keys.

use crate::services::ExecutionService;
use promptforge_core::{Config, CredentialVault};
use promptforge_db::{
    GenerationRepository, LedgerRepository, MembershipRepository, OrganizationRepository,
    PromptRepository, ProviderKeyRepository, UserRepository,
};
use promptforge_providers::ProviderRegistry;
use sqlx::PgPool;
use std::sync::Arc;

/// Database pool and all repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub users: UserRepository,
    pub organizations: OrganizationRepository,
    pub memberships: MembershipRepository,
    pub prompts: PromptRepository,
    pub provider_keys: ProviderKeyRepository,
    pub ledger: LedgerRepository,
    pub generations: GenerationRepository,
}

impl DbState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            organizations: OrganizationRepository::new(pool.clone()),
            memberships: MembershipRepository::new(pool.clone()),
            prompts: PromptRepository::new(pool.clone()),
            provider_keys: ProviderKeyRepository::new(pool.clone()),
            ledger: LedgerRepository::new(pool.clone()),
            generations: GenerationRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Main application state.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub vault: Arc<CredentialVault>,
    pub providers: Arc<ProviderRegistry>,
    pub executions: ExecutionService,
    pub config: Config,
    pub is_production: bool,
}

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
