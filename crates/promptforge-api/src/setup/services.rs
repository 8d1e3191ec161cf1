//! Service and state construction.

use crate::services::ExecutionService;
use crate::state::{AppState, DbState};
use promptforge_core::{Config, CredentialVault};
use promptforge_db::ExecutionRecorder;
use promptforge_providers::ProviderRegistry;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Build application state with the default vault and provider registry.
pub fn initialize_services(config: &Config, pool: PgPool) -> Arc<AppState> {
    let vault = Arc::new(CredentialVault::new(config.master_secret()));
    let providers = Arc::new(ProviderRegistry::with_defaults(Duration::from_secs(
        config.provider_timeout_seconds,
    )));
    build_state(config, pool, vault, providers)
}

/// Assemble state from pre-built components; tests inject mock registries
/// and fixed vault keys here.
pub fn build_state(
    config: &Config,
    pool: PgPool,
    vault: Arc<CredentialVault>,
    providers: Arc<ProviderRegistry>,
) -> Arc<AppState> {
    crate::error::set_production_mode(config.is_production());

    let db = DbState::new(pool.clone());

    let executions = ExecutionService::new(
        db.prompts.clone(),
        db.provider_keys.clone(),
        db.ledger.clone(),
        ExecutionRecorder::new(pool),
        vault.clone(),
        providers.clone(),
    );

    Arc::new(AppState {
        db,
        vault,
        providers,
        executions,
        is_production: config.is_production(),
        config: config.clone(),
    })
}
