//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use promptforge_core::models;

/// Returns the OpenAPI spec served at `/api/openapi.json`.
pub fn openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PromptForge API",
        version = "0.1.0",
        description = "Multi-tenant prompt execution engine: versioned prompts, BYOK provider credentials, and an append-only credit ledger. All endpoints are versioned under /api/v1/."
    ),
    paths(
        // Health
        handlers::health::health_check,
        // Organizations
        handlers::organizations::create_organization,
        handlers::organizations::list_organizations,
        handlers::organizations::get_organization,
        handlers::organizations::add_member,
        handlers::organizations::list_members,
        // Prompts
        handlers::prompts::create_prompt,
        handlers::prompts::list_prompts,
        handlers::prompts::get_prompt,
        handlers::prompts::create_version,
        handlers::prompts::list_versions,
        // Provider keys
        handlers::provider_keys::create_provider_key,
        handlers::provider_keys::list_provider_keys,
        handlers::provider_keys::delete_provider_key,
        // Generations
        handlers::generations::list_generations,
        handlers::generations::get_generation,
        // Credits
        handlers::credits::get_balance,
        handlers::credits::add_credits,
        handlers::credits::list_ledger_entries,
        // Executions
        handlers::executions::execute_prompt,
    ),
    components(
        schemas(
            // Core models
            models::Organization,
            models::OrganizationMember,
            models::org::OrgRole,
            models::Prompt,
            models::PromptVersion,
            models::ProviderKey,
            models::CreditLedgerEntry,
            models::Generation,
            models::User,
            // Request/response types
            handlers::health::HealthCheckResponse,
            handlers::organizations::CreateOrganizationRequest,
            handlers::organizations::AddMemberRequest,
            handlers::prompts::CreatePromptRequest,
            handlers::prompts::CreateVersionRequest,
            handlers::prompts::PromptWithVersions,
            handlers::provider_keys::CreateProviderKeyRequest,
            handlers::credits::AddCreditsRequest,
            handlers::credits::BalanceResponse,
            handlers::executions::ExecutePromptRequest,
            // Errors
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "organizations", description = "Organizations and memberships"),
        (name = "prompts", description = "Prompt templates and versions"),
        (name = "provider-keys", description = "BYOK provider credentials"),
        (name = "generations", description = "Execution history"),
        (name = "credits", description = "Credit ledger"),
        (name = "executions", description = "Prompt execution engine"),
    )
)]
pub struct ApiDoc;
