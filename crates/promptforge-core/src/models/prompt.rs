use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Prompt entity: immutable identity (org, slug), mutable metadata.
/// Owns an ordered sequence of versions.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Prompt {
    pub id: Uuid,
    pub org_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Immutable prompt version. Version numbers start at 1 and increase
/// strictly per prompt; assignment is serialized on the prompt row so
/// concurrent writers can never share a number.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PromptVersion {
    pub id: Uuid,
    pub prompt_id: Uuid,
    pub version: i32,
    /// Template content with `${variable}` placeholders
    pub content: String,
    pub model: String,
    /// Provider adapter name (e.g. "openai", "anthropic")
    pub provider: String,
    /// Opaque generation parameters (temperature, max_tokens, ...)
    pub parameters: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Slug generation for prompts and organizations: lowercased, with spaces
/// and underscores folded to hyphens.
pub fn generate_slug(name: &str) -> String {
    name.to_lowercase().replace([' ', '_'], "-")
}
