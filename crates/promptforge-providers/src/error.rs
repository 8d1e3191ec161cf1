use promptforge_core::AppError;

/// Errors from a single provider call. All variants are fatal to the
/// request: the orchestrator never retries and records no side effects.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The vendor answered with a non-success HTTP status.
    #[error("{provider} API error: {status} - {detail}")]
    Api {
        provider: &'static str,
        status: u16,
        detail: String,
    },

    /// Transport failure: connect error, timeout, TLS, etc.
    #[error("{provider} API call failed: {source}")]
    Network {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The response arrived but did not have the expected shape.
    #[error("{provider} returned an unexpected response: {detail}")]
    UnexpectedResponse {
        provider: &'static str,
        detail: String,
    },
}

impl ProviderError {
    pub fn provider(&self) -> &'static str {
        match self {
            ProviderError::Api { provider, .. } => provider,
            ProviderError::Network { provider, .. } => provider,
            ProviderError::UnexpectedResponse { provider, .. } => provider,
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match &err {
            ProviderError::Api { status, detail, .. } => AppError::ProviderCall {
                provider: err.provider().to_string(),
                status: Some(*status),
                detail: detail.clone(),
            },
            ProviderError::Network { source, .. } => AppError::ProviderCall {
                provider: err.provider().to_string(),
                status: None,
                detail: source.to_string(),
            },
            ProviderError::UnexpectedResponse { detail, .. } => AppError::ProviderCall {
                provider: err.provider().to_string(),
                status: None,
                detail: detail.clone(),
            },
        }
    }
}
