use compass_common::query::QueryError;
use thiserror::Error;

use crate::provider::ProviderError;

/// Failures surfaced to whoever drives a [`DiscoverySession`](crate::session::DiscoverySession).
///
/// The messages are shown to the user as-is.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    #[error(
        "The AI returned an invalid format. This can happen with complex queries. Please try again."
    )]
    InvalidFormat(#[source] serde_json::Error),

    #[error(
        "Failed to fetch data from the AI service. The grounding service may be temporarily unavailable."
    )]
    Unavailable(#[source] ProviderError),

    #[error("no API key configured, set GEMINI_API_KEY or pass --api-key")]
    MissingApiKey,
}

impl From<ProviderError> for DiscoveryError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::JsonError(json_err) => DiscoveryError::InvalidFormat(json_err),
            other => DiscoveryError::Unavailable(other),
        }
    }
}
