//! AI provider abstraction and the Gemini implementation.

mod gemini;

pub use gemini::{DEFAULT_BASE_URL, GeminiProvider};

use async_trait::async_trait;
use compass_common::query::{Coordinates, SearchQuery};
use thiserror::Error;

use crate::prompt::{self, ModelChoice};

/// Errors that can occur when talking to the AI service.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Provider returned error: {0}")]
    ServiceError(String),
}

/// One page request, fully resolved from a query.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: ModelChoice,
    pub seed: i32,
    /// Biases map grounding towards a point when the user gave coordinates.
    pub lat_lng: Option<Coordinates>,
}

impl GenerationRequest {
    pub fn from_query(query: &SearchQuery, existing_names: &[String]) -> Self {
        Self {
            prompt: prompt::build_prompt(query, existing_names),
            model: ModelChoice::for_query(query),
            seed: prompt::SEED,
            lat_lng: query.location.coordinates(),
        }
    }
}

/// Raw model output.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub duration_ms: u64,
}

#[async_trait]
pub trait CompanyProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    async fn complete(&self, request: &GenerationRequest) -> Result<Completion, ProviderError>;
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
