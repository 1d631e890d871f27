//! Google Gemini `generateContent` client with search and maps grounding.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompanyProvider, Completion, GenerationRequest, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_VERSION: &str = "v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Points the client at another host, e.g. a proxy or a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/{API_VERSION}/models/{model}:generateContent",
            self.base_url
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<ToolConfig>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize, Default)]
struct EmptyObject {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Tool {
    GoogleSearch(EmptyObject),
    GoogleMaps(EmptyObject),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    seed: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig {
    retrieval_config: RetrievalConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfig {
    lat_lng: LatLng,
}

#[derive(Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentRequest {
    fn from_request(request: &GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt.clone()),
                }],
            }],
            tools: vec![
                Tool::GoogleSearch(EmptyObject::default()),
                Tool::GoogleMaps(EmptyObject::default()),
            ],
            generation_config: GenerationConfig {
                seed: request.seed,
                thinking_config: request
                    .model
                    .thinking_budget()
                    .map(|thinking_budget| ThinkingConfig { thinking_budget }),
            },
            tool_config: request.lat_lng.map(|coords| ToolConfig {
                retrieval_config: RetrievalConfig {
                    lat_lng: LatLng {
                        latitude: coords.latitude,
                        longitude: coords.longitude,
                    },
                },
            }),
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompanyProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<Completion, ProviderError> {
        let model = request.model.model_name();
        let url = self.endpoint(model);
        let body = GenerateContentRequest::from_request(request);

        debug!("requesting {model} with {} prompt bytes", request.prompt.len());
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ServiceError(format!("HTTP {status}: {body}")));
        }

        let raw = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&raw)?;
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!("{model} answered in {duration_ms}ms");

        Ok(Completion {
            text: parsed.into_text(),
            duration_ms,
        })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ModelChoice;
    use compass_common::query::Coordinates;
    use httpmock::prelude::*;
    use serde_json::json;

    fn request(model: ModelChoice, lat_lng: Option<Coordinates>) -> GenerationRequest {
        GenerationRequest {
            prompt: "list companies".to_string(),
            model,
            seed: 42,
            lat_lng,
        }
    }

    #[test]
    fn request_body_for_standard_model() {
        let body = GenerateContentRequest::from_request(&request(ModelChoice::Standard, None));
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "list companies" }] }],
                "tools": [{ "googleSearch": {} }, { "googleMaps": {} }],
                "generationConfig": { "seed": 42 }
            })
        );
    }

    #[test]
    fn request_body_for_deep_search_with_coordinates() {
        let coords = Coordinates {
            latitude: 40.7128,
            longitude: -74.006,
        };
        let body =
            GenerateContentRequest::from_request(&request(ModelChoice::DeepSearch, Some(coords)));
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            32768
        );
        assert_eq!(
            value["toolConfig"]["retrievalConfig"]["latLng"],
            json!({ "latitude": 40.7128, "longitude": -74.006 })
        );
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let raw = json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "[{\"name\":" }, { "text": "\"A\"}]" }] } },
                { "content": { "role": "model", "parts": [{ "text": "ignored" }] } }
            ]
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.into_text(), "[{\"name\":\"A\"}]");

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.into_text(), "");
    }

    #[tokio::test]
    async fn complete_posts_to_model_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-2.5-flash:generateContent")
                    .header("x-goog-api-key", "test-key")
                    .body_includes("googleSearch");
                then.status(200).json_body(json!({
                    "candidates": [{ "content": { "parts": [{ "text": "[]" }] } }]
                }));
            })
            .await;

        let provider = GeminiProvider::new("test-key")
            .unwrap()
            .with_base_url(server.base_url());
        let completion = provider
            .complete(&request(ModelChoice::Standard, None))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(completion.text, "[]");
    }

    #[tokio::test]
    async fn complete_reports_service_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-2.5-pro:generateContent");
                then.status(503).body("overloaded");
            })
            .await;

        let provider = GeminiProvider::new("test-key")
            .unwrap()
            .with_base_url(format!("{}/", server.base_url()));
        let err = provider
            .complete(&request(ModelChoice::DeepSearch, None))
            .await
            .unwrap_err();

        match err {
            ProviderError::ServiceError(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("overloaded"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn complete_rejects_malformed_envelope() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let provider = GeminiProvider::new("k")
            .unwrap()
            .with_base_url(server.base_url());
        let err = provider
            .complete(&request(ModelChoice::Standard, None))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::JsonError(_)));
    }
}
