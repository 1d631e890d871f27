#![cfg(test)]
use compass_common::company::{Company, CompanyStatus};
use compass_common::query::{Location, SearchQuery};
use compass_core::error::DiscoveryError;
use compass_core::export;
use compass_core::provider::GeminiProvider;
use compass_core::session::DiscoverySession;
use httpmock::prelude::*;
use serde_json::{Value, json};

const FLASH_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

/// Wraps model text the way the generateContent endpoint returns it.
fn envelope(text: &str) -> Value {
    json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
}

fn session_for(server: &MockServer) -> DiscoverySession {
    let provider = GeminiProvider::new("integration-key")
        .expect("client builds")
        .with_base_url(server.base_url());
    DiscoverySession::new(Box::new(provider))
}

fn solar_query() -> SearchQuery {
    SearchQuery::new(
        "Solar panels",
        Location::Place("Austin, Texas".to_string()),
        vec![CompanyStatus::Established, CompanyStatus::ProposedInvestment],
    )
}

/// Runs a first search, loads a second page that must exclude the first, then
/// reaches the end of the results and exports everything to CSV.
#[tokio::test]
async fn generate_then_load_more_until_exhausted() {
    let server = MockServer::start_async().await;

    let first_page = format!(
        "```json\n{}\n```",
        json!([
            {
                "name": "Alpha Solar",
                "status": "Established",
                "location": "Austin, TX",
                "description": "Rooftop installs.",
                "website": "https://alpha.example",
                "employeeCount": 120,
                "establishedYear": 2009
            },
            {
                "name": "Bright Fields",
                "status": "Proposed Investment",
                "location": "Round Rock, TX",
                "description": "Planned utility-scale farm.",
                "investment": "$40M",
                "employeeCount": "N/A",
                "establishedYear": "N/A"
            }
        ])
    );
    let mut first = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(FLASH_PATH)
                .header("x-goog-api-key", "integration-key")
                .body_includes("Solar panels")
                .body_excludes("DO NOT include");
            then.status(200).json_body(envelope(&first_page));
        })
        .await;

    let mut session = session_for(&server);
    let found = session.generate(solar_query()).await;

    assert!(found.is_ok(), "Generate failed: {:?}", found.err());
    assert_eq!(found.unwrap(), 2);
    assert!(session.has_more());
    first.assert_async().await;
    first.delete_async().await;

    let second_page = json!([
        { "name": "alpha solar ", "status": "Established", "location": "Austin", "description": "Repeat." },
        { "name": "Cedar Grid", "status": "Established", "location": "Austin", "description": "Storage." }
    ])
    .to_string();
    let mut second = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(FLASH_PATH)
                .body_includes("DO NOT include")
                .body_includes("- Alpha Solar")
                .body_includes("- Bright Fields");
            then.status(200).json_body(envelope(&second_page));
        })
        .await;

    let added = session.load_more().await.expect("second page loads");
    assert_eq!(added, 1, "duplicate names must not be appended twice");
    assert!(session.has_more());
    second.assert_async().await;
    second.delete_async().await;

    let last = server
        .mock_async(|when, then| {
            when.method(POST).path(FLASH_PATH).body_includes("- Cedar Grid");
            then.status(200).json_body(envelope("[]"));
        })
        .await;

    assert_eq!(session.load_more().await.expect("empty page loads"), 0);
    assert!(!session.has_more());
    last.assert_async().await;

    // Exhausted sessions do not call the service again.
    assert_eq!(session.load_more().await.expect("no-op"), 0);
    last.assert_calls_async(1).await;

    let names: Vec<&str> = session.companies().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha Solar", "Bright Fields", "Cedar Grid"]);

    let dir = tempfile::tempdir().expect("temp dir");
    let path = export::export_csv(session.companies(), "Solar panels", dir.path())
        .expect("export succeeds")
        .expect("file written");
    assert!(path.ends_with("Solar_panels_companies.csv"));

    let contents = std::fs::read_to_string(&path).expect("csv readable");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Name,Status,Location"));
    assert!(lines[1].starts_with("Alpha Solar,Established,"));
    assert!(lines[2].contains("$40M"));
}

#[tokio::test]
async fn coordinates_are_sent_as_retrieval_config() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(FLASH_PATH)
                .body_includes("retrievalConfig")
                .body_includes("40.7128");
            then.status(200).json_body(envelope("[]"));
        })
        .await;

    let query = SearchQuery::new(
        "Fintech",
        "40.7128, -74.0060".parse().expect("coordinates parse"),
        vec![CompanyStatus::AboutToStart],
    );

    let mut session = session_for(&server);
    assert_eq!(session.generate(query).await.expect("request succeeds"), 0);
    assert!(session.companies().is_empty());
    assert!(!session.has_more());
    mock.assert_async().await;
}

#[tokio::test]
async fn deep_search_uses_the_larger_model() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-pro:generateContent")
                .body_includes("thinkingBudget");
            then.status(200)
                .json_body(envelope(r#"[{"name":"Deep Co","status":"Established","location":"Austin","description":"x"}]"#));
        })
        .await;

    let mut session = session_for(&server);
    let query = solar_query().with_deep_search(true);
    assert_eq!(session.generate(query).await.expect("request succeeds"), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn invalid_model_output_is_reported_as_invalid_format() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(FLASH_PATH);
            then.status(200).json_body(envelope("Sorry, I could not find anything."));
        })
        .await;

    let mut session = session_for(&server);
    let err = session.generate(solar_query()).await.unwrap_err();

    assert!(matches!(err, DiscoveryError::InvalidFormat(_)));
    assert_eq!(session.last_error(), Some(err.to_string().as_str()));
    assert!(!session.is_busy());
}

#[tokio::test]
async fn failed_load_more_keeps_existing_results() {
    let server = MockServer::start_async().await;
    let mut first = server
        .mock_async(|when, then| {
            when.method(POST).path(FLASH_PATH).body_excludes("DO NOT include");
            then.status(200).json_body(envelope(
                r#"[{"name":"Kept Co","status":"Established","location":"Austin","description":"x"}]"#,
            ));
        })
        .await;

    let mut session = session_for(&server);
    session.generate(solar_query()).await.expect("first page loads");
    first.delete_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(FLASH_PATH);
            then.status(503).body("backend unavailable");
        })
        .await;

    let err = session.load_more().await.unwrap_err();
    assert!(matches!(err, DiscoveryError::Unavailable(_)));

    let kept: Vec<Company> = session.companies().to_vec();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].name, "Kept Co");
    assert!(session.last_error().is_some());
}

#[tokio::test]
async fn incomplete_query_never_reaches_the_service() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).json_body(envelope("[]"));
        })
        .await;

    let mut session = session_for(&server);
    let query = SearchQuery::new("  ", Location::Place("Austin".into()), vec![]);
    let err = session.generate(query).await.unwrap_err();

    assert!(matches!(err, DiscoveryError::InvalidQuery(_)));
    assert_eq!(
        err.to_string(),
        "Please fill in all fields and select at least one status."
    );
    mock.assert_calls_async(0).await;
}
