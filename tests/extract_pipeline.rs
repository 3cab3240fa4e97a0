//! End-to-end pipeline tests with mocked captioning and generation services.

use mockito::{Server, ServerGuard};
use recipetube::providers::GeminiProvider;
use recipetube::transcript::CaptionClient;
use recipetube::ExtractError;

const MODEL: &str = "gemini-1.5-flash-002";

fn gemini_path() -> String {
    format!("/v1beta/models/{MODEL}:generateContent?key=test-key")
}

async fn caption_server(body: &str) -> ServerGuard {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/timedtext?v=abc123&lang=ko&fmt=json3")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;
    server
}

async fn gemini_server(body: &str) -> ServerGuard {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", gemini_path().as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;
    server
}

fn gemini_text_response(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] }
        }]
    })
    .to_string()
}

const CAPTIONS: &str = r#"{
    "events": [
        {"segs": [{"utf8": "today we make"}]},
        {"segs": [{"utf8": "kimchi stew"}]}
    ]
}"#;

#[tokio::test]
async fn test_full_extraction_round_trip() {
    let captions = caption_server(CAPTIONS).await;
    let gemini = gemini_server(&gemini_text_response(
        "```json\n{\"title\": \"김치찌개\", \"description\": \"Spicy stew\", \
         \"ingredients\": [{\"name\": \"김치\", \"amount\": \"300g\"}], \
         \"steps\": [{\"order\": 1, \"description\": \"끓인다\"}], \
         \"time\": \"15분\", \"calories\": 420, \
         \"nutrition\": {\"calories\": 420, \"protein\": \"18g\", \"fat\": \"12g\", \"carbs\": \"35g\"}}\n```",
    ))
    .await;

    let caption_client = CaptionClient::with_base_url(captions.url(), "ko".to_string());
    let provider =
        GeminiProvider::with_base_url("test-key".to_string(), gemini.url(), MODEL.to_string());

    let recipe = recipetube::extract_recipe(
        "https://www.youtube.com/watch?v=abc123",
        &caption_client,
        &provider,
        "Korean",
    )
    .await
    .unwrap();

    assert_eq!(recipe.title, "김치찌개");
    assert_eq!(recipe.ingredients.len(), 1);
    assert_eq!(recipe.steps.len(), 1);
    assert_eq!(recipe.calories, 420.0);
    assert_eq!(recipe.video_id, "abc123");
    assert_eq!(recipe.video_url, "https://www.youtube.com/watch?v=abc123");
    assert_eq!(
        recipe.thumbnail_url,
        "https://img.youtube.com/vi/abc123/maxresdefault.jpg"
    );
}

#[tokio::test]
async fn test_invalid_url_fails_before_any_network_call() {
    // Point both clients at unroutable addresses: the parser must reject
    // the URL before either service is contacted.
    let caption_client =
        CaptionClient::with_base_url("http://127.0.0.1:1".to_string(), "ko".to_string());
    let provider = GeminiProvider::with_base_url(
        "test-key".to_string(),
        "http://127.0.0.1:1".to_string(),
        MODEL.to_string(),
    );

    let result = recipetube::extract_recipe(
        "https://example.com/not-a-video",
        &caption_client,
        &provider,
        "Korean",
    )
    .await;

    assert!(matches!(result, Err(ExtractError::InvalidReference)));
}

#[tokio::test]
async fn test_missing_captions_stop_the_pipeline() {
    let mut captions = Server::new_async().await;
    let _m = captions
        .mock("GET", "/api/timedtext?v=abc123&lang=ko&fmt=json3")
        .with_status(404)
        .create_async()
        .await;

    // The generation endpoint must never be reached.
    let caption_client = CaptionClient::with_base_url(captions.url(), "ko".to_string());
    let provider = GeminiProvider::with_base_url(
        "test-key".to_string(),
        "http://127.0.0.1:1".to_string(),
        MODEL.to_string(),
    );

    let result = recipetube::extract_recipe(
        "https://youtu.be/abc123",
        &caption_client,
        &provider,
        "Korean",
    )
    .await;

    assert!(matches!(
        result,
        Err(ExtractError::TranscriptUnavailable(_))
    ));
}

#[tokio::test]
async fn test_not_a_recipe_carries_upstream_reason() {
    let captions = caption_server(CAPTIONS).await;
    let gemini =
        gemini_server(&gemini_text_response(r#"{"error": "Not a recipe"}"#)).await;

    let caption_client = CaptionClient::with_base_url(captions.url(), "ko".to_string());
    let provider =
        GeminiProvider::with_base_url("test-key".to_string(), gemini.url(), MODEL.to_string());

    let result = recipetube::extract_recipe(
        "https://www.youtube.com/shorts/abc123",
        &caption_client,
        &provider,
        "Korean",
    )
    .await;

    match result {
        Err(ExtractError::NotARecipe { reason }) => assert_eq!(reason, "Not a recipe"),
        other => panic!("expected NotARecipe, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unparseable_model_output_is_malformed() {
    let captions = caption_server(CAPTIONS).await;
    let gemini = gemini_server(&gemini_text_response("sure! here is the recipe:")).await;

    let caption_client = CaptionClient::with_base_url(captions.url(), "ko".to_string());
    let provider =
        GeminiProvider::with_base_url("test-key".to_string(), gemini.url(), MODEL.to_string());

    let result = recipetube::extract_recipe(
        "https://www.youtube.com/embed/abc123",
        &caption_client,
        &provider,
        "Korean",
    )
    .await;

    match result {
        Err(ExtractError::MalformedExtraction { raw }) => {
            assert_eq!(raw, "sure! here is the recipe:");
        }
        other => panic!("expected MalformedExtraction, got {other:?}"),
    }
}

#[tokio::test]
async fn test_generation_service_failure_propagates() {
    let captions = caption_server(CAPTIONS).await;
    let mut gemini = Server::new_async().await;
    let _m = gemini
        .mock("POST", gemini_path().as_str())
        .with_status(503)
        .with_body("upstream overloaded")
        .create_async()
        .await;

    let caption_client = CaptionClient::with_base_url(captions.url(), "ko".to_string());
    let provider =
        GeminiProvider::with_base_url("test-key".to_string(), gemini.url(), MODEL.to_string());

    let result = recipetube::extract_recipe(
        "https://www.youtube.com/watch?v=abc123",
        &caption_client,
        &provider,
        "Korean",
    )
    .await;

    assert!(matches!(result, Err(ExtractError::ExtractionService(_))));
}
