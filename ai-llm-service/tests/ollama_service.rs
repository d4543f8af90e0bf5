//! HTTP contract tests for `OllamaService` against a mock Ollama server.

use ai_llm_service::AiLlmError;
use ai_llm_service::llm::{LlmModelConfig, LlmProvider, OllamaService, TextGenerator};
use mockito::{Matcher, Server};
use serde_json::json;

fn config(endpoint: String, max_retries: u32) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::Ollama,
        model: "gemma:2b".into(),
        endpoint,
        api_key: None,
        max_tokens: Some(256),
        temperature: Some(0.2),
        top_p: None,
        timeout_secs: Some(5),
        max_retries: Some(max_retries),
    }
}

#[tokio::test]
async fn generate_sends_non_streaming_request_and_reads_response() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(json!({
            "model": "gemma:2b",
            "prompt": "document this",
            "stream": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"model":"gemma:2b","response":"stub-doc","done":true}"#)
        .expect(1)
        .create_async()
        .await;

    let svc = OllamaService::new(config(server.url(), 1)).unwrap();
    let out = svc.generate("document this").await.unwrap();

    assert_eq!(out, "stub-doc");
    mock.assert_async().await;
}

#[tokio::test]
async fn trait_call_uses_the_requested_model() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(json!({ "model": "llama3:8b" })))
        .with_status(200)
        .with_body(r#"{"response":"ok"}"#)
        .create_async()
        .await;

    let svc = OllamaService::new(config(server.url(), 0)).unwrap();
    let generator: &dyn TextGenerator = &svc;

    assert_eq!(svc.model(), "gemma:2b");
    assert_eq!(generator.generate("p", "llama3:8b").await.unwrap(), "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_is_retried_once_then_reported_unavailable() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .with_status(503)
        .with_body("model is loading")
        .expect(2)
        .create_async()
        .await;

    let svc = OllamaService::new(config(server.url(), 1)).unwrap();
    let err = svc.generate("p").await.unwrap_err();

    match err {
        AiLlmError::ModelUnavailable { status, reason, .. } => {
            assert_eq!(status.map(|s| s.as_u16()), Some(503));
            assert!(reason.contains("model is loading"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .with_status(404)
        .with_body(r#"{"error":"model 'gemma:2b' not found"}"#)
        .expect(1)
        .create_async()
        .await;

    let svc = OllamaService::new(config(server.url(), 3)).unwrap();
    let err = svc.generate("p").await.unwrap_err();

    assert!(matches!(err, AiLlmError::ModelUnavailable { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn unexpected_shape_is_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(r#"{"text":"no response field"}"#)
        .create_async()
        .await;

    let svc = OllamaService::new(config(server.url(), 1)).unwrap();
    let err = svc.generate("p").await.unwrap_err();

    assert!(matches!(err, AiLlmError::ModelResponseMalformed(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_unavailable() {
    // Port 9 (discard) is closed on test hosts; connection is refused.
    let svc = OllamaService::new(config("http://127.0.0.1:9".into(), 0)).unwrap();
    let err = svc.generate("p").await.unwrap_err();

    assert!(matches!(
        err,
        AiLlmError::ModelUnavailable { status: None, .. } | AiLlmError::Timeout(_)
    ));
}

#[tokio::test]
async fn embed_batch_returns_one_vector_per_input() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/embed")
        .match_body(Matcher::PartialJson(json!({ "input": ["a", "b"] })))
        .with_status(200)
        .with_body(r#"{"embeddings":[[0.1,0.2],[0.3,0.4]]}"#)
        .create_async()
        .await;

    let svc = OllamaService::new(config(server.url(), 0)).unwrap();
    let out = svc
        .embed_batch(&["a".to_string(), "b".to_string()])
        .await
        .unwrap();

    assert_eq!(out, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
}

#[tokio::test]
async fn embed_batch_rejects_count_mismatch() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/embed")
        .with_status(200)
        .with_body(r#"{"embeddings":[[0.1,0.2]]}"#)
        .create_async()
        .await;

    let svc = OllamaService::new(config(server.url(), 0)).unwrap();
    let err = svc
        .embed_batch(&["a".to_string(), "b".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, AiLlmError::ModelResponseMalformed(_)));
}
