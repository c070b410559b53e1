//! Local inference client against a mock server

use pmpro_assist::{
    build_generator, AssistConfig, AssistError, GenerationOptions, OllamaGenerator, PrdGenerator,
    ProductBrief, TextGenerator,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> AssistConfig {
    AssistConfig::new()
        .with_ollama(true)
        .with_base_url(server.uri())
        .with_simulated_latency(Duration::ZERO)
}

#[tokio::test]
async fn test_generate_posts_model_and_options() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "phi3",
            "prompt": "hello",
            "stream": false,
            "options": { "max_tokens": 2000 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "phi3",
            "response": "generated text",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OllamaGenerator::new(&config_for(&server)).unwrap();
    let text = client
        .generate("hello", &GenerationOptions::default())
        .await
        .unwrap();
    assert_eq!(text, "generated text");
}

#[tokio::test]
async fn test_generate_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let client = OllamaGenerator::new(&config_for(&server)).unwrap();
    let err = client
        .generate("hello", &GenerationOptions::default())
        .await
        .unwrap_err();

    match err {
        AssistError::Server { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model not loaded");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_generate_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "" })))
        .mount(&server)
        .await;

    let client = OllamaGenerator::new(&config_for(&server)).unwrap();
    let err = client
        .generate("hello", &GenerationOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AssistError::EmptyResponse));
}

#[tokio::test]
async fn test_check_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
        .mount(&server)
        .await;

    let client = OllamaGenerator::new(&config_for(&server)).unwrap();
    assert!(client.check_status().await);
}

#[tokio::test]
async fn test_check_status_unreachable() {
    let config = AssistConfig::new()
        .with_ollama(true)
        .with_base_url("http://127.0.0.1:9");
    let client = OllamaGenerator::new(&config).unwrap();
    assert!(!client.check_status().await);
}

#[tokio::test]
async fn test_prd_falls_back_to_template_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let generator = build_generator(&config_for(&server)).unwrap();
    let prd = PrdGenerator::new(generator)
        .generate(&ProductBrief::named("Task Pilot"))
        .await
        .unwrap();

    assert_eq!(prd.title, "Task Pilot");
    assert_eq!(prd.sections.len(), 8);
}

#[tokio::test]
async fn test_prd_parses_real_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({ "options": { "max_tokens": 3000 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "1. Executive Summary\nShip it.\n2. Problem Statement\nToo many tools."
        })))
        .mount(&server)
        .await;

    let generator = build_generator(&config_for(&server)).unwrap();
    let prd = PrdGenerator::new(generator)
        .generate(&ProductBrief::named("Task Pilot"))
        .await
        .unwrap();

    assert_eq!(prd.sections.len(), 2);
    assert_eq!(prd.sections[0].title, "1. Executive Summary");
    assert_eq!(prd.sections[1].content, "Too many tools.");
}
