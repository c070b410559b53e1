//! Document generators over scripted backends

use pmpro_assist::{
    build_generator, AnalysisGenerator, FallbackGenerator, GenerationOptions, Persona,
    PrdGenerator, ProductBrief, StoryGenerator, StoryStatus, TextGenerator,
};
use pmpro_test_utils::{zero_latency_config, ScriptedGenerator};
use std::sync::Arc;

#[tokio::test]
async fn test_simulated_backend_fills_prd_template() {
    let generator = build_generator(&zero_latency_config()).unwrap();
    assert_eq!(generator.name(), "simulated");

    let doc = PrdGenerator::new(generator)
        .generate(&ProductBrief::named("Task Pilot"))
        .await
        .unwrap();
    assert_eq!(doc.title, "Task Pilot");
    assert_eq!(doc.sections.len(), 8);
    assert_eq!(doc.file_name(), "Task-Pilot.md");
}

#[tokio::test]
async fn test_prd_sampling_options() {
    let backend = Arc::new(ScriptedGenerator::answering("1. Executive Summary\nShort."));
    PrdGenerator::new(backend.clone())
        .generate(&ProductBrief::named("Task Pilot"))
        .await
        .unwrap();

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].prompt.contains("Product Name: Task Pilot"));
    assert_eq!(calls[0].options.max_tokens, 3000);
    assert!((calls[0].options.temperature - 0.7).abs() < f32::EPSILON);
}

#[tokio::test]
async fn test_stories_from_real_response_are_excerpted() {
    let long_response = "x".repeat(450);
    let backend = Arc::new(ScriptedGenerator::answering(long_response));
    let stories = StoryGenerator::new(backend.clone())
        .generate("Bulk export", Persona::Admin)
        .await
        .unwrap();

    assert_eq!(stories.len(), 1);
    assert_eq!(stories[0].story.chars().count(), 200);
    assert_eq!(stories[0].status, StoryStatus::Todo);

    let calls = backend.calls();
    assert!(calls[0].prompt.contains("Bulk export"));
    assert_eq!(calls[0].options.max_tokens, 1500);
}

#[tokio::test]
async fn test_analysis_lists_each_requested_competitor() {
    let backend = Arc::new(ScriptedGenerator::answering("Asana leads on integrations."));
    let names = vec!["Asana".to_string(), "Linear".to_string()];
    let analysis = AnalysisGenerator::new(backend)
        .generate("Task Pilot", &names)
        .await
        .unwrap();

    let listed: Vec<&str> = analysis.competitors.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(listed, ["Asana", "Linear"]);
    assert_eq!(analysis.recommendations, ["Asana leads on integrations."]);
    assert!(analysis.market_share().is_empty());
}

#[tokio::test]
async fn test_fallback_used_only_on_failure() {
    let primary = Arc::new(
        ScriptedGenerator::new()
            .then_fail("model not loaded")
            .then_answer("primary text"),
    );
    let fallback = Arc::new(ScriptedGenerator::answering("fallback text"));
    let chain = FallbackGenerator::new(primary.clone(), fallback.clone());
    let options = GenerationOptions::default();

    assert_eq!(chain.generate("p", &options).await.unwrap(), "fallback text");
    assert_eq!(chain.generate("p", &options).await.unwrap(), "primary text");
    assert_eq!(primary.call_count(), 2);
    assert_eq!(fallback.call_count(), 1);
}

#[tokio::test]
async fn test_fallback_propagates_when_both_fail() {
    let chain = FallbackGenerator::new(
        Arc::new(ScriptedGenerator::failing("down")),
        Arc::new(ScriptedGenerator::failing("also down")),
    );
    let err = chain
        .generate("p", &GenerationOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_retryable());
}
