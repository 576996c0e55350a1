use std::sync::Arc;

use async_trait::async_trait;
use voxnav::config::{AppConfig, NluMode};
use voxnav::error::CommunicationError;
use voxnav::nlu::{PatternMatcher, VoiceCommand};
use voxnav::services::wit::{EntityGroup, EntityPayload, IntentClassifier, IntentScore, RemoteIntentResult};
use voxnav::CommandResolver;

fn local() -> CommandResolver {
    CommandResolver::local(Arc::new(PatternMatcher::portuguese().unwrap()))
}

/// Replies with a canned result, or fails like an unreachable service.
struct StubClassifier {
    result: Option<RemoteIntentResult>,
}

#[async_trait]
impl IntentClassifier for StubClassifier {
    async fn classify(&self, _text: &str) -> Result<RemoteIntentResult, CommunicationError> {
        self.result
            .clone()
            .ok_or_else(|| CommunicationError::Unavailable("stub offline".to_string()))
    }
}

fn remote(result: Option<RemoteIntentResult>) -> CommandResolver {
    CommandResolver::remote(Arc::new(StubClassifier { result }))
}

fn classified(intent: &str, confidence: f32, entities: Vec<EntityGroup>) -> RemoteIntentResult {
    RemoteIntentResult {
        intents: vec![IntentScore {
            name: intent.to_string(),
            confidence,
        }],
        entities,
    }
}

#[tokio::test]
async fn test_local_fixtures() {
    let resolver = local();

    let cmd = resolver.resolve("rolar para baixo").await;
    assert_eq!((cmd.intent.as_str(), cmd.action.as_str()), ("navegar", "scroll_down"));

    let cmd = resolver.resolve("ler página").await;
    assert_eq!(cmd.intent, "ler");
    assert_eq!(cmd.action, "read");
    assert_eq!(cmd.target.as_deref(), Some("page_content"));

    let cmd = resolver.resolve("Clicar no botão número 3").await;
    assert_eq!(cmd.intent, "clicar");
    assert_eq!(cmd.action, "click");
    assert_eq!(cmd.target.as_deref(), Some("botão número 3"));

    let cmd = resolver.resolve("ajuda").await;
    assert_eq!(cmd.action, "show_help");
    assert_eq!(cmd.target, None);
    assert!(cmd.confidence <= 1.0);
}

#[tokio::test]
async fn test_local_unresolved_sentinel() {
    let resolver = local();
    for text in ["qualquer coisa sem sentido", "", "   ", "xyz"] {
        let cmd = resolver.resolve(text).await;
        assert_eq!(cmd, VoiceCommand::unresolved(), "for {:?}", text);
        assert_eq!(cmd.target, None);
        assert_eq!(cmd.confidence, 0.0);
    }
}

#[tokio::test]
async fn test_remote_resolves_entities() {
    let entities = vec![EntityGroup::new(
        "scroll:scroll_down",
        vec![EntityPayload {
            name: "scroll".to_string(),
            role: "scroll_down".to_string(),
            value: Some("baixo".to_string()),
            confidence: 0.93,
        }],
    )];
    let cmd = remote(Some(classified("navigate", 0.97, entities))).resolve("rolar para baixo").await;
    assert_eq!(cmd.intent, "navigate");
    assert_eq!(cmd.action, "scroll_down");
    assert_eq!(cmd.target.as_deref(), Some("baixo"));
    assert!((cmd.confidence - 0.97).abs() < 1e-6);
}

#[tokio::test]
async fn test_remote_click_without_target() {
    let cmd = remote(Some(classified("click", 0.8, vec![]))).resolve("clicar").await;
    assert_eq!(cmd, VoiceCommand::unresolved(), "click with nothing to click is not a command");
    assert_eq!(cmd.confidence, 0.0);
    assert!(!cmd.is_resolved());
}

#[tokio::test]
async fn test_remote_fallback_to_intent() {
    let cmd = remote(Some(classified("go_back", 0.9, vec![]))).resolve("voltar").await;
    assert_eq!(cmd.action, "go_back");
}

#[tokio::test]
async fn test_remote_degrades_on_failure() {
    let cmd = remote(None).resolve("rolar para baixo").await;
    assert_eq!(cmd, VoiceCommand::unresolved());

    let cmd = remote(Some(classified("dance", 0.99, vec![]))).resolve("dançar").await;
    assert_eq!(cmd, VoiceCommand::unresolved(), "out-of-vocabulary intent must not resolve");

    let empty = RemoteIntentResult {
        intents: vec![],
        entities: vec![],
    };
    let cmd = remote(Some(empty)).resolve("hmm").await;
    assert_eq!(cmd, VoiceCommand::unresolved());

    let cmd = remote(Some(classified("go_back", 0.9, vec![]))).resolve("  ").await;
    assert_eq!(cmd, VoiceCommand::unresolved(), "empty input never reaches the classifier");
}

#[tokio::test]
async fn test_remote_confidence_clamped() {
    let cmd = remote(Some(classified("show_help", 1.7, vec![]))).resolve("ajuda").await;
    assert_eq!(cmd.confidence, 1.0);
}

#[test]
fn test_from_config_local_by_default() {
    let resolver = CommandResolver::from_config(&AppConfig::default()).unwrap();
    assert_eq!(resolver.mode(), NluMode::Local);
}

#[test]
fn test_config_parsing() {
    let config = AppConfig::from_toml_str(
        r#"
        [nlu]
        mode = "remote"

        [wit]
        token = "secret"
        timeout_ms = 1500

        [session]
        default_sample_rate = 8000
        "#,
    )
    .unwrap();
    assert_eq!(config.nlu.mode, NluMode::Remote);
    assert_eq!(config.wit.timeout_ms, 1500);
    assert_eq!(config.wit.api_url, "https://api.wit.ai/message");
    assert_eq!(config.session.default_sample_rate, 8000);

    assert!(AppConfig::from_toml_str("[nlu]\nmode = \"remote\"\n").is_err(), "remote mode needs a token");
    assert!(AppConfig::from_toml_str("[wit]\ntimeout_ms = 0\n").is_err());
    assert!(AppConfig::from_toml_str("").is_ok());
}
