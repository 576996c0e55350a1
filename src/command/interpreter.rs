use std::sync::Arc;

use tracing::debug;

use crate::error::ResolveError;
use crate::nlu::patterns::normalize;
use crate::nlu::{ActionResolver, EntityProcessor, KnownIntent, PatternMatcher, VoiceCommand};
use crate::services::wit::IntentClassifier;

/// Regex catalog + action resolver. Runs entirely in-process.
#[derive(Debug, Clone)]
pub struct LocalInterpreter {
    matcher: Arc<PatternMatcher>,
    resolver: ActionResolver,
}

impl LocalInterpreter {
    pub fn new(matcher: Arc<PatternMatcher>) -> Self {
        Self {
            matcher,
            resolver: ActionResolver::new(),
        }
    }

    pub fn interpret(&self, text: &str) -> Result<VoiceCommand, ResolveError> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Err(ResolveError::EmptyInput);
        }

        let found = self.matcher.find(&normalized).ok_or(ResolveError::NoMatch)?;
        let (action, target) = self.resolver.resolve(&found.intent, &found.groups, &normalized);
        Ok(VoiceCommand::new(found.intent, action, target, found.confidence))
    }
}

/// Remote classifier + entity validation.
#[derive(Clone)]
pub struct RemoteInterpreter {
    classifier: Arc<dyn IntentClassifier>,
    processor: EntityProcessor,
}

impl RemoteInterpreter {
    pub fn new(classifier: Arc<dyn IntentClassifier>) -> Self {
        Self {
            classifier,
            processor: EntityProcessor::new(),
        }
    }

    pub async fn interpret(&self, text: &str) -> Result<VoiceCommand, ResolveError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ResolveError::EmptyInput);
        }

        let result = self.classifier.classify(text).await?;
        let top = result.top_intent().ok_or(ResolveError::NoMatch)?;
        let intent = KnownIntent::parse(&top.name).ok_or(ResolveError::NoMatch)?;

        let resolution = self.processor.process(&result.entities, intent.as_str());
        debug!(intent = intent.as_str(), action = ?resolution.action, "remote command resolved");

        // Only an unresolved click comes back without an action.
        let action = resolution.action.ok_or(ResolveError::NoMatch)?;
        Ok(VoiceCommand::new(intent.as_str(), action, resolution.target, top.confidence))
    }
}
