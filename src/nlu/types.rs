use regex::Regex;
use serde::{Deserialize, Serialize};

pub const UNKNOWN: &str = "unknown";

/// Result of interpreting one utterance. Built fresh per utterance and
/// consumed by the dispatch layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceCommand {
    pub intent: String,
    pub action: String,
    pub target: Option<String>,
    pub confidence: f32, // 0.0 - 1.0
}

impl VoiceCommand {
    pub fn new(intent: impl Into<String>, action: impl Into<String>, target: Option<String>, confidence: f32) -> Self {
        Self {
            intent: intent.into(),
            action: action.into(),
            target,
            confidence: clamp_confidence(confidence),
        }
    }

    /// Sentinel for anything that did not resolve.
    pub fn unresolved() -> Self {
        Self {
            intent: UNKNOWN.to_string(),
            action: UNKNOWN.to_string(),
            target: None,
            confidence: 0.0,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.action != UNKNOWN
    }
}

pub fn clamp_confidence(confidence: f32) -> f32 {
    if confidence.is_nan() {
        return 0.0;
    }
    confidence.clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct PatternRule {
    pub intent: String,
    pub regex: Regex,
    pub base_confidence: f32,
}

impl PatternRule {
    pub fn new(intent: &str, pattern: &str, base_confidence: f32) -> Result<Self, regex::Error> {
        Ok(Self {
            intent: intent.to_string(),
            regex: Regex::new(pattern)?,
            base_confidence,
        })
    }
}

/// Best rule found for an utterance.
#[derive(Debug, Clone)]
pub struct PatternMatch {
    pub intent: String,
    pub pattern: String,
    /// Participating, non-empty capture groups in order. A group that did
    /// not take part in the match is `None`.
    pub groups: Vec<Option<String>>,
    pub confidence: f32,
}

impl PatternMatch {
    pub fn first_group(&self) -> Option<&str> {
        first_group(&self.groups)
    }
}

pub fn first_group(groups: &[Option<String>]) -> Option<&str> {
    groups.first().and_then(|g| g.as_deref())
}
