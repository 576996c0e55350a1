//! Speech-to-text boundary. Engines live outside this crate; sessions only
//! see the [`Transcriber`] contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub success: bool,
    pub text: String,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Transcription {
    pub fn ok(text: impl Into<String>, confidence: f32, language: Option<String>) -> Self {
        Self {
            success: true,
            text: text.into(),
            confidence,
            error: None,
            language,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            text: String::new(),
            confidence: 0.0,
            error: Some(error.into()),
            language: None,
        }
    }
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8], sample_rate: u32) -> Transcription;

    fn is_available(&self) -> bool;
}

/// Used when no speech model is installed. Every request fails softly.
#[derive(Debug, Default, Clone)]
pub struct UnavailableTranscriber;

#[async_trait]
impl Transcriber for UnavailableTranscriber {
    async fn transcribe(&self, _audio: &[u8], _sample_rate: u32) -> Transcription {
        Transcription::failed("Modelo STT não disponível")
    }

    fn is_available(&self) -> bool {
        false
    }
}
