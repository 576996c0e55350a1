use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::types::RemoteIntentResult;
use crate::config::WitConfig;
use crate::error::CommunicationError;

/// Anything that can turn an utterance into intents and entities.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<RemoteIntentResult, CommunicationError>;
}

#[derive(Clone)]
pub struct WitClient {
    client: Client,
    api_url: String,
    token: String,
}

impl WitClient {
    pub fn new(config: &WitConfig) -> Result<Self, CommunicationError> {
        let token = config
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| CommunicationError::Unavailable("missing classifier token".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms)) // No retries here, callers decide.
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            token,
        })
    }
}

#[async_trait]
impl IntentClassifier for WitClient {
    async fn classify(&self, text: &str) -> Result<RemoteIntentResult, CommunicationError> {
        let response = self
            .client
            .get(&self.api_url)
            .bearer_auth(&self.token)
            .query(&[("q", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CommunicationError::Status(status));
        }

        // Read the body first so schema errors surface as Malformed, not Request.
        let body = response.bytes().await?;
        let result: RemoteIntentResult = serde_json::from_slice(&body)?;
        debug!(intents = result.intents.len(), entities = result.entities.len(), "classifier responded");
        Ok(result)
    }
}
