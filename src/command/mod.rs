//! Command resolution facade. Whatever happens inside, callers always get a
//! `VoiceCommand`; failures become the unresolved sentinel.

pub mod interpreter;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{AppConfig, NluMode};
use crate::error::{ConfigError, ResolveError};
use crate::nlu::{PatternMatcher, VoiceCommand};
use crate::services::wit::{IntentClassifier, WitClient};

pub use interpreter::{LocalInterpreter, RemoteInterpreter};

#[derive(Clone)]
pub enum CommandResolver {
    Local(LocalInterpreter),
    Remote(RemoteInterpreter),
}

impl CommandResolver {
    pub fn local(matcher: Arc<PatternMatcher>) -> Self {
        CommandResolver::Local(LocalInterpreter::new(matcher))
    }

    pub fn remote(classifier: Arc<dyn IntentClassifier>) -> Self {
        CommandResolver::Remote(RemoteInterpreter::new(classifier))
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        match config.nlu.mode {
            NluMode::Local => Ok(Self::local(Arc::new(PatternMatcher::portuguese()?))),
            NluMode::Remote => {
                let client = WitClient::new(&config.wit).map_err(|e| ConfigError::Invalid(e.to_string()))?;
                Ok(Self::remote(Arc::new(client)))
            }
        }
    }

    pub fn mode(&self) -> NluMode {
        match self {
            CommandResolver::Local(_) => NluMode::Local,
            CommandResolver::Remote(_) => NluMode::Remote,
        }
    }

    pub async fn resolve(&self, text: &str) -> VoiceCommand {
        let outcome = match self {
            CommandResolver::Local(local) => local.interpret(text),
            CommandResolver::Remote(remote) => remote.interpret(text).await,
        };

        match outcome {
            Ok(command) => command,
            Err(ResolveError::NoMatch) | Err(ResolveError::EmptyInput) => {
                debug!(mode = ?self.mode(), "utterance did not resolve");
                VoiceCommand::unresolved()
            }
            Err(e) => {
                warn!(mode = ?self.mode(), error = %e, "command resolution failed");
                VoiceCommand::unresolved()
            }
        }
    }
}
