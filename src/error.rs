use thiserror::Error;

/// Failures talking to the remote intent classifier.
#[derive(Debug, Error)]
pub enum CommunicationError {
    #[error("classifier request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("classifier returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("classifier response did not match schema: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("classifier unavailable: {0}")]
    Unavailable(String),
}

/// Reasons a command could not be resolved. Never leaves the command facade.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("empty utterance")]
    EmptyInput,

    #[error("no rule or entity matched")]
    NoMatch,

    #[error(transparent)]
    Communication(#[from] CommunicationError),
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// Invalid JSON or missing required fields. Reported to the client.
    #[error("{0}")]
    MalformedInput(String),

    /// Reported to the client, the session stays open.
    #[error("Tipo de mensagem não suportado: {0}")]
    UnsupportedMessageType(String),

    #[error("unknown session {0}")]
    UnknownSession(String),

    /// The outbound side of the connection is gone; fatal for the session.
    #[error("connection closed for session {0}")]
    Closed(String),

    #[error("failed to encode reply: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("invalid pattern rule: {0}")]
    Pattern(#[from] regex::Error),
}
