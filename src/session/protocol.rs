use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::SessionError;
use crate::nlu::VoiceCommand;
use crate::services::stt::Transcription;

/// Inbound message types. Anything else gets an `error` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    AudioData,
    TextCommand,
    Ping,
    GetStatus,
}

impl MessageType {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "audio_data" => Some(MessageType::AudioData),
            "text_command" => Some(MessageType::TextCommand),
            "ping" => Some(MessageType::Ping),
            "get_status" => Some(MessageType::GetStatus),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    AudioData { audio_data: String, sample_rate: Option<u32> },
    TextCommand { text: String },
    Ping { timestamp: Value },
    GetStatus,
}

#[derive(Deserialize)]
struct AudioDataFields {
    #[serde(default)]
    audio_data: Option<String>,
    #[serde(default)]
    sample_rate: Option<u32>,
}

#[derive(Deserialize)]
struct TextCommandFields {
    #[serde(default)]
    text: Option<String>,
}

impl ClientMessage {
    /// Two-step decode: the `type` tag picks the variant, then the variant's
    /// fields are checked.
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|_| SessionError::MalformedInput("Formato JSON inválido".to_string()))?;
        if !value.is_object() {
            return Err(SessionError::MalformedInput("Formato JSON inválido".to_string()));
        }

        let kind = match value.get("type") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "null".to_string(),
        };
        let message_type = MessageType::parse(&kind).ok_or(SessionError::UnsupportedMessageType(kind))?;

        match message_type {
            MessageType::AudioData => {
                let fields: AudioDataFields = serde_json::from_value(value)
                    .map_err(|e| SessionError::MalformedInput(format!("Mensagem de áudio inválida: {}", e)))?;
                match fields.audio_data.filter(|a| !a.is_empty()) {
                    Some(audio_data) => Ok(ClientMessage::AudioData {
                        audio_data,
                        sample_rate: fields.sample_rate,
                    }),
                    None => Err(SessionError::MalformedInput("Dados de áudio não fornecidos".to_string())),
                }
            }
            MessageType::TextCommand => {
                let fields: TextCommandFields = serde_json::from_value(value)
                    .map_err(|e| SessionError::MalformedInput(format!("Comando de texto inválido: {}", e)))?;
                match fields.text.filter(|t| !t.trim().is_empty()) {
                    Some(text) => Ok(ClientMessage::TextCommand { text }),
                    None => Err(SessionError::MalformedInput("Texto do comando não fornecido".to_string())),
                }
            }
            MessageType::Ping => Ok(ClientMessage::Ping {
                timestamp: value.get("timestamp").cloned().unwrap_or(Value::Null),
            }),
            MessageType::GetStatus => Ok(ClientMessage::GetStatus),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    ConnectionStatus {
        status: String,
        client_id: String,
        stt_available: bool,
        supported_commands: Value,
    },
    TranscriptionResult {
        transcription: Transcription,
        command: VoiceCommand,
    },
    TranscriptionError {
        error: String,
    },
    CommandResult {
        command: VoiceCommand,
    },
    Pong {
        timestamp: Value,
    },
    Status {
        stt_available: bool,
        supported_commands: Value,
        active_connections: usize,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error { message: message.into() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::ConnectionStatus { .. } => "connection_status",
            ServerMessage::TranscriptionResult { .. } => "transcription_result",
            ServerMessage::TranscriptionError { .. } => "transcription_error",
            ServerMessage::CommandResult { .. } => "command_result",
            ServerMessage::Pong { .. } => "pong",
            ServerMessage::Status { .. } => "status",
            ServerMessage::Error { .. } => "error",
        }
    }

    pub fn to_text(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Phrase examples shown to users, grouped by category.
pub fn supported_commands() -> Value {
    json!({
        "navegação": [
            "ir para [elemento]",
            "rolar para baixo/cima/esquerda/direita",
            "próximo/anterior elemento",
            "primeiro/último elemento"
        ],
        "interação": [
            "clicar em [elemento]",
            "botão [nome]",
            "número [índice]"
        ],
        "leitura": [
            "ler [elemento]",
            "ler página",
            "o que é [elemento]"
        ],
        "sistema": [
            "ajuda",
            "voltar",
            "aumentar/diminuir zoom"
        ]
    })
}
