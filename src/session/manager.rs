use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::protocol::{supported_commands, ClientMessage, ServerMessage};
use super::types::{Outbound, Session, SessionId, SessionState};
use crate::command::CommandResolver;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::services::stt::Transcriber;

/// Owns every live session. Registries behind the resolver are shared
/// read-only; only the session map is locked, and never across an `.await`.
pub struct SessionManager {
    sessions: Mutex<HashMap<SessionId, Session>>,
    resolver: CommandResolver,
    transcriber: Arc<dyn Transcriber>,
    default_sample_rate: u32,
}

impl SessionManager {
    pub fn new(resolver: CommandResolver, transcriber: Arc<dyn Transcriber>, config: &SessionConfig) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            resolver,
            transcriber,
            default_sample_rate: config.default_sample_rate,
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionId, Session>> {
        // Recover from poisoning; the map itself is never left half-updated.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a connection and greets it with the capability message.
    pub fn connect(&self, connection: Outbound) -> Result<SessionId, SessionError> {
        let session = Session::new(connection);
        let id = session.id;

        let greeting = ServerMessage::ConnectionStatus {
            status: "connected".to_string(),
            client_id: id.to_string(),
            stt_available: self.transcriber.is_available(),
            supported_commands: supported_commands(),
        };

        self.sessions().insert(id, session);
        info!(session_id = %id, "session connected");

        if let Err(e) = self.send(id, &greeting) {
            warn!(session_id = %id, error = %e, "greeting failed, closing session");
            self.disconnect(id);
            return Err(e);
        }
        Ok(id)
    }

    /// Removes the session. Returns false if it was already gone.
    pub fn disconnect(&self, id: SessionId) -> bool {
        match self.sessions().remove(&id) {
            Some(session) => {
                info!(session_id = %id, age_ms = session.created_at.elapsed().as_millis() as u64, "session closed");
                true
            }
            None => false,
        }
    }

    pub fn state(&self, id: SessionId) -> SessionState {
        if self.sessions().contains_key(&id) {
            SessionState::Active
        } else {
            SessionState::Closed
        }
    }

    pub fn is_active(&self, id: SessionId) -> bool {
        self.state(id) == SessionState::Active
    }

    pub fn active_count(&self) -> usize {
        self.sessions().len()
    }

    pub fn active_ids(&self) -> Vec<SessionId> {
        self.sessions().keys().copied().collect()
    }

    /// Handles one inbound message and sends exactly one reply. Client
    /// mistakes are answered with `error`; only delivery failures are returned.
    pub async fn handle_message(&self, id: SessionId, raw: &str) -> Result<(), SessionError> {
        if !self.is_active(id) {
            return Err(SessionError::UnknownSession(id.to_string()));
        }

        let reply = match ClientMessage::parse(raw) {
            Ok(message) => self.dispatch(id, message).await,
            Err(e) => {
                debug!(session_id = %id, error = %e, "rejected inbound message");
                ServerMessage::error(e.to_string())
            }
        };
        self.send(id, &reply)
    }

    async fn dispatch(&self, id: SessionId, message: ClientMessage) -> ServerMessage {
        match message {
            ClientMessage::AudioData { audio_data, sample_rate } => {
                self.handle_audio(id, &audio_data, sample_rate.unwrap_or(self.default_sample_rate)).await
            }
            ClientMessage::TextCommand { text } => {
                let command = self.resolver.resolve(&text).await;
                debug!(session_id = %id, intent = %command.intent, action = %command.action, "text command resolved");
                ServerMessage::CommandResult { command }
            }
            ClientMessage::Ping { timestamp } => ServerMessage::Pong { timestamp },
            ClientMessage::GetStatus => ServerMessage::Status {
                stt_available: self.transcriber.is_available(),
                supported_commands: supported_commands(),
                active_connections: self.active_count(),
            },
        }
    }

    async fn handle_audio(&self, id: SessionId, audio_data: &str, sample_rate: u32) -> ServerMessage {
        let audio = match STANDARD.decode(audio_data) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(session_id = %id, error = %e, "invalid base64 audio");
                return ServerMessage::error(format!("Erro ao processar áudio: {}", e));
            }
        };

        let transcription = self.transcriber.transcribe(&audio, sample_rate).await;
        if !transcription.success {
            let error = transcription
                .error
                .clone()
                .unwrap_or_else(|| "Nenhum texto detectado".to_string());
            debug!(session_id = %id, error = %error, "transcription failed");
            return ServerMessage::TranscriptionError { error };
        }

        let command = self.resolver.resolve(&transcription.text).await;
        debug!(session_id = %id, intent = %command.intent, action = %command.action, "audio command resolved");
        ServerMessage::TranscriptionResult { transcription, command }
    }

    pub fn send(&self, id: SessionId, message: &ServerMessage) -> Result<(), SessionError> {
        let connection = self
            .sessions()
            .get(&id)
            .map(|s| s.connection.clone())
            .ok_or_else(|| SessionError::UnknownSession(id.to_string()))?;

        let text = message.to_text()?;
        connection
            .send(text)
            .map_err(|_| SessionError::Closed(id.to_string()))
    }

    /// Sends to every active session. Failed sessions are torn down after the
    /// loop. Returns how many sessions received the message.
    pub fn broadcast(&self, message: &ServerMessage) -> Result<usize, SessionError> {
        let text = message.to_text()?;
        let targets: Vec<(SessionId, Outbound)> = self
            .sessions()
            .iter()
            .map(|(id, s)| (*id, s.connection.clone()))
            .collect();

        let mut failed = Vec::new();
        let mut delivered = 0;
        for (id, connection) in targets {
            if connection.send(text.clone()).is_ok() {
                delivered += 1;
            } else {
                warn!(session_id = %id, kind = message.kind(), "broadcast delivery failed");
                failed.push(id);
            }
        }

        for id in failed {
            self.disconnect(id);
        }
        Ok(delivered)
    }

    /// Connects and spawns the session's message loop. Messages from one
    /// session are handled strictly in arrival order.
    pub fn spawn_session(
        self: &Arc<Self>,
        connection: Outbound,
        inbound: mpsc::UnboundedReceiver<String>,
    ) -> Result<(SessionId, JoinHandle<()>), SessionError> {
        let id = self.connect(connection)?;
        let manager = Arc::clone(self);
        let handle = tokio::spawn(async move { manager.run_session(id, inbound).await });
        Ok((id, handle))
    }

    pub async fn run_session(self: Arc<Self>, id: SessionId, mut inbound: mpsc::UnboundedReceiver<String>) {
        let _teardown = Teardown {
            manager: Arc::clone(&self),
            id,
        };

        while let Some(raw) = inbound.recv().await {
            if let Err(e) = self.handle_message(id, &raw).await {
                error!(session_id = %id, error = %e, "session failed, tearing down");
                break;
            }
        }
        debug!(session_id = %id, "inbound stream ended");
    }
}

/// Removes the session however the loop exits, panics included.
struct Teardown {
    manager: Arc<SessionManager>,
    id: SessionId,
}

impl Drop for Teardown {
    fn drop(&mut self) {
        if std::thread::panicking() {
            error!(session_id = %self.id, "session task panicked, tearing down");
        }
        self.manager.disconnect(self.id);
    }
}
