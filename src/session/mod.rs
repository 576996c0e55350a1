pub mod manager;
pub mod protocol;
pub mod types;

pub use manager::SessionManager;
pub use protocol::{supported_commands, ClientMessage, MessageType, ServerMessage};
pub use types::{Outbound, Session, SessionId, SessionState};
