use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Outbound half of a connection. Sending fails once the peer is gone.
pub type Outbound = mpsc::UnboundedSender<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Derived from membership in the active map: a registered session is
/// `Active`, anything else is `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Active,
    Closed,
}

#[derive(Debug)]
pub struct Session {
    pub id: SessionId,
    pub connection: Outbound,
    pub created_at: Instant,
}

impl Session {
    pub fn new(connection: Outbound) -> Self {
        Self {
            id: SessionId::new(),
            connection,
            created_at: Instant::now(),
        }
    }
}
