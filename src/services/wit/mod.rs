pub mod client;
pub mod types;

pub use client::{IntentClassifier, WitClient};
pub use types::{EntityGroup, EntityPayload, IntentScore, RemoteIntentResult};
