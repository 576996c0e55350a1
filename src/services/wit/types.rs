use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentScore {
    pub name: String,
    pub confidence: f32,
}

/// One candidate span for an entity, as returned by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityPayload {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub value: Option<String>,
    pub confidence: f32,
}

/// Payloads under one `entity:role` key, highest confidence first.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityGroup {
    pub key: String,
    pub payloads: Vec<EntityPayload>,
}

impl EntityGroup {
    pub fn new(key: &str, payloads: Vec<EntityPayload>) -> Self {
        Self {
            key: key.to_string(),
            payloads,
        }
    }

    pub fn best(&self) -> Option<&EntityPayload> {
        self.payloads.first()
    }
}

/// Decoded classifier response. Any schema mismatch fails the whole decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteIntentResult {
    pub intents: Vec<IntentScore>,
    #[serde(deserialize_with = "ordered_entities")]
    pub entities: Vec<EntityGroup>,
}

impl RemoteIntentResult {
    pub fn top_intent(&self) -> Option<&IntentScore> {
        self.intents.first()
    }
}

// Keeps response order, which decides first-match-wins across groups.
fn ordered_entities<'de, D>(deserializer: D) -> Result<Vec<EntityGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Map::<String, Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            serde_json::from_value::<Vec<EntityPayload>>(value)
                .map(|payloads| EntityGroup { key, payloads })
                .map_err(serde::de::Error::custom)
        })
        .collect()
}
