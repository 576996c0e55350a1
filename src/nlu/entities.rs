use tracing::{debug, warn};

use crate::services::wit::types::{EntityGroup, EntityPayload};

/// Closed intent vocabulary of the remote classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownIntent {
    Click,
    GoBack,
    Navigate,
    Read,
    ShowHelp,
    Zoom,
}

impl KnownIntent {
    pub const ALL: [KnownIntent; 6] = [
        KnownIntent::Click,
        KnownIntent::GoBack,
        KnownIntent::Navigate,
        KnownIntent::Read,
        KnownIntent::ShowHelp,
        KnownIntent::Zoom,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KnownIntent::Click => "click",
            KnownIntent::GoBack => "go_back",
            KnownIntent::Navigate => "navigate",
            KnownIntent::Read => "read",
            KnownIntent::ShowHelp => "show_help",
            KnownIntent::Zoom => "zoom",
        }
    }
}

/// Closed entity vocabulary. Each variant is also the processing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    BrowseElements,
    GetValue,
    Scroll,
    Zoom,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::BrowseElements,
        EntityKind::GetValue,
        EntityKind::Scroll,
        EntityKind::Zoom,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::BrowseElements => "browse_elements",
            EntityKind::GetValue => "get_value",
            EntityKind::Scroll => "scroll",
            EntityKind::Zoom => "zoom",
        }
    }

    fn apply(&self, payload: &EntityPayload, intent: KnownIntent) -> Resolution {
        match self {
            EntityKind::BrowseElements | EntityKind::Scroll | EntityKind::Zoom => Resolution {
                action: Some(payload.role.clone()),
                target: payload.value.clone(),
            },
            EntityKind::GetValue => match &payload.value {
                Some(value) => Resolution {
                    action: Some(intent.as_str().to_string()),
                    target: Some(value.clone()),
                },
                None => Resolution::default(),
            },
        }
    }
}

/// Which roles an entity may carry under a given intent. Anything absent is rejected.
const COMPATIBILITY: &[(EntityKind, KnownIntent, &[&str])] = &[
    (EntityKind::BrowseElements, KnownIntent::Navigate, &["navigate_previous", "navigate_next", "navigate_to"]),
    (EntityKind::GetValue, KnownIntent::Click, &["value"]),
    (EntityKind::GetValue, KnownIntent::Read, &["value"]),
    (EntityKind::Scroll, KnownIntent::Navigate, &["scroll_up", "scroll_down", "scroll_right", "scroll_left"]),
    (EntityKind::Zoom, KnownIntent::Zoom, &["zoom_out", "zoom_in"]),
];

pub fn allowed_roles(entity: EntityKind, intent: KnownIntent) -> Option<&'static [&'static str]> {
    COMPATIBILITY
        .iter()
        .find(|(e, i, _)| *e == entity && *i == intent)
        .map(|(_, _, roles)| *roles)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub action: Option<String>,
    pub target: Option<String>,
}

/// Validates classifier entities against the vocabularies and the
/// compatibility table, then applies the first strategy that yields an action.
#[derive(Debug, Clone, Default)]
pub struct EntityProcessor;

impl EntityProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, entities: &[EntityGroup], intent: &str) -> Resolution {
        let Some(intent) = KnownIntent::parse(intent) else {
            warn!(intent, "intent outside vocabulary, ignoring entities");
            return Resolution::default();
        };

        let mut resolution = Resolution::default();
        for group in entities {
            let Some(payload) = group.best() else {
                continue;
            };
            let Some(kind) = self.validate(payload, intent) else {
                continue;
            };
            let candidate = kind.apply(payload, intent);
            if candidate.action.is_some() {
                debug!(entity = kind.as_str(), role = %payload.role, "entity resolved");
                resolution = candidate;
                break;
            }
        }

        match intent {
            KnownIntent::Click if resolution.target.is_none() => return Resolution::default(),
            KnownIntent::Read if resolution.target.is_some() => {
                resolution.action = Some(intent.as_str().to_string());
            }
            KnownIntent::GoBack | KnownIntent::ShowHelp => {
                resolution.action = Some(intent.as_str().to_string());
            }
            _ => {}
        }

        if resolution.action.is_none() {
            resolution.action = Some(intent.as_str().to_string());
        }
        resolution
    }

    fn validate(&self, payload: &EntityPayload, intent: KnownIntent) -> Option<EntityKind> {
        let Some(kind) = EntityKind::parse(&payload.name) else {
            warn!(entity = %payload.name, "entity outside vocabulary, skipping");
            return None;
        };
        match allowed_roles(kind, intent) {
            Some(roles) if roles.contains(&payload.role.as_str()) => Some(kind),
            Some(_) => {
                warn!(entity = kind.as_str(), role = %payload.role, intent = intent.as_str(), "role not allowed for intent, skipping");
                None
            }
            None => {
                warn!(entity = kind.as_str(), intent = intent.as_str(), "entity not compatible with intent, skipping");
                None
            }
        }
    }
}
