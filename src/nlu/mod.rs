pub mod entities;
pub mod patterns;
pub mod resolver;
pub mod selectors;
pub mod types;

pub use entities::{EntityKind, EntityProcessor, KnownIntent, Resolution};
pub use patterns::PatternMatcher;
pub use resolver::ActionResolver;
pub use selectors::ElementSelectorRegistry;
pub use types::{PatternMatch, PatternRule, VoiceCommand};
