pub mod command;
pub mod config;
pub mod error;
pub mod nlu;
pub mod services;
pub mod session;

// Re-export specific items for convenient access
pub use command::CommandResolver;
pub use config::AppConfig;
pub use nlu::VoiceCommand;
pub use session::SessionManager;
