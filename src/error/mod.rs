//! Structured error types, one enum per domain.

mod app;
mod audio;
mod presence;
mod speech;

pub use app::{AppError, SettingsError};
pub use audio::AudioError;
pub use presence::PresenceError;
pub use speech::SpeechError;
