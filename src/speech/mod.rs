//! Narration synthesis. A thin client over an ElevenLabs-style endpoint
//! plus an actor that turns requests into decoded-ready audio bytes.

mod actor;
mod client;

pub use actor::{SpeechCommand, SpeechEvent, spawn_speech_actor};
pub use client::SpeechClient;

/// The cast of the haunted set. Each profile maps to a pre-made voice on
/// the synthesis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceProfile {
    /// The game show host, theatrical and too cheerful.
    Host,
    /// The witch on the late-night channel.
    Witch,
    /// The child heard through the static.
    Child,
    /// The gentle voice that reads the lullaby beat.
    Gentle,
}

impl VoiceProfile {
    pub fn voice_id(self) -> &'static str {
        match self {
            VoiceProfile::Host => "JBFqnCBsd6RMkjVDRZzb",
            VoiceProfile::Witch => "XB0fDUnXU5powFXDhCwa",
            VoiceProfile::Child => "EXAVITQu4vr4xnSDxMaL",
            VoiceProfile::Gentle => "pFZP5JQG7iQjIQuC4Bku",
        }
    }
}
