//! Audio orchestration: background music with crossfades, narration ducking,
//! one-shot game cues, synthesized foley and randomized ambient scares.

pub mod ambient;
pub mod duck;
mod engine;
mod fade;
mod foley;
pub mod messages;
pub mod mixer;
mod null_engine;
pub mod sequencer;

use std::path::PathBuf;
use tokio::sync::mpsc;

pub use ambient::AmbientConfig;
pub use messages::{AudioCommand, AudioEvent, CueId, Foley, TrackId};

use crate::settings::AppSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioBackend {
    #[default]
    Real,
    /// Event-echo engine for tests and headless runs.
    Null,
}

#[derive(Debug, Clone)]
pub struct AudioSettings {
    pub assets_dir: PathBuf,
    pub master_volume: f32,
    pub music_base_volume: f32,
    pub ducked_fraction: f32,
    pub duck_fade_ms: u64,
    pub duck_fade_steps: u32,
    pub crossfade_ms: u64,
    pub ambient: AmbientConfig,
}

impl AudioSettings {
    pub fn from_app(settings: &AppSettings, assets_dir: PathBuf) -> Self {
        Self {
            assets_dir,
            master_volume: settings.master_volume,
            music_base_volume: settings.music_base_volume,
            ducked_fraction: settings.ducked_fraction,
            duck_fade_ms: settings.duck_fade_ms,
            duck_fade_steps: settings.duck_fade_steps,
            crossfade_ms: settings.crossfade_ms,
            ambient: AmbientConfig {
                initial_min_ms: settings.ambient_initial_min_ms,
                initial_max_ms: settings.ambient_initial_max_ms,
                gap_min_ms: settings.ambient_gap_min_ms,
                gap_max_ms: settings.ambient_gap_max_ms,
            },
        }
    }
}

pub fn spawn_audio_worker(
    backend: AudioBackend,
    settings: AudioSettings,
) -> (mpsc::Sender<AudioCommand>, mpsc::Receiver<AudioEvent>) {
    let (tx_cmd, rx_cmd) = mpsc::channel::<AudioCommand>(64);
    let (tx_evt, rx_evt) = mpsc::channel::<AudioEvent>(64);

    match backend {
        AudioBackend::Real => engine::spawn(rx_cmd, tx_evt, settings),
        AudioBackend::Null => null_engine::spawn(rx_cmd, tx_evt, settings),
    }

    (tx_cmd, rx_evt)
}
