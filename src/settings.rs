use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;

/// Every tunable the set designers kept fiddling with lives here. Values
/// not present in the file fall back to the defaults below, so old settings
/// files keep loading after new knobs are added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    // Volume model
    pub master_volume: f32,
    /// Background-music gain as a fraction of master.
    #[serde(default = "default_music_base_volume")]
    pub music_base_volume: f32,
    /// Music gain while narration is speaking.
    #[serde(default = "default_ducked_fraction")]
    pub ducked_fraction: f32,
    #[serde(default = "default_duck_fade_ms")]
    pub duck_fade_ms: u64,
    #[serde(default = "default_duck_fade_steps")]
    pub duck_fade_steps: u32,
    #[serde(default = "default_crossfade_ms")]
    pub crossfade_ms: u64,

    // Channel timing
    #[serde(default = "default_static_boot_ms")]
    pub static_boot_ms: u64,
    #[serde(default = "default_boot_line_ms")]
    pub boot_line_ms: u64,
    #[serde(default = "default_boot_hold_ms")]
    pub boot_hold_ms: u64,
    #[serde(default = "default_channel_pulse_ms")]
    pub channel_pulse_ms: u64,

    // Ambient scare scheduling
    #[serde(default = "default_ambient_initial_min_ms")]
    pub ambient_initial_min_ms: u64,
    #[serde(default = "default_ambient_initial_max_ms")]
    pub ambient_initial_max_ms: u64,
    #[serde(default = "default_ambient_gap_min_ms")]
    pub ambient_gap_min_ms: u64,
    #[serde(default = "default_ambient_gap_max_ms")]
    pub ambient_gap_max_ms: u64,

    // Game
    #[serde(default = "default_round_cap")]
    pub round_cap: u32,
    #[serde(default = "default_confess_loops")]
    pub confess_loops: u32,

    // Assets and collaborators
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    #[serde(default)]
    pub speech: SpeechSettings,
    #[serde(default)]
    pub presence: PresenceSettings,
    #[serde(default)]
    pub video: VideoSettings,
}

/// Speech-synthesis collaborator endpoint. The api key is usually injected
/// via `STATIC_TV_SPEECH_KEY` rather than written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_speech_model")]
    pub model_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_presence_model")]
    pub model: String,
}

/// Clip lengths the video collaborator reports completion against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSettings {
    #[serde(default = "default_party_clip_ms")]
    pub party_clip_ms: u64,
    #[serde(default = "default_whispers_clip_ms")]
    pub whispers_clip_ms: u64,
    #[serde(default = "default_ritual_clip_ms")]
    pub ritual_clip_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.7,
            music_base_volume: default_music_base_volume(),
            ducked_fraction: default_ducked_fraction(),
            duck_fade_ms: default_duck_fade_ms(),
            duck_fade_steps: default_duck_fade_steps(),
            crossfade_ms: default_crossfade_ms(),
            static_boot_ms: default_static_boot_ms(),
            boot_line_ms: default_boot_line_ms(),
            boot_hold_ms: default_boot_hold_ms(),
            channel_pulse_ms: default_channel_pulse_ms(),
            ambient_initial_min_ms: default_ambient_initial_min_ms(),
            ambient_initial_max_ms: default_ambient_initial_max_ms(),
            ambient_gap_min_ms: default_ambient_gap_min_ms(),
            ambient_gap_max_ms: default_ambient_gap_max_ms(),
            round_cap: default_round_cap(),
            confess_loops: default_confess_loops(),
            assets_dir: None,
            http_timeout_secs: default_http_timeout_secs(),
            speech: SpeechSettings::default(),
            presence: PresenceSettings::default(),
            video: VideoSettings::default(),
        }
    }
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_owned(),
            api_key: None,
            model_id: default_speech_model(),
        }
    }
}

impl Default for PresenceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_owned(),
            api_key: None,
            model: default_presence_model(),
        }
    }
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            party_clip_ms: default_party_clip_ms(),
            whispers_clip_ms: default_whispers_clip_ms(),
            ritual_clip_ms: default_ritual_clip_ms(),
        }
    }
}

fn default_music_base_volume() -> f32 {
    0.6
}
fn default_ducked_fraction() -> f32 {
    0.08
}
fn default_duck_fade_ms() -> u64 {
    200
}
fn default_duck_fade_steps() -> u32 {
    10
}
fn default_crossfade_ms() -> u64 {
    500
}
fn default_static_boot_ms() -> u64 {
    1500
}
fn default_boot_line_ms() -> u64 {
    400
}
fn default_boot_hold_ms() -> u64 {
    800
}
fn default_channel_pulse_ms() -> u64 {
    300
}
fn default_ambient_initial_min_ms() -> u64 {
    5_000
}
fn default_ambient_initial_max_ms() -> u64 {
    10_000
}
fn default_ambient_gap_min_ms() -> u64 {
    15_000
}
fn default_ambient_gap_max_ms() -> u64 {
    30_000
}
fn default_round_cap() -> u32 {
    4
}
fn default_confess_loops() -> u32 {
    3
}
fn default_http_timeout_secs() -> u64 {
    30
}
fn default_speech_model() -> String {
    "eleven_multilingual_v2".to_owned()
}
fn default_presence_model() -> String {
    "gemini-2.0-flash-lite".to_owned()
}
fn default_party_clip_ms() -> u64 {
    8_000
}
fn default_whispers_clip_ms() -> u64 {
    24_000
}
fn default_ritual_clip_ms() -> u64 {
    12_000
}

impl AppSettings {
    /// Assets directory, defaulting to `{data_dir}/audio`.
    pub fn assets_dir(&self, data_dir: &Path) -> PathBuf {
        self.assets_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("audio"))
    }
}

pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

pub fn load_settings(data_dir: &Path) -> AppSettings {
    let p = settings_path(data_dir);
    let Ok(bytes) = fs::read(&p) else {
        return AppSettings::default();
    };
    match serde_json::from_slice(&bytes) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(path = %p.display(), err = %e, "settings unreadable, using defaults");
            AppSettings::default()
        }
    }
}

pub fn save_settings(data_dir: &Path, s: &AppSettings) -> Result<(), SettingsError> {
    fs::create_dir_all(data_dir).map_err(|source| SettingsError::Save { source })?;
    let p = settings_path(data_dir);
    let tmp = p.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(s).unwrap_or_else(|_| b"{}".to_vec());
    fs::write(&tmp, bytes).map_err(|source| SettingsError::Save { source })?;
    if let Err(e) = fs::rename(&tmp, &p) {
        // Windows rename-over-existing fallback
        let _ = fs::remove_file(&p);
        fs::rename(&tmp, &p).map_err(|_| SettingsError::Save { source: e })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let s = AppSettings {
            master_volume: 0.5,
            round_cap: 6,
            ..AppSettings::default()
        };
        save_settings(dir.path(), &s).expect("save");

        let loaded = load_settings(dir.path());
        assert_eq!(loaded.master_volume, 0.5);
        assert_eq!(loaded.round_cap, 6);
        assert_eq!(loaded.duck_fade_ms, 200);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let s = load_settings(dir.path());
        assert_eq!(s.music_base_volume, 0.6);
        assert_eq!(s.ducked_fraction, 0.08);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("settings.json"),
            br#"{"master_volume": 0.9}"#,
        )
        .expect("write");
        let s = load_settings(dir.path());
        assert_eq!(s.master_volume, 0.9);
        assert_eq!(s.round_cap, 4);
        assert_eq!(s.ambient_gap_max_ms, 30_000);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("settings.json"), b"{nope").expect("write");
        let s = load_settings(dir.path());
        assert_eq!(s.master_volume, 0.7);
    }
}
