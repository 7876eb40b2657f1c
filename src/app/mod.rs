//! Application state: what the television is currently showing and what the
//! room around it looks like. The core reducer is the only writer.

use crate::audio::TrackId;
use crate::video::ClipId;

/// Lines printed one by one during the system boot.
pub const BOOT_LINES: &[&str] = &[
    "INITIALIZING...",
    "...........................................",
    "WARNING: [CORRUPTED] DETECTED",
    "STATUS: UNSTABLE",
    "",
];

/// What the set is tuned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    #[default]
    Off,
    /// Raw static right after power-on.
    StaticBoot,
    /// The fake firmware banner, one line at a time.
    SystemBoot,
    Menu,
    /// Truth or dare with the thing in the television.
    Game,
    /// The whispering faces channel.
    Whispers,
    /// The confession booth: a clip plays, nobody answers.
    Confess,
}

/// Menu entries, in display order.
pub const MENU_ENTRIES: &[&str] = &["TRUTH OR DARE", "WHISPERS", "CONFESS"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Viewer,
    Tv,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub text: String,
}

/// Full-screen overlay on top of the channel content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    /// The innocent photograph shown when the candle dare begins.
    Innocent,
    /// The same photograph, rotting. First candle is lit.
    Decay,
    Clip(ClipId),
}

/// Where the candle ritual stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandlePhase {
    #[default]
    Inactive,
    /// Waiting for the first candle.
    Dared,
    /// One candle lit; the photograph has turned.
    OneLit,
}

#[derive(Debug, Clone, Default)]
pub struct App {
    pub channel: Channel,
    pub boot_lines_shown: usize,
    pub knob_pulse: bool,
    pub menu_selected: usize,

    pub transcript: Vec<ChatLine>,
    pub input: String,
    pub is_typing: bool,
    /// Submissions are ignored while a cue or clip holds the floor.
    pub input_locked: bool,
    pub whispers_waiting: bool,
    pub overlay: Overlay,

    pub left_candle_on: bool,
    pub right_candle_on: bool,
    pub candle_phase: CandlePhase,

    pub volume: f32,
    pub muted: bool,
    pub music_enabled: bool,
    pub now_playing: Option<TrackId>,

    pub toast: Option<String>,
}

impl App {
    pub fn push_line(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.transcript.push(ChatLine {
            speaker,
            text: text.into(),
        });
    }

    pub fn candles_lit(&self) -> u8 {
        u8::from(self.left_candle_on) + u8::from(self.right_candle_on)
    }
}

/// Immutable view of [`App`] handed to the renderer.
#[derive(Debug, Clone)]
pub struct AppSnapshot {
    pub channel: Channel,
    pub boot_lines: Vec<&'static str>,
    pub knob_pulse: bool,
    pub menu_selected: usize,
    pub transcript: Vec<ChatLine>,
    pub input: String,
    pub is_typing: bool,
    pub input_locked: bool,
    pub whispers_waiting: bool,
    pub overlay: Overlay,
    pub left_candle_on: bool,
    pub right_candle_on: bool,
    pub volume: f32,
    pub muted: bool,
    pub music_enabled: bool,
    pub now_playing: Option<TrackId>,
    pub toast: Option<String>,
}

impl AppSnapshot {
    pub fn from_app(app: &App) -> Self {
        Self {
            channel: app.channel,
            boot_lines: BOOT_LINES[..app.boot_lines_shown.min(BOOT_LINES.len())].to_vec(),
            knob_pulse: app.knob_pulse,
            menu_selected: app.menu_selected,
            transcript: app.transcript.clone(),
            input: app.input.clone(),
            is_typing: app.is_typing,
            input_locked: app.input_locked,
            whispers_waiting: app.whispers_waiting,
            overlay: app.overlay,
            left_candle_on: app.left_candle_on,
            right_candle_on: app.right_candle_on,
            volume: app.volume,
            muted: app.muted,
            music_enabled: app.music_enabled,
            now_playing: app.now_playing,
            toast: app.toast.clone(),
        }
    }
}

/// Commands from the front panel (keyboard, knobs, candles).
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    PowerToggle,
    MenuUp,
    MenuDown,
    MenuSelect,
    InputChar(char),
    InputBackspace,
    InputSubmit,
    /// Turn the channel knob one notch; the set re-tunes through static.
    RotateKnob,
    /// Back out of the current channel to the menu.
    Back,
    /// Confirm on the whispers channel.
    Confirm,
    ToggleMusic,
    SkipTrack,
    SetVolume(f32),
    ToggleMute,
    ToggleLeftCandle,
    ToggleRightCandle,
    Quit,
}

/// Events back to the renderer.
#[derive(Debug)]
pub enum AppEvent {
    State(Box<AppSnapshot>),
    Toast(String),
}
