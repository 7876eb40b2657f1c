/// Background music tracks, in the order the sequencer walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackId {
    Intro,
    Interlude,
    LoopA,
    LoopB,
}

impl TrackId {
    pub const ALL: [TrackId; 4] = [
        TrackId::Intro,
        TrackId::Interlude,
        TrackId::LoopA,
        TrackId::LoopB,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            TrackId::Intro => "intro.mp3",
            TrackId::Interlude => "interlude.mp3",
            TrackId::LoopA => "loop-a.mp3",
            TrackId::LoopB => "loop-b.mp3",
        }
    }

    /// Loop tracks repeat gaplessly inside their sink until skipped away.
    pub fn loops(self) -> bool {
        matches!(self, TrackId::LoopA | TrackId::LoopB)
    }
}

/// One-shot game cues. Scare stingers alternate; Lullaby and Finale mark
/// the dramatic beats of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueId {
    ScareA,
    ScareB,
    Lullaby,
    Finale,
}

impl CueId {
    pub const ALL: [CueId; 4] = [CueId::ScareA, CueId::ScareB, CueId::Lullaby, CueId::Finale];

    pub fn file_name(self) -> &'static str {
        match self {
            CueId::ScareA => "stinger-a.mp3",
            CueId::ScareB => "stinger-b.mp3",
            CueId::Lullaby => "lullaby.mp3",
            CueId::Finale => "finale.mp3",
        }
    }
}

/// Synthesized interaction sounds with no asset files behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Foley {
    /// Dry knob click.
    Click,
    /// Burst of white noise, e.g. while the set tunes between channels.
    Static { ms: u64 },
    /// Match strike and candle hiss for the ritual.
    MatchStrike,
}

#[derive(Debug)]
pub enum AudioCommand {
    SetMasterVolume(f32),
    MusicToggle(bool),
    /// Jump to the other loop track with a crossfade.
    MusicSkip,
    /// Game-wide duck: music drops to silence while the game owns the room.
    DuckGame(bool),
    /// Decoded narration audio. The token lets late arrivals be ignored.
    PlaySpeech { token: u64, data: Vec<u8> },
    StopSpeech,
    PlayCue { cue: CueId },
    /// Stop cues and speech together, e.g. when the set powers off mid-game.
    StopGameAudio,
    AmbientEnable(bool),
    PlayFoley(Foley),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    SpeechEnded { token: u64 },
    CueEnded { cue: CueId },
    TrackStarted { track: TrackId },
    Error(String),
}
