//! The equipment rack: music toggle, track skip, volume and mute.

use crate::app::{AppCommand, Channel};
use crate::audio::{AudioCommand, TrackId};
use crate::core::effects::CoreEffects;

use super::CoreState;

pub(super) fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) {
    if state.app.channel == Channel::Off {
        return;
    }
    match cmd {
        AppCommand::ToggleMusic => {
            state.app.music_enabled = !state.app.music_enabled;
            let on = state.app.music_enabled;
            tracing::info!(on, "music toggled");
            effects.send_audio(AudioCommand::MusicToggle(on));
            // Ambient scares fill the silence, but never over a game channel.
            let in_show = matches!(
                state.app.channel,
                Channel::Game | Channel::Whispers | Channel::Confess
            );
            effects.send_audio(AudioCommand::AmbientEnable(!on && !in_show));
        }
        AppCommand::SkipTrack => {
            if !state.app.music_enabled {
                state.app.music_enabled = true;
                effects.send_audio(AudioCommand::MusicToggle(true));
                effects.send_audio(AudioCommand::AmbientEnable(false));
            }
            effects.send_audio(AudioCommand::MusicSkip);
        }
        AppCommand::SetVolume(v) => {
            state.app.volume = v.clamp(0.0, 1.0);
            if !state.app.muted {
                effects.send_audio(AudioCommand::SetMasterVolume(state.app.volume));
            }
        }
        AppCommand::ToggleMute => {
            state.app.muted = !state.app.muted;
            let master = if state.app.muted {
                0.0
            } else {
                state.app.volume
            };
            effects.send_audio(AudioCommand::SetMasterVolume(master));
        }
        _ => {}
    }
}

pub(super) fn handle_track_started(track: TrackId, state: &mut CoreState) {
    state.app.now_playing = Some(track);
}
