//! Narration plumbing: every spoken line goes synthesis -> playback, with
//! the request tracker dropping anything the set has already moved past.

use crate::app::Channel;
use crate::audio::AudioCommand;
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::speech::{SpeechCommand, SpeechEvent, VoiceProfile};

use super::{CoreState, SpeechPurpose};

pub(super) fn speak(
    state: &mut CoreState,
    effects: &mut CoreEffects,
    text: String,
    voice: VoiceProfile,
    purpose: SpeechPurpose,
) {
    let id = state.next_req_id();
    state.tracker.issue(RequestKey::Speech, || id);
    state.pending_speech_purpose = Some(purpose);
    effects.send_speech(SpeechCommand::Synthesize {
        req_id: id,
        text,
        voice,
    });
}

pub(super) fn handle_speech_event(
    evt: SpeechEvent,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) {
    match evt {
        SpeechEvent::Audio { req_id, data } => {
            if !state.tracker.accept(&RequestKey::Speech, req_id) {
                tracing::debug!(req_id, "stale speech audio dropped");
                return;
            }
            let purpose = state
                .pending_speech_purpose
                .take()
                .unwrap_or(SpeechPurpose::Line);
            let token = state.next_speech_token();
            state.playing_speech = Some((token, purpose));
            effects.send_audio_warn(
                AudioCommand::PlaySpeech { token, data },
                "audio worker unavailable for narration",
            );
        }
        SpeechEvent::Error { req_id, message } => {
            if !state.tracker.accept(&RequestKey::Speech, req_id) {
                return;
            }
            // Narration degrades silently; anything gated on the line
            // ending is released now.
            tracing::warn!(req_id, err = %message, "narration skipped");
            let purpose = state.pending_speech_purpose.take();
            if purpose == Some(SpeechPurpose::WhispersIntro)
                && state.app.channel == Channel::Whispers
            {
                state.app.whispers_waiting = true;
            }
        }
    }
}

pub(super) fn handle_speech_ended(token: u64, state: &mut CoreState) {
    let Some((playing, purpose)) = state.playing_speech else {
        return;
    };
    if playing != token {
        return;
    }
    state.playing_speech = None;
    if purpose == SpeechPurpose::WhispersIntro && state.app.channel == Channel::Whispers {
        state.app.whispers_waiting = true;
    }
}
