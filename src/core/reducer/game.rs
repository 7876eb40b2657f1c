//! The truth-or-dare channel: input, candle ritual, cue and clip follow-ups.

use crate::app::{AppCommand, CandlePhase, Channel, Overlay, Speaker};
use crate::audio::{AudioCommand, CueId, Foley};
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::game::GameStep;
use crate::presence::{PresenceClient, PresenceCommand, PresenceEvent};
use crate::speech::VoiceProfile;
use crate::video::{ClipId, VideoCommand, VideoEvent};

use super::{CoreState, SpeechPurpose, channel, narration};

pub(super) fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) {
    match cmd {
        AppCommand::InputChar(c) => {
            if state.app.channel == Channel::Game && !state.app.input_locked {
                state.app.input.push(*c);
            }
        }
        AppCommand::InputBackspace => {
            if state.app.channel == Channel::Game && !state.app.input_locked {
                state.app.input.pop();
            }
        }
        AppCommand::InputSubmit => submit_input(state, effects),
        AppCommand::ToggleLeftCandle => {
            state.app.left_candle_on = !state.app.left_candle_on;
            if state.app.left_candle_on {
                effects.send_audio(AudioCommand::PlayFoley(Foley::MatchStrike));
            }
            candle_ritual(state, effects, state.app.left_candle_on);
        }
        AppCommand::ToggleRightCandle => {
            state.app.right_candle_on = !state.app.right_candle_on;
            if state.app.right_candle_on {
                effects.send_audio(AudioCommand::PlayFoley(Foley::MatchStrike));
            }
            candle_ritual(state, effects, state.app.right_candle_on);
        }
        _ => {}
    }
}

fn submit_input(state: &mut CoreState, effects: &mut CoreEffects) {
    if state.app.channel != Channel::Game || state.app.input_locked || state.session.is_none() {
        return;
    }
    let text = std::mem::take(&mut state.app.input);
    let text = text.trim().to_owned();
    if text.is_empty() {
        return;
    }

    effects.send_audio(AudioCommand::PlayFoley(Foley::Click));
    state.app.push_line(Speaker::Viewer, text.clone());
    state.app.is_typing = true;

    let step = match state.session.as_mut() {
        Some(session) => session.handle_message(&text, &mut rand::thread_rng()),
        None => return,
    };
    apply_step(step, state, effects);
}

fn apply_step(step: GameStep, state: &mut CoreState, effects: &mut CoreEffects) {
    match step {
        GameStep::Spoken { text, stinger } => {
            state.app.is_typing = false;
            speak_line(state, effects, &text, VoiceProfile::Child);
            if let Some(cue) = stinger {
                state.app.input_locked = true;
                state.pending_followup = true;
                effects.send_audio(AudioCommand::PlayCue { cue });
            }
        }
        GameStep::CandleDare { text } => {
            state.app.is_typing = false;
            state.app.candle_phase = CandlePhase::Dared;
            state.app.overlay = Overlay::Innocent;
            speak_line(state, effects, &text, VoiceProfile::Witch);
        }
        GameStep::Silent { cue } => {
            state.app.is_typing = false;
            state.app.input_locked = true;
            state.pending_followup = true;
            effects.send_audio(AudioCommand::PlayCue { cue });
        }
        GameStep::Finale => {
            state.app.is_typing = false;
            state.app.input_locked = true;
            state.app.push_line(Speaker::Tv, "good night...");
            effects.send_audio(AudioCommand::PlayCue { cue: CueId::Finale });
        }
        GameStep::Consult {
            system_prompt,
            history,
        } => {
            let id = state.next_req_id();
            state.tracker.issue(RequestKey::Presence, || id);
            effects.send_presence(PresenceCommand::Reply {
                req_id: id,
                system_prompt,
                history,
            });
        }
    }
}

/// Candle toggles only matter to the game while the dare is live.
fn candle_ritual(state: &mut CoreState, effects: &mut CoreEffects, turned_on: bool) {
    if state.app.channel != Channel::Game {
        return;
    }
    let lit = state.app.candles_lit();
    match state.app.candle_phase {
        CandlePhase::Dared if turned_on && lit == 1 => {
            state.app.candle_phase = CandlePhase::OneLit;
            state.app.overlay = Overlay::Decay;
        }
        CandlePhase::OneLit if lit == 2 => {
            state.app.candle_phase = CandlePhase::Inactive;
            state.app.overlay = Overlay::Clip(ClipId::Ritual);
            state.app.input_locked = true;
            effects.send_video(VideoCommand::Play {
                clip: ClipId::Ritual,
                loops: 1,
            });
        }
        _ => {}
    }
}

pub(super) fn handle_cue_ended(cue: CueId, state: &mut CoreState, effects: &mut CoreEffects) {
    state.app.input_locked = false;
    if cue == CueId::Finale {
        if state.app.channel == Channel::Game {
            channel::go_to_menu(state, effects);
        }
        return;
    }
    if state.app.channel == Channel::Game && state.pending_followup {
        state.pending_followup = false;
        speak_line(state, effects, "truth or dare?", VoiceProfile::Child);
    }
}

pub(super) fn handle_presence_event(
    evt: PresenceEvent,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) {
    let PresenceEvent::Reply { req_id, text } = evt;
    if !state.tracker.accept(&RequestKey::Presence, req_id) {
        tracing::debug!(req_id, "stale presence reply dropped");
        return;
    }
    if state.app.channel != Channel::Game {
        return;
    }
    let Some(session) = state.session.as_mut() else {
        return;
    };
    // The game may have reached its end while the presence was thinking;
    // the finale is terminal, so a late comeback stays unspoken.
    if session.is_finished() {
        tracing::debug!(req_id, "presence reply after the finale dropped");
        return;
    }
    let line = if text == PresenceClient::SENTINEL {
        session.fallback_line()
    } else {
        session.format_presence_reply(&text)
    };
    state.app.is_typing = false;
    speak_line(state, effects, &line, VoiceProfile::Child);
}

pub(super) fn handle_video_event(
    evt: VideoEvent,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) {
    let VideoEvent::Finished { clip } = evt;
    match clip {
        ClipId::Ritual => {
            if state.app.channel == Channel::Game {
                state.app.overlay = Overlay::None;
                state.app.input_locked = false;
                speak_line(state, effects, "truth or dare?", VoiceProfile::Child);
            }
        }
        ClipId::Whispers => {
            if state.app.channel == Channel::Whispers {
                channel::go_to_menu(state, effects);
            }
        }
        ClipId::Party => {
            if state.app.channel == Channel::Confess {
                channel::go_to_menu(state, effects);
            }
        }
    }
}

/// Put a line on the transcript and hand it to synthesis.
pub(super) fn speak_line(
    state: &mut CoreState,
    effects: &mut CoreEffects,
    text: &str,
    voice: VoiceProfile,
) {
    state.app.push_line(Speaker::Tv, text);
    narration::speak(state, effects, text.to_owned(), voice, SpeechPurpose::Line);
}
