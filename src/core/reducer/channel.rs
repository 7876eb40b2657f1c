//! Power, boot sequence, menu navigation and channel transitions.

use crate::app::{AppCommand, BOOT_LINES, Channel, MENU_ENTRIES, Overlay};
use crate::audio::{AudioCommand, Foley};
use crate::core::effects::{CoreEffects, TimerFire, TimerKind};
use crate::game::GameSession;
use crate::speech::VoiceProfile;
use crate::video::{ClipId, VideoCommand};

use super::{CoreState, SpeechPurpose, game, narration};

const WHISPERS_INTRO: &str = "do you want to hear my whispers... love? come closer... \
     let me tell you what the dead have told me...";

pub(super) fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) {
    match cmd {
        AppCommand::PowerToggle => {
            if state.app.channel == Channel::Off {
                power_on(state, effects);
            } else {
                power_off(state, effects);
            }
        }
        AppCommand::MenuUp => {
            if state.app.channel == Channel::Menu && state.app.menu_selected > 0 {
                state.app.menu_selected -= 1;
                effects.send_audio(AudioCommand::PlayFoley(Foley::Click));
            }
        }
        AppCommand::MenuDown => {
            if state.app.channel == Channel::Menu
                && state.app.menu_selected + 1 < MENU_ENTRIES.len()
            {
                state.app.menu_selected += 1;
                effects.send_audio(AudioCommand::PlayFoley(Foley::Click));
            }
        }
        AppCommand::MenuSelect => {
            if state.app.channel == Channel::Menu {
                match state.app.menu_selected {
                    0 => enter_game(state, effects),
                    1 => enter_whispers(state, effects),
                    _ => enter_confess(state, effects),
                }
            }
        }
        AppCommand::RotateKnob => rotate_knob(state, effects),
        AppCommand::Back => {
            if matches!(
                state.app.channel,
                Channel::Game | Channel::Whispers | Channel::Confess
            ) {
                go_to_menu(state, effects);
            }
        }
        AppCommand::Confirm => {
            if state.app.channel == Channel::Whispers && state.app.whispers_waiting {
                effects.send_audio(AudioCommand::PlayFoley(Foley::Click));
                state.app.whispers_waiting = false;
                state.app.input_locked = true;
                state.app.overlay = Overlay::Clip(ClipId::Whispers);
                effects.send_video(VideoCommand::Play {
                    clip: ClipId::Whispers,
                    loops: 1,
                });
            }
        }
        _ => {}
    }
}

pub(super) fn handle_timer(fire: TimerFire, state: &mut CoreState, effects: &mut CoreEffects) {
    if fire.generation != state.timer_gen {
        tracing::trace!(?fire.kind, "stale timer dropped");
        return;
    }
    match fire.kind {
        TimerKind::BootStatic => {
            if state.app.channel == Channel::StaticBoot {
                state.app.channel = Channel::SystemBoot;
                state.app.boot_lines_shown = 0;
                effects.schedule_timer(
                    TimerKind::BootLine,
                    state.timer_gen,
                    state.settings.boot_line_ms,
                );
            }
        }
        TimerKind::BootLine => {
            if state.app.channel == Channel::SystemBoot {
                state.app.boot_lines_shown += 1;
                effects.send_audio(AudioCommand::PlayFoley(Foley::Click));
                if state.app.boot_lines_shown < BOOT_LINES.len() {
                    effects.schedule_timer(
                        TimerKind::BootLine,
                        state.timer_gen,
                        state.settings.boot_line_ms,
                    );
                } else {
                    effects.schedule_timer(
                        TimerKind::BootDone,
                        state.timer_gen,
                        state.settings.boot_hold_ms,
                    );
                }
            }
        }
        TimerKind::BootDone => {
            if state.app.channel == Channel::SystemBoot {
                state.app.channel = Channel::Menu;
                state.app.menu_selected = 0;
            }
        }
        TimerKind::KnobPulse => {
            state.app.knob_pulse = false;
        }
        TimerKind::KnobWarmup => {
            if state.app.channel == Channel::StaticBoot
                && let Some(next) = state.pending_channel.take()
            {
                match next {
                    Channel::Game => enter_game(state, effects),
                    Channel::Whispers => enter_whispers(state, effects),
                    Channel::Confess => enter_confess(state, effects),
                    _ => go_to_menu(state, effects),
                }
            }
        }
    }
}

/// Channels the knob walks through, in dial order.
const KNOB_ORDER: [Channel; 4] = [
    Channel::Menu,
    Channel::Game,
    Channel::Whispers,
    Channel::Confess,
];

/// One notch on the channel knob. The set never jumps straight to the next
/// channel: it drops into a short static pulse first, then tunes in.
/// Turning again during the pulse keeps walking the dial.
fn rotate_knob(state: &mut CoreState, effects: &mut CoreEffects) {
    let from = match state.app.channel {
        Channel::Off | Channel::SystemBoot => return,
        Channel::StaticBoot => match state.pending_channel {
            Some(target) => target,
            // Boot-time static has no knob target yet.
            None => return,
        },
        ch => ch,
    };
    let pos = KNOB_ORDER.iter().position(|c| *c == from).unwrap_or(0);
    let next = KNOB_ORDER[(pos + 1) % KNOB_ORDER.len()];
    tracing::info!(?next, "knob rotated");

    transition(state, effects);
    pulse_knob(state, effects);
    state.app.channel = Channel::StaticBoot;
    state.session = None;
    state.pending_channel = Some(next);
    effects.send_audio(AudioCommand::PlayFoley(Foley::Static {
        ms: state.settings.channel_pulse_ms,
    }));
    effects.schedule_timer(
        TimerKind::KnobWarmup,
        state.timer_gen,
        state.settings.channel_pulse_ms,
    );
}

/// Clear everything the previous channel left on screen.
fn reset_screen(state: &mut CoreState) {
    state.app.transcript.clear();
    state.app.input.clear();
    state.app.is_typing = false;
    state.app.input_locked = false;
    state.app.whispers_waiting = false;
    state.app.overlay = Overlay::None;
    state.app.candle_phase = Default::default();
    state.app.knob_pulse = false;
    state.app.toast = None;
}

/// Common bookkeeping for every channel transition: invalidate timers,
/// drop in-flight requests, silence the previous channel.
fn transition(state: &mut CoreState, effects: &mut CoreEffects) {
    state.timer_gen += 1;
    state.tracker.reset_all();
    state.pending_speech_purpose = None;
    state.playing_speech = None;
    state.pending_followup = false;
    state.pending_channel = None;
    reset_screen(state);
    effects.send_audio(AudioCommand::StopSpeech);
    effects.send_audio(AudioCommand::StopGameAudio);
    effects.send_video(VideoCommand::Stop);
}

fn pulse_knob(state: &mut CoreState, effects: &mut CoreEffects) {
    state.app.knob_pulse = true;
    effects.send_audio(AudioCommand::PlayFoley(Foley::Click));
    effects.schedule_timer(
        TimerKind::KnobPulse,
        state.timer_gen,
        state.settings.channel_pulse_ms,
    );
}

fn power_on(state: &mut CoreState, effects: &mut CoreEffects) {
    tracing::info!("power on");
    transition(state, effects);
    state.app.channel = Channel::StaticBoot;
    state.app.music_enabled = true;
    effects.send_audio(AudioCommand::PlayFoley(Foley::Static {
        ms: state.settings.static_boot_ms,
    }));
    effects.send_audio_warn(AudioCommand::MusicToggle(true), "audio worker gone at boot");
    effects.send_audio(AudioCommand::AmbientEnable(false));
    effects.schedule_timer(
        TimerKind::BootStatic,
        state.timer_gen,
        state.settings.static_boot_ms,
    );
}

fn power_off(state: &mut CoreState, effects: &mut CoreEffects) {
    tracing::info!("power off");
    transition(state, effects);
    state.app.channel = Channel::Off;
    state.session = None;
    effects.send_audio(AudioCommand::MusicToggle(false));
    effects.send_audio(AudioCommand::AmbientEnable(false));
    effects.send_audio(AudioCommand::DuckGame(false));
}

fn enter_game(state: &mut CoreState, effects: &mut CoreEffects) {
    tracing::info!("channel: truth or dare");
    transition(state, effects);
    pulse_knob(state, effects);
    state.app.channel = Channel::Game;
    // The candles go out when the game begins.
    state.app.left_candle_on = false;
    state.app.right_candle_on = false;
    state.session = Some(GameSession::new(state.settings.round_cap));
    effects.send_audio(AudioCommand::DuckGame(true));
    effects.send_audio(AudioCommand::AmbientEnable(false));
    game::speak_line(state, effects, "truth or dare?", VoiceProfile::Child);
}

fn enter_whispers(state: &mut CoreState, effects: &mut CoreEffects) {
    tracing::info!("channel: whispers");
    transition(state, effects);
    pulse_knob(state, effects);
    state.app.channel = Channel::Whispers;
    effects.send_audio(AudioCommand::DuckGame(true));
    effects.send_audio(AudioCommand::AmbientEnable(false));
    narration::speak(
        state,
        effects,
        WHISPERS_INTRO.to_owned(),
        VoiceProfile::Witch,
        SpeechPurpose::WhispersIntro,
    );
}

fn enter_confess(state: &mut CoreState, effects: &mut CoreEffects) {
    tracing::info!("channel: confess");
    transition(state, effects);
    pulse_knob(state, effects);
    state.app.channel = Channel::Confess;
    state.app.input_locked = true;
    state.app.overlay = Overlay::Clip(ClipId::Party);
    effects.send_audio(AudioCommand::DuckGame(true));
    effects.send_audio(AudioCommand::AmbientEnable(false));
    effects.send_video(VideoCommand::Play {
        clip: ClipId::Party,
        loops: state.settings.confess_loops,
    });
}

pub(super) fn go_to_menu(state: &mut CoreState, effects: &mut CoreEffects) {
    transition(state, effects);
    state.app.channel = Channel::Menu;
    state.session = None;
    effects.send_audio(AudioCommand::DuckGame(false));
    // Ambient scares resume only if the room is already silent.
    effects.send_audio(AudioCommand::AmbientEnable(!state.app.music_enabled));
}
