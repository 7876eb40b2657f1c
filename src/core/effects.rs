use tokio::sync::mpsc;

use crate::app::{App, AppEvent, AppSnapshot};
use crate::audio::AudioCommand;
use crate::presence::PresenceCommand;
use crate::speech::SpeechCommand;
use crate::video::VideoCommand;

/// Timers the reducer can ask for. Each fire carries the generation that
/// scheduled it; the reducer drops fires from a past generation, which is
/// how channel changes cancel everything still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// End of the raw-static phase after power-on.
    BootStatic,
    /// Reveal the next firmware line.
    BootLine,
    /// Hold on the finished banner before the menu.
    BootDone,
    /// End of the channel-knob pulse animation.
    KnobPulse,
    /// End of the static re-tune pulse between knob-selected channels.
    KnobWarmup,
}

#[derive(Debug, Clone, Copy)]
pub struct TimerFire {
    pub kind: TimerKind,
    pub generation: u64,
}

/// Deferred side effects collected while reducing one message.
#[derive(Default)]
pub struct CoreEffects {
    pub(super) actions: Vec<CoreEffect>,
}

#[derive(Debug)]
pub enum CoreEffect {
    EmitState(Box<AppSnapshot>),
    EmitToast(String),
    SendAudio {
        cmd: AudioCommand,
        warn: Option<&'static str>,
    },
    SendSpeech {
        cmd: SpeechCommand,
        warn: Option<&'static str>,
    },
    SendPresence {
        cmd: PresenceCommand,
        warn: Option<&'static str>,
    },
    SendVideo {
        cmd: VideoCommand,
        warn: Option<&'static str>,
    },
    ScheduleTimer {
        kind: TimerKind,
        generation: u64,
        delay_ms: u64,
    },
}

impl CoreEffects {
    pub fn emit_state(&mut self, app: &App) {
        self.actions
            .push(CoreEffect::EmitState(Box::new(AppSnapshot::from_app(app))));
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        self.actions.push(CoreEffect::EmitToast(message.into()));
    }

    pub fn send_audio(&mut self, cmd: AudioCommand) {
        self.actions.push(CoreEffect::SendAudio { cmd, warn: None });
    }

    pub fn send_audio_warn(&mut self, cmd: AudioCommand, warn: &'static str) {
        self.actions.push(CoreEffect::SendAudio {
            cmd,
            warn: Some(warn),
        });
    }

    pub fn send_speech(&mut self, cmd: SpeechCommand) {
        self.actions.push(CoreEffect::SendSpeech { cmd, warn: None });
    }

    pub fn send_presence(&mut self, cmd: PresenceCommand) {
        self.actions
            .push(CoreEffect::SendPresence { cmd, warn: None });
    }

    pub fn send_video(&mut self, cmd: VideoCommand) {
        self.actions.push(CoreEffect::SendVideo { cmd, warn: None });
    }

    pub fn schedule_timer(&mut self, kind: TimerKind, generation: u64, delay_ms: u64) {
        self.actions.push(CoreEffect::ScheduleTimer {
            kind,
            generation,
            delay_ms,
        });
    }

    #[cfg(test)]
    pub(super) fn drain(&mut self) -> Vec<CoreEffect> {
        std::mem::take(&mut self.actions)
    }
}

pub struct CoreDispatch<'a> {
    pub(super) tx_audio: &'a mpsc::Sender<AudioCommand>,
    pub(super) tx_speech: &'a mpsc::Sender<SpeechCommand>,
    pub(super) tx_presence: &'a mpsc::Sender<PresenceCommand>,
    pub(super) tx_video: &'a mpsc::Sender<VideoCommand>,
    pub(super) tx_evt: &'a mpsc::Sender<AppEvent>,
    pub(super) tx_timer: &'a mpsc::Sender<TimerFire>,
}

pub async fn run_effects(effects: CoreEffects, dispatch: &CoreDispatch<'_>) {
    for effect in effects.actions {
        match effect {
            CoreEffect::EmitState(snapshot) => {
                let _ = dispatch.tx_evt.send(AppEvent::State(snapshot)).await;
            }
            CoreEffect::EmitToast(msg) => {
                let _ = dispatch.tx_evt.send(AppEvent::Toast(msg)).await;
            }
            CoreEffect::SendAudio { cmd, warn } => {
                if let Err(e) = dispatch.tx_audio.send(cmd).await
                    && let Some(ctx) = warn
                {
                    tracing::warn!(err = %e, "{ctx}");
                }
            }
            CoreEffect::SendSpeech { cmd, warn } => {
                if let Err(e) = dispatch.tx_speech.send(cmd).await
                    && let Some(ctx) = warn
                {
                    tracing::warn!(err = %e, "{ctx}");
                }
            }
            CoreEffect::SendPresence { cmd, warn } => {
                if let Err(e) = dispatch.tx_presence.send(cmd).await
                    && let Some(ctx) = warn
                {
                    tracing::warn!(err = %e, "{ctx}");
                }
            }
            CoreEffect::SendVideo { cmd, warn } => {
                if let Err(e) = dispatch.tx_video.send(cmd).await
                    && let Some(ctx) = warn
                {
                    tracing::warn!(err = %e, "{ctx}");
                }
            }
            CoreEffect::ScheduleTimer {
                kind,
                generation,
                delay_ms,
            } => {
                let tx = dispatch.tx_timer.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                    let _ = tx.send(TimerFire { kind, generation }).await;
                });
            }
        }
    }
}
