use tokio::sync::mpsc;

use super::AudioSettings;
use super::messages::{AudioCommand, AudioEvent};
use super::sequencer::TrackSequencer;

/// Headless engine for tests and machines without an audio device. It keeps
/// the sequencer honest and echoes completion events immediately so callers
/// waiting on `SpeechEnded`/`CueEnded` never hang.
struct NullEngine {
    tx_evt: mpsc::Sender<AudioEvent>,
    rx_cmd: mpsc::Receiver<AudioCommand>,
    sequencer: TrackSequencer,
    music_on: bool,
    started: bool,
    _settings: AudioSettings,
}

impl NullEngine {
    fn new(
        tx_evt: mpsc::Sender<AudioEvent>,
        rx_cmd: mpsc::Receiver<AudioCommand>,
        settings: AudioSettings,
    ) -> Self {
        Self {
            tx_evt,
            rx_cmd,
            sequencer: TrackSequencer::new(),
            music_on: false,
            started: false,
            _settings: settings,
        }
    }

    async fn run(mut self) {
        while let Some(cmd) = self.rx_cmd.recv().await {
            self.handle_command(cmd).await;
        }
    }

    async fn handle_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::MusicToggle(on) => {
                if self.music_on == on {
                    return;
                }
                self.music_on = on;
                if on {
                    // Resume keeps the position; only a first start resets.
                    let track = if self.started {
                        self.sequencer.current()
                    } else {
                        self.started = true;
                        self.sequencer.reset()
                    };
                    let _ = self.tx_evt.send(AudioEvent::TrackStarted { track }).await;
                }
            }
            AudioCommand::MusicSkip => {
                if self.music_on {
                    let track = self.sequencer.skip();
                    let _ = self.tx_evt.send(AudioEvent::TrackStarted { track }).await;
                }
            }
            AudioCommand::PlaySpeech { token, .. } => {
                let _ = self.tx_evt.send(AudioEvent::SpeechEnded { token }).await;
            }
            AudioCommand::PlayCue { cue } => {
                let _ = self.tx_evt.send(AudioEvent::CueEnded { cue }).await;
            }
            AudioCommand::SetMasterVolume(_)
            | AudioCommand::DuckGame(_)
            | AudioCommand::StopSpeech
            | AudioCommand::StopGameAudio
            | AudioCommand::AmbientEnable(_)
            | AudioCommand::PlayFoley(_) => {}
        }
    }
}

pub(super) fn spawn(
    rx_cmd: mpsc::Receiver<AudioCommand>,
    tx_evt: mpsc::Sender<AudioEvent>,
    settings: AudioSettings,
) {
    tokio::spawn(async move {
        let engine = NullEngine::new(tx_evt, rx_cmd, settings);
        engine.run().await;
    });
}
