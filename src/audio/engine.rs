use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::select;
use tokio::sync::mpsc;

use super::AudioSettings;
use super::ambient::AmbientScheduler;
use super::duck::Ducker;
use super::fade::Crossfade;
use super::foley;
use super::messages::{AudioCommand, AudioEvent, CueId, TrackId};
use super::mixer::VolumeModel;
use super::sequencer::TrackSequencer;
use crate::error::AudioError;

/// Interval of the housekeeping tick (sink-empty detection, ambient polls).
const HOUSEKEEPING_TICK_MS: u64 = 50;

struct AudioEngine {
    tx_evt: mpsc::Sender<AudioEvent>,
    rx_cmd: mpsc::Receiver<AudioCommand>,
    mixer: Mixer,
    #[allow(dead_code)]
    stream: OutputStream,
    assets_dir: PathBuf,
    model: VolumeModel,
    ducker: Ducker,
    sequencer: TrackSequencer,
    ambient: AmbientScheduler,
    ambient_enabled: bool,
    fade_tick_ms: u64,
    crossfade_ms: u64,
    music_on: bool,
    music: Option<Arc<Sink>>,
    fade: Option<Crossfade>,
    speech: Option<(u64, Arc<Sink>)>,
    cue: Option<(CueId, Arc<Sink>)>,
    ambient_sink: Option<Sink>,
}

impl AudioEngine {
    fn new(
        tx_evt: mpsc::Sender<AudioEvent>,
        rx_cmd: mpsc::Receiver<AudioCommand>,
        mixer: Mixer,
        stream: OutputStream,
        settings: AudioSettings,
    ) -> Self {
        let model = VolumeModel::new(
            settings.master_volume,
            settings.music_base_volume,
            settings.ducked_fraction,
        );
        let ducker = Ducker::new(&model, settings.duck_fade_steps);
        Self {
            tx_evt,
            rx_cmd,
            mixer,
            stream,
            assets_dir: settings.assets_dir,
            model,
            ducker,
            sequencer: TrackSequencer::new(),
            ambient: AmbientScheduler::new(settings.ambient),
            ambient_enabled: false,
            // Duck fades advance one step per tick, so `duck_fade_steps`
            // ticks cover the configured duck fade window.
            fade_tick_ms: (settings.duck_fade_ms / u64::from(settings.duck_fade_steps.max(1)))
                .max(5),
            crossfade_ms: settings.crossfade_ms,
            music_on: false,
            music: None,
            fade: None,
            speech: None,
            cue: None,
            ambient_sink: None,
        }
    }

    async fn run(mut self) {
        let mut fade_tick = tokio::time::interval(Duration::from_millis(self.fade_tick_ms));
        let mut housekeeping = tokio::time::interval(Duration::from_millis(HOUSEKEEPING_TICK_MS));

        loop {
            let fading = self.fade.is_some() || self.ducker.is_fading();
            select! {
                biased;
                _ = fade_tick.tick(), if fading => {
                    self.tick_fades();
                }
                _ = housekeeping.tick() => {
                    self.tick_housekeeping().await;
                }
                maybe_cmd = self.rx_cmd.recv() => {
                    let Some(cmd) = maybe_cmd else {
                        break;
                    };
                    self.handle_command(cmd).await;
                }
            }
        }
    }

    fn tick_fades(&mut self) {
        if let Some(gain) = self.ducker.tick()
            && self.fade.is_none()
            && let Some(sink) = self.music.as_ref()
        {
            sink.set_volume(gain);
        }
        if let Some(fade) = &mut self.fade
            && fade.apply(self.ducker.current_gain())
        {
            self.fade = None;
            if let Some(sink) = self.music.as_ref() {
                sink.set_volume(self.ducker.current_gain());
            }
        }
    }

    async fn tick_housekeeping(&mut self) {
        // Speech finished on its own.
        if let Some((token, sink)) = self.speech.as_ref()
            && sink.empty()
        {
            let token = *token;
            self.speech = None;
            self.ducker.set_narration_duck(false, &self.model);
            let _ = self.tx_evt.send(AudioEvent::SpeechEnded { token }).await;
        }

        // One-shot cue finished.
        if let Some((cue, sink)) = self.cue.as_ref()
            && sink.empty()
        {
            let cue = *cue;
            self.cue = None;
            let _ = self.tx_evt.send(AudioEvent::CueEnded { cue }).await;
        }

        // Music track ran out: walk the playlist. Loop tracks repeat inside
        // their own sink and never drain, so this only moves the intro and
        // interlude along. The incoming track fades in.
        if self.music_on
            && self.fade.is_none()
            && self.music.as_ref().is_some_and(|s| s.empty())
        {
            let next = self.sequencer.advance();
            self.start_track(next, true).await;
        }

        if self.ambient_sink.as_ref().is_some_and(|s| s.empty()) {
            self.ambient_sink = None;
        }
        if self.ambient_enabled
            && let Some(sound) = self
                .ambient
                .poll(Instant::now(), &mut rand::thread_rng())
        {
            tracing::debug!(?sound, "ambient scare");
            let sink = Sink::connect_new(&self.mixer);
            sink.set_volume(self.model.ambient_target());
            sink.append(foley::render_ambient(sound));
            self.ambient_sink = Some(sink);
        }
    }

    async fn handle_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::SetMasterVolume(v) => {
                self.model.set_master(v);
                self.ducker.retarget(&self.model);
                if !self.ducker.is_fading()
                    && self.fade.is_none()
                    && let Some(sink) = self.music.as_ref()
                {
                    sink.set_volume(self.ducker.current_gain());
                }
                if let Some((_, sink)) = self.speech.as_ref() {
                    sink.set_volume(self.model.speech_target());
                }
                if let Some((_, sink)) = self.cue.as_ref() {
                    sink.set_volume(self.model.cue_target());
                }
            }
            AudioCommand::MusicToggle(on) => self.set_music(on).await,
            AudioCommand::MusicSkip => {
                if self.music_on {
                    let next = self.sequencer.skip();
                    self.start_track(next, true).await;
                }
            }
            AudioCommand::DuckGame(on) => {
                self.ducker.set_game_duck(on, &self.model);
            }
            AudioCommand::PlaySpeech { token, data } => self.play_speech(token, data).await,
            AudioCommand::StopSpeech => self.stop_speech(),
            AudioCommand::PlayCue { cue } => self.play_cue(cue).await,
            AudioCommand::StopGameAudio => {
                self.stop_speech();
                if let Some((_, sink)) = self.cue.take() {
                    sink.stop();
                }
            }
            AudioCommand::AmbientEnable(on) => {
                self.ambient_enabled = on;
                self.rearm_ambient();
            }
            AudioCommand::PlayFoley(f) => {
                self.play_detached(foley::render(f), self.model.cue_target());
            }
        }
    }

    /// Ambient scares only run while the room is quiet: enabled and no music.
    /// Disarming also silences a scare that is mid-playback, with no fade.
    fn rearm_ambient(&mut self) {
        if self.ambient_enabled && !self.music_on {
            if !self.ambient.is_armed() {
                self.ambient.arm(Instant::now(), &mut rand::thread_rng());
            }
        } else {
            self.ambient.disarm();
            if let Some(sink) = self.ambient_sink.take() {
                sink.stop();
            }
        }
    }

    /// Music off pauses in place; on resumes the paused track, or starts
    /// the sequence from the top if nothing was ever playing.
    async fn set_music(&mut self, on: bool) {
        if self.music_on == on {
            return;
        }
        self.music_on = on;
        if on {
            match self.music.as_ref() {
                Some(sink) if !sink.empty() => sink.play(),
                _ => {
                    let first = self.sequencer.reset();
                    self.start_track(first, false).await;
                }
            }
        } else {
            if let Some(fade) = self.fade.take() {
                // A pause mid-crossfade settles on the incoming track.
                fade.settle();
                if let Some(sink) = self.music.as_ref() {
                    sink.set_volume(self.ducker.current_gain());
                }
            }
            if let Some(sink) = self.music.as_ref() {
                sink.pause();
            }
        }
        self.rearm_ambient();
    }

    async fn start_track(&mut self, track: TrackId, crossfade: bool) {
        let path = self.assets_dir.join(track.file_name());
        let sink = match self.build_file_sink(&path, track.loops()) {
            Ok(sink) => sink,
            Err(e) => {
                tracing::warn!(?track, err = %e, "track failed to start");
                let _ = self.tx_evt.send(AudioEvent::Error(e.to_string())).await;
                return;
            }
        };

        if let Some(fade) = self.fade.take() {
            fade.stop();
        }
        match self.music.take() {
            Some(old) if crossfade && self.crossfade_ms > 0 => {
                sink.set_volume(0.0);
                sink.play();
                self.music = Some(Arc::clone(&sink));
                old.set_volume(self.ducker.current_gain());
                let mut fade = Crossfade::new(old, sink, self.crossfade_ms);
                let _ = fade.apply(self.ducker.current_gain());
                self.fade = Some(fade);
            }
            old => {
                if let Some(old) = old {
                    old.stop();
                }
                sink.set_volume(self.ducker.current_gain());
                sink.play();
                self.music = Some(sink);
            }
        }

        tracing::debug!(?track, "track started");
        let _ = self.tx_evt.send(AudioEvent::TrackStarted { track }).await;
    }

    async fn play_speech(&mut self, token: u64, data: Vec<u8>) {
        self.stop_speech();

        let source = match Decoder::new(Cursor::new(data)) {
            Ok(s) => s,
            Err(source) => {
                // Undecodable narration is treated as already finished so
                // whatever is waiting on it can move on.
                let e = AudioError::Decode {
                    what: "speech",
                    source,
                };
                tracing::warn!(token, err = %e, "speech decode failed");
                let _ = self.tx_evt.send(AudioEvent::Error(e.to_string())).await;
                let _ = self.tx_evt.send(AudioEvent::SpeechEnded { token }).await;
                return;
            }
        };

        let sink = Arc::new(Sink::connect_new(&self.mixer));
        sink.set_volume(self.model.speech_target());
        sink.append(source);
        sink.play();
        self.speech = Some((token, sink));
        self.ducker.set_narration_duck(true, &self.model);
    }

    fn stop_speech(&mut self) {
        if let Some((_, sink)) = self.speech.take() {
            sink.stop();
        }
        self.ducker.set_narration_duck(false, &self.model);
    }

    async fn play_cue(&mut self, cue: CueId) {
        if let Some((_, old)) = self.cue.take() {
            old.stop();
        }
        let path = self.assets_dir.join(cue.file_name());
        match self.build_file_sink(&path, false) {
            Ok(sink) => {
                sink.set_volume(self.model.cue_target());
                sink.play();
                self.cue = Some((cue, sink));
            }
            Err(e) => {
                tracing::warn!(?cue, err = %e, "cue failed to start");
                let _ = self.tx_evt.send(AudioEvent::Error(e.to_string())).await;
                // Report it ended anyway so game sequencing never stalls on
                // a missing asset.
                let _ = self.tx_evt.send(AudioEvent::CueEnded { cue }).await;
            }
        }
    }

    fn build_file_sink(&self, path: &std::path::Path, looped: bool) -> Result<Arc<Sink>, AudioError> {
        if !path.exists() {
            return Err(AudioError::MissingAsset {
                path: path.display().to_string(),
            });
        }
        let file = File::open(path).map_err(|source| AudioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
            what: "track",
            source,
        })?;
        let sink = Sink::connect_new(&self.mixer);
        sink.pause();
        if looped {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }
        Ok(Arc::new(sink))
    }

    /// Fire-and-forget playback for foley; nothing holds these sinks.
    fn play_detached(&self, buffer: rodio::buffer::SamplesBuffer, volume: f32) {
        let sink = Sink::connect_new(&self.mixer);
        sink.set_volume(volume);
        sink.append(buffer);
        sink.detach();
    }
}

/// The rodio output stream is not `Send`, so the engine gets a dedicated
/// thread with its own current-thread runtime.
pub(super) fn spawn(
    rx_cmd: mpsc::Receiver<AudioCommand>,
    tx_evt: mpsc::Sender<AudioEvent>,
    settings: AudioSettings,
) {
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        let local = tokio::task::LocalSet::new();
        local.block_on(&rt, async move {
            let stream = match rodio::OutputStreamBuilder::open_default_stream() {
                Ok(v) => v,
                Err(e) => {
                    tracing::error!(err = %e, "failed to open audio output");
                    let _ = tx_evt
                        .send(AudioEvent::Error(
                            AudioError::OutputInit(e.to_string()).to_string(),
                        ))
                        .await;
                    return;
                }
            };
            let mixer = stream.mixer().clone();
            tracing::info!(assets_dir = %settings.assets_dir.display(), "audio engine started");

            let engine = AudioEngine::new(tx_evt, rx_cmd, mixer, stream, settings);
            engine.run().await;
        });
    });
}
