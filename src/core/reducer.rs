use std::path::Path;
use tokio::sync::mpsc;

use crate::app::{App, AppCommand, AppEvent, Channel};
use crate::audio::{AudioBackend, AudioCommand, AudioEvent, AudioSettings};
use crate::core::effects::{CoreDispatch, CoreEffects, TimerFire, run_effects};
use crate::core::infra::{RequestKey, RequestTracker};
use crate::error::AppError;
use crate::game::GameSession;
use crate::presence::{PresenceClient, PresenceEvent, spawn_presence_actor};
use crate::settings::AppSettings;
use crate::speech::{SpeechClient, SpeechEvent, spawn_speech_actor};
use crate::video::{VideoEvent, spawn_video_actor};

mod channel;
mod game;
mod music;
mod narration;

enum CoreMsg {
    Ui(AppCommand),
    Audio(AudioEvent),
    Speech(SpeechEvent),
    Presence(PresenceEvent),
    Video(VideoEvent),
    Timer(TimerFire),
}

/// What a line of narration was for, so its completion can be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpeechPurpose {
    /// An ordinary spoken line; nothing waits on it.
    Line,
    /// The whispers-channel intro; its end opens the prompt.
    WhispersIntro,
}

struct CoreState {
    app: App,
    settings: AppSettings,
    session: Option<GameSession>,
    req_id: u64,
    tracker: RequestTracker<RequestKey>,
    /// Bumped on every power or channel transition; timer fires from a
    /// previous generation are dropped.
    timer_gen: u64,
    speech_token: u64,
    pending_speech_purpose: Option<SpeechPurpose>,
    playing_speech: Option<(u64, SpeechPurpose)>,
    /// Ask "truth or dare?" again once the current cue finishes.
    pending_followup: bool,
    /// Channel the knob is re-tuning toward while the static pulse plays.
    pending_channel: Option<Channel>,
}

impl CoreState {
    fn new(settings: AppSettings) -> Self {
        let app = App {
            volume: settings.master_volume,
            music_enabled: true,
            ..App::default()
        };
        Self {
            app,
            settings,
            session: None,
            req_id: 0,
            tracker: RequestTracker::new(),
            timer_gen: 0,
            speech_token: 0,
            pending_speech_purpose: None,
            playing_speech: None,
            pending_followup: false,
            pending_channel: None,
        }
    }

    fn next_req_id(&mut self) -> u64 {
        self.req_id = self.req_id.wrapping_add(1).max(1);
        self.req_id
    }

    fn next_speech_token(&mut self) -> u64 {
        self.speech_token = self.speech_token.wrapping_add(1).max(1);
        self.speech_token
    }
}

fn reduce(msg: CoreMsg, state: &mut CoreState, effects: &mut CoreEffects) -> bool {
    let mut quit = false;
    match msg {
        CoreMsg::Ui(cmd) => match cmd {
            AppCommand::Quit => quit = true,
            AppCommand::PowerToggle
            | AppCommand::MenuUp
            | AppCommand::MenuDown
            | AppCommand::MenuSelect
            | AppCommand::RotateKnob
            | AppCommand::Back
            | AppCommand::Confirm => channel::handle_ui(&cmd, state, effects),
            AppCommand::InputChar(_)
            | AppCommand::InputBackspace
            | AppCommand::InputSubmit
            | AppCommand::ToggleLeftCandle
            | AppCommand::ToggleRightCandle => game::handle_ui(&cmd, state, effects),
            AppCommand::ToggleMusic
            | AppCommand::SkipTrack
            | AppCommand::SetVolume(_)
            | AppCommand::ToggleMute => music::handle_ui(&cmd, state, effects),
        },
        CoreMsg::Timer(fire) => channel::handle_timer(fire, state, effects),
        CoreMsg::Audio(evt) => match evt {
            AudioEvent::TrackStarted { track } => music::handle_track_started(track, state),
            AudioEvent::SpeechEnded { token } => narration::handle_speech_ended(token, state),
            AudioEvent::CueEnded { cue } => game::handle_cue_ended(cue, state, effects),
            AudioEvent::Error(msg) => {
                effects.toast(msg);
            }
        },
        CoreMsg::Speech(evt) => narration::handle_speech_event(evt, state, effects),
        CoreMsg::Presence(evt) => game::handle_presence_event(evt, state, effects),
        CoreMsg::Video(evt) => game::handle_video_event(evt, state, effects),
    }
    effects.emit_state(&state.app);
    quit
}

pub fn spawn_app_actor(
    data_dir: &Path,
    settings: AppSettings,
    audio_backend: AudioBackend,
) -> Result<(mpsc::Sender<AppCommand>, mpsc::Receiver<AppEvent>), AppError> {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<AppCommand>(64);
    let (tx_evt, rx_evt) = mpsc::channel::<AppEvent>(64);

    let http_timeout = std::time::Duration::from_secs(settings.http_timeout_secs);

    let audio_settings = AudioSettings::from_app(&settings, settings.assets_dir(data_dir));
    let (tx_audio, mut rx_audio) = crate::audio::spawn_audio_worker(audio_backend, audio_settings);

    let speech_client = SpeechClient::new(&settings.speech, http_timeout)?;
    if !speech_client.is_configured() {
        tracing::warn!("no speech api key configured, narration will be silent");
    }
    let (tx_speech, mut rx_speech) = spawn_speech_actor(speech_client);

    let presence_client = PresenceClient::new(&settings.presence, http_timeout)?;
    if !presence_client.is_configured() {
        tracing::warn!("no presence api key configured, the game will use canned lines");
    }
    let (tx_presence, mut rx_presence) = spawn_presence_actor(presence_client);

    let (tx_video, mut rx_video) = spawn_video_actor(settings.video.clone());

    let (tx_timer, mut rx_timer) = mpsc::channel::<TimerFire>(16);

    tokio::spawn(async move {
        let mut state = CoreState::new(settings);
        let dispatch = CoreDispatch {
            tx_audio: &tx_audio,
            tx_speech: &tx_speech,
            tx_presence: &tx_presence,
            tx_video: &tx_video,
            tx_evt: &tx_evt,
            tx_timer: &tx_timer,
        };

        let _ = tx_audio
            .send(AudioCommand::SetMasterVolume(state.app.volume))
            .await;
        {
            let mut effects = CoreEffects::default();
            effects.emit_state(&state.app);
            run_effects(effects, &dispatch).await;
        }

        loop {
            let msg = tokio::select! {
                Some(cmd) = rx_cmd.recv() => CoreMsg::Ui(cmd),
                Some(evt) = rx_audio.recv() => CoreMsg::Audio(evt),
                Some(evt) = rx_speech.recv() => CoreMsg::Speech(evt),
                Some(evt) = rx_presence.recv() => CoreMsg::Presence(evt),
                Some(evt) = rx_video.recv() => CoreMsg::Video(evt),
                Some(fire) = rx_timer.recv() => CoreMsg::Timer(fire),
                else => break,
            };

            let mut effects = CoreEffects::default();
            let should_quit = reduce(msg, &mut state, &mut effects);
            run_effects(effects, &dispatch).await;
            if should_quit {
                tracing::info!("core actor shutting down");
                break;
            }
        }
    });

    Ok((tx_cmd, rx_evt))
}
