//! The picture side of the set. Playback itself happens elsewhere (the
//! renderer draws the frames); this actor models only the contract the
//! rest of the app relies on: a clip runs for its length times the loop
//! count, then reports that it finished. Starting a new clip or stopping
//! cancels the previous completion silently.

use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::settings::VideoSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipId {
    /// The frozen birthday party, looping on the dead channel.
    Party,
    /// The whispering faces.
    Whispers,
    /// The candle ritual payoff.
    Ritual,
}

#[derive(Debug)]
pub enum VideoCommand {
    Play { clip: ClipId, loops: u32 },
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoEvent {
    Finished { clip: ClipId },
}

fn clip_duration(settings: &VideoSettings, clip: ClipId) -> Duration {
    let ms = match clip {
        ClipId::Party => settings.party_clip_ms,
        ClipId::Whispers => settings.whispers_clip_ms,
        ClipId::Ritual => settings.ritual_clip_ms,
    };
    Duration::from_millis(ms)
}

pub fn spawn_video_actor(
    settings: VideoSettings,
) -> (mpsc::Sender<VideoCommand>, mpsc::Receiver<VideoEvent>) {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<VideoCommand>(16);
    let (tx_evt, rx_evt) = mpsc::channel::<VideoEvent>(16);

    tokio::spawn(async move {
        let mut pending: Option<(ClipId, Instant)> = None;
        loop {
            select! {
                maybe_cmd = rx_cmd.recv() => {
                    let Some(cmd) = maybe_cmd else {
                        break;
                    };
                    match cmd {
                        VideoCommand::Play { clip, loops } => {
                            let total = clip_duration(&settings, clip) * loops.max(1);
                            tracing::debug!(?clip, loops, total_ms = total.as_millis() as u64, "clip started");
                            pending = Some((clip, Instant::now() + total));
                        }
                        VideoCommand::Stop => {
                            pending = None;
                        }
                    }
                }
                _ = sleep_until(pending.map(|(_, at)| at).unwrap_or_else(Instant::now)),
                    if pending.is_some() =>
                {
                    let (clip, _) = pending.take().expect("guarded by if");
                    tracing::debug!(?clip, "clip finished");
                    let _ = tx_evt.send(VideoEvent::Finished { clip }).await;
                }
            }
        }
    });

    (tx_cmd, rx_evt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_settings() -> VideoSettings {
        VideoSettings {
            party_clip_ms: 10,
            whispers_clip_ms: 20,
            ritual_clip_ms: 10,
        }
    }

    #[tokio::test]
    async fn clip_finishes_after_duration_times_loops() {
        let (tx, mut rx) = spawn_video_actor(fast_settings());
        tx.send(VideoCommand::Play {
            clip: ClipId::Party,
            loops: 3,
        })
        .await
        .expect("send");
        let evt = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timely")
            .expect("event");
        assert_eq!(evt, VideoEvent::Finished { clip: ClipId::Party });
    }

    #[tokio::test]
    async fn stop_suppresses_completion() {
        let (tx, mut rx) = spawn_video_actor(fast_settings());
        tx.send(VideoCommand::Play {
            clip: ClipId::Whispers,
            loops: 1,
        })
        .await
        .expect("send");
        tx.send(VideoCommand::Stop).await.expect("send");
        let timed_out = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .is_err();
        assert!(timed_out, "stopped clip must not report completion");
    }

    #[tokio::test]
    async fn new_clip_replaces_pending_one() {
        let (tx, mut rx) = spawn_video_actor(fast_settings());
        tx.send(VideoCommand::Play {
            clip: ClipId::Whispers,
            loops: 5,
        })
        .await
        .expect("send");
        tx.send(VideoCommand::Play {
            clip: ClipId::Ritual,
            loops: 1,
        })
        .await
        .expect("send");
        let evt = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timely")
            .expect("event");
        assert_eq!(evt, VideoEvent::Finished { clip: ClipId::Ritual });
    }
}
