//! End-to-end checks against the core actor with the null audio backend:
//! power the set on, walk into the game, and make sure the conversation
//! actually moves.

use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;

use static_tv::app::{AppCommand, AppEvent, AppSnapshot, Channel, Speaker};
use static_tv::audio::{AudioBackend, TrackId};
use static_tv::core::spawn_app_actor;
use static_tv::settings::AppSettings;

/// Defaults with the channel timings shrunk so boot takes milliseconds.
fn fast_settings() -> AppSettings {
    AppSettings {
        static_boot_ms: 5,
        boot_line_ms: 2,
        boot_hold_ms: 5,
        channel_pulse_ms: 2,
        ..AppSettings::default()
    }
}

async fn wait_for(
    rx: &mut mpsc::Receiver<AppEvent>,
    what: &str,
    mut pred: impl FnMut(&AppSnapshot) -> bool,
) -> AppSnapshot {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let evt = tokio::time::timeout_at(deadline, rx.recv())
            .await
            .unwrap_or_else(|_| panic!("timed out waiting for {what}"))
            .expect("core actor hung up");
        if let AppEvent::State(snap) = evt
            && pred(&snap)
        {
            return *snap;
        }
    }
}

#[tokio::test]
async fn power_on_boots_into_the_menu() {
    let dir = TempDir::new().expect("tempdir");
    let (tx, mut rx) =
        spawn_app_actor(dir.path(), fast_settings(), AudioBackend::Null).expect("spawn");

    wait_for(&mut rx, "initial off snapshot", |s| s.channel == Channel::Off).await;

    tx.send(AppCommand::PowerToggle).await.expect("send");
    wait_for(&mut rx, "static", |s| s.channel == Channel::StaticBoot).await;
    wait_for(&mut rx, "boot banner", |s| s.channel == Channel::SystemBoot).await;
    let menu = wait_for(&mut rx, "menu", |s| s.channel == Channel::Menu).await;
    assert!(menu.music_enabled);

    // The null backend still walks the playlist, so the rack shows a track.
    let snap = wait_for(&mut rx, "now playing", |s| s.now_playing.is_some()).await;
    assert_eq!(snap.now_playing, Some(TrackId::Intro));

    tx.send(AppCommand::Quit).await.expect("send");
}

#[tokio::test]
async fn a_truth_round_puts_a_prompt_on_the_transcript() {
    let dir = TempDir::new().expect("tempdir");
    let (tx, mut rx) =
        spawn_app_actor(dir.path(), fast_settings(), AudioBackend::Null).expect("spawn");

    tx.send(AppCommand::PowerToggle).await.expect("send");
    wait_for(&mut rx, "menu", |s| s.channel == Channel::Menu).await;

    // First entry is the game.
    tx.send(AppCommand::MenuSelect).await.expect("send");
    let game = wait_for(&mut rx, "game channel", |s| s.channel == Channel::Game).await;
    assert_eq!(
        game.transcript.last().map(|l| l.text.as_str()),
        Some("truth or dare?")
    );

    for c in "truth".chars() {
        tx.send(AppCommand::InputChar(c)).await.expect("send");
    }
    tx.send(AppCommand::InputSubmit).await.expect("send");

    let snap = wait_for(&mut rx, "truth prompt", |s| {
        s.transcript
            .last()
            .is_some_and(|l| l.speaker == Speaker::Tv && l.text != "truth or dare?")
    })
    .await;
    assert!(snap.transcript.iter().any(|l| l.speaker == Speaker::Viewer));
    assert!(snap.input.is_empty());

    tx.send(AppCommand::Quit).await.expect("send");
}

#[tokio::test]
async fn backing_out_of_the_game_returns_to_the_menu() {
    let dir = TempDir::new().expect("tempdir");
    let (tx, mut rx) =
        spawn_app_actor(dir.path(), fast_settings(), AudioBackend::Null).expect("spawn");

    tx.send(AppCommand::PowerToggle).await.expect("send");
    wait_for(&mut rx, "menu", |s| s.channel == Channel::Menu).await;
    tx.send(AppCommand::MenuSelect).await.expect("send");
    wait_for(&mut rx, "game channel", |s| s.channel == Channel::Game).await;

    tx.send(AppCommand::Back).await.expect("send");
    wait_for(&mut rx, "menu again", |s| s.channel == Channel::Menu).await;

    tx.send(AppCommand::PowerToggle).await.expect("send");
    wait_for(&mut rx, "off", |s| s.channel == Channel::Off).await;

    tx.send(AppCommand::Quit).await.expect("send");
}
