use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::app::{AppCommand, AppSnapshot, Channel};

/// Map a key press to a front-panel command. Returns true when the loop
/// should exit.
///
/// The truth-or-dare channel owns plain characters for its input line, so
/// the rack controls move to function keys there; everywhere else the
/// single-letter shortcuts work too.
pub(super) async fn handle_key(
    app: &AppSnapshot,
    key: KeyEvent,
    tx: &mpsc::Sender<AppCommand>,
) -> bool {
    // Some terminals report both press and release; act on press/repeat only.
    if matches!(key.kind, KeyEventKind::Release) {
        return false;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        let _ = tx.send(AppCommand::Quit).await;
        return true;
    }

    // Rack controls that never collide with typing.
    let rack = match key.code {
        KeyCode::F(2) => Some(AppCommand::ToggleMusic),
        KeyCode::F(3) => Some(AppCommand::SkipTrack),
        KeyCode::F(4) => Some(AppCommand::ToggleMute),
        KeyCode::F(5) => Some(AppCommand::SetVolume(app.volume - 0.1)),
        KeyCode::F(6) => Some(AppCommand::SetVolume(app.volume + 0.1)),
        KeyCode::F(7) => Some(AppCommand::ToggleLeftCandle),
        KeyCode::F(8) => Some(AppCommand::ToggleRightCandle),
        KeyCode::F(9) => Some(AppCommand::PowerToggle),
        KeyCode::Tab => Some(AppCommand::RotateKnob),
        _ => None,
    };
    if let Some(cmd) = rack {
        let _ = tx.send(cmd).await;
        return false;
    }

    match app.channel {
        Channel::Off => match key.code {
            KeyCode::Char('q') => {
                let _ = tx.send(AppCommand::Quit).await;
                return true;
            }
            KeyCode::Char('p') | KeyCode::Enter | KeyCode::Char(' ') => {
                let _ = tx.send(AppCommand::PowerToggle).await;
            }
            _ => {}
        },
        Channel::Game => match key.code {
            KeyCode::Esc => {
                let _ = tx.send(AppCommand::Back).await;
            }
            KeyCode::Enter => {
                let _ = tx.send(AppCommand::InputSubmit).await;
            }
            KeyCode::Backspace => {
                let _ = tx.send(AppCommand::InputBackspace).await;
            }
            KeyCode::Char(c) => {
                let _ = tx.send(AppCommand::InputChar(c)).await;
            }
            _ => {}
        },
        Channel::Whispers | Channel::Confess => match key.code {
            KeyCode::Esc => {
                let _ = tx.send(AppCommand::Back).await;
            }
            KeyCode::Enter => {
                let _ = tx.send(AppCommand::Confirm).await;
            }
            KeyCode::Char('q') => {
                let _ = tx.send(AppCommand::Quit).await;
                return true;
            }
            _ => {}
        },
        Channel::Menu => match key.code {
            KeyCode::Char('q') => {
                let _ = tx.send(AppCommand::Quit).await;
                return true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let _ = tx.send(AppCommand::MenuUp).await;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let _ = tx.send(AppCommand::MenuDown).await;
            }
            KeyCode::Enter => {
                let _ = tx.send(AppCommand::MenuSelect).await;
            }
            KeyCode::Char('p') => {
                let _ = tx.send(AppCommand::PowerToggle).await;
            }
            KeyCode::Char('m') => {
                let _ = tx.send(AppCommand::ToggleMusic).await;
            }
            KeyCode::Char('s') => {
                let _ = tx.send(AppCommand::SkipTrack).await;
            }
            KeyCode::Char('x') => {
                let _ = tx.send(AppCommand::ToggleMute).await;
            }
            KeyCode::Char('[') => {
                let _ = tx.send(AppCommand::SetVolume(app.volume - 0.1)).await;
            }
            KeyCode::Char(']') => {
                let _ = tx.send(AppCommand::SetVolume(app.volume + 0.1)).await;
            }
            KeyCode::Char('1') => {
                let _ = tx.send(AppCommand::ToggleLeftCandle).await;
            }
            KeyCode::Char('2') => {
                let _ = tx.send(AppCommand::ToggleRightCandle).await;
            }
            _ => {}
        },
        Channel::StaticBoot | Channel::SystemBoot => {
            if key.code == KeyCode::Char('q') {
                let _ = tx.send(AppCommand::Quit).await;
                return true;
            }
        }
    }

    false
}
