pub mod cli;
mod event_loop;
mod guard;
mod keyboard;
mod views;

pub use cli::{Cli, Command};

use std::io;
use tokio::sync::mpsc;

use crate::app::{AppCommand, AppEvent};

/// Run the terminal front panel until the user quits.
pub async fn run_tui(
    tx: mpsc::Sender<AppCommand>,
    rx: mpsc::Receiver<AppEvent>,
) -> io::Result<()> {
    event_loop::run_tui_internal(tx, rx).await
}
