use tokio::sync::mpsc;

use super::{PresenceClient, Turn};

#[derive(Debug)]
pub enum PresenceCommand {
    Reply {
        req_id: u64,
        system_prompt: String,
        history: Vec<Turn>,
    },
}

/// The actor never fails outward: a consult that cannot complete comes back
/// as the client's sentinel line.
#[derive(Debug)]
pub enum PresenceEvent {
    Reply { req_id: u64, text: String },
}

pub fn spawn_presence_actor(
    client: PresenceClient,
) -> (mpsc::Sender<PresenceCommand>, mpsc::Receiver<PresenceEvent>) {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<PresenceCommand>(16);
    let (tx_evt, rx_evt) = mpsc::channel::<PresenceEvent>(16);

    tokio::spawn(async move {
        while let Some(cmd) = rx_cmd.recv().await {
            match cmd {
                PresenceCommand::Reply {
                    req_id,
                    system_prompt,
                    history,
                } => {
                    let text = client.reply_or_sentinel(&system_prompt, &history).await;
                    tracing::debug!(req_id, "presence replied");
                    let _ = tx_evt.send(PresenceEvent::Reply { req_id, text }).await;
                }
            }
        }
    });

    (tx_cmd, rx_evt)
}
