use tokio::sync::mpsc;

use super::{SpeechClient, VoiceProfile};

#[derive(Debug)]
pub enum SpeechCommand {
    Synthesize {
        req_id: u64,
        text: String,
        voice: VoiceProfile,
    },
}

#[derive(Debug)]
pub enum SpeechEvent {
    Audio { req_id: u64, data: Vec<u8> },
    Error { req_id: u64, message: String },
}

/// Speech actor: owns the client, serializes synthesis requests. Stale
/// results are filtered by req_id on the caller side, not here.
pub fn spawn_speech_actor(
    client: SpeechClient,
) -> (mpsc::Sender<SpeechCommand>, mpsc::Receiver<SpeechEvent>) {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<SpeechCommand>(16);
    let (tx_evt, rx_evt) = mpsc::channel::<SpeechEvent>(16);

    tokio::spawn(async move {
        while let Some(cmd) = rx_cmd.recv().await {
            match cmd {
                SpeechCommand::Synthesize { req_id, text, voice } => {
                    match client.synthesize(&text, voice).await {
                        Ok(data) => {
                            tracing::debug!(req_id, bytes = data.len(), "speech synthesized");
                            let _ = tx_evt.send(SpeechEvent::Audio { req_id, data }).await;
                        }
                        Err(e) => {
                            tracing::warn!(req_id, err = %e, "speech synthesis failed");
                            let _ = tx_evt
                                .send(SpeechEvent::Error {
                                    req_id,
                                    message: e.to_string(),
                                })
                                .await;
                        }
                    }
                }
            }
        }
    });

    (tx_cmd, rx_evt)
}
