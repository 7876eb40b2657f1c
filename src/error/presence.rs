/// Conversational collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum PresenceError {
    #[error("presence request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("presence endpoint returned status {status}")]
    Status { status: u16 },

    #[error("presence reply had no usable text")]
    MalformedReply,

    #[error("no presence api key configured")]
    NotConfigured,
}
