/// Text-to-speech collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("speech endpoint returned status {status}")]
    Status { status: u16 },

    #[error("no speech api key configured")]
    NotConfigured,
}
