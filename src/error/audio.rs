/// Audio worker errors. None of these are fatal: the engine logs them,
/// emits an event, and treats the affected playback as already finished so
/// cue sequencing never stalls.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("failed to open audio output: {0}")]
    OutputInit(String),

    #[error("missing audio asset: {path}")]
    MissingAsset { path: String },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
