use super::{AudioError, PresenceError, SpeechError};

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("speech error: {0}")]
    Speech(#[from] SpeechError),

    #[error("presence error: {0}")]
    Presence(#[from] PresenceError),

    #[error("data dir error: {0}")]
    DataDir(String),

    #[error("{0}")]
    Other(String),
}

/// Settings load/save/parse failures.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load settings: {source}")]
    Load {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save settings: {source}")]
    Save {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AppError::Io(io_err);
        assert!(err.to_string().contains("io error"));
    }

    #[test]
    fn error_chain_preserved() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AppError::Io(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn settings_parse_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err = SettingsError::Parse { source: parse_err };
        assert!(err.to_string().contains("failed to parse settings"));
    }
}
