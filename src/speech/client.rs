use serde_json::json;
use std::time::Duration;

use super::VoiceProfile;
use crate::error::SpeechError;
use crate::settings::SpeechSettings;

/// Client for the text-to-speech endpoint. Stateless apart from the
/// connection pool, so the actor can hold one for its whole life.
#[derive(Debug)]
pub struct SpeechClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model_id: String,
}

impl SpeechClient {
    pub fn new(cfg: &SpeechSettings, timeout: Duration) -> Result<Self, SpeechError> {
        let http = reqwest::Client::builder()
            .user_agent("static-tv")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_owned(),
            api_key: cfg.api_key.clone(),
            model_id: cfg.model_id.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Synthesize one line of narration and return the encoded audio bytes.
    pub async fn synthesize(
        &self,
        text: &str,
        voice: VoiceProfile,
    ) -> Result<Vec<u8>, SpeechError> {
        let key = self.api_key.as_deref().ok_or(SpeechError::NotConfigured)?;
        let url = format!(
            "{}/v1/text-to-speech/{}?output_format=mp3_44100_128",
            self.base_url,
            voice.voice_id()
        );
        let body = json!({
            "text": text,
            "model_id": self.model_id,
            "voice_settings": {
                "stability": 0.4,
                "similarity_boost": 0.75,
            },
        });

        let resp = self
            .http
            .post(&url)
            .header("xi-api-key", key)
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(SpeechError::Status {
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(base_url: String, key: Option<&str>) -> SpeechSettings {
        SpeechSettings {
            base_url,
            api_key: key.map(str::to_owned),
            model_id: "eleven_multilingual_v2".to_owned(),
        }
    }

    #[tokio::test]
    async fn synthesize_returns_audio_bytes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                mockito::Matcher::Regex(r"^/v1/text-to-speech/.*".to_owned()),
            )
            .match_header("xi-api-key", "test-key")
            .with_status(200)
            .with_body(b"fake-mp3-bytes")
            .create_async()
            .await;

        let client = SpeechClient::new(
            &cfg(server.url(), Some("test-key")),
            Duration::from_secs(5),
        )
        .expect("client");
        let bytes = client
            .synthesize("truth or dare?", VoiceProfile::Host)
            .await
            .expect("synthesize");
        assert_eq!(bytes, b"fake-mp3-bytes");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn bad_status_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                mockito::Matcher::Regex(r"^/v1/text-to-speech/.*".to_owned()),
            )
            .with_status(401)
            .create_async()
            .await;

        let client = SpeechClient::new(
            &cfg(server.url(), Some("bad-key")),
            Duration::from_secs(5),
        )
        .expect("client");
        let err = client
            .synthesize("hello", VoiceProfile::Witch)
            .await
            .expect_err("401 should fail");
        assert!(matches!(err, SpeechError::Status { status: 401 }));
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = SpeechClient::new(
            &cfg("http://127.0.0.1:1".to_owned(), None),
            Duration::from_secs(5),
        )
        .expect("client");
        assert!(!client.is_configured());
        let err = client
            .synthesize("hello", VoiceProfile::Child)
            .await
            .expect_err("no key");
        assert!(matches!(err, SpeechError::NotConfigured));
    }
}
