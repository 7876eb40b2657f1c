use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

use super::{Role, Turn};
use crate::error::PresenceError;
use crate::settings::PresenceSettings;

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug)]
pub struct PresenceClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl PresenceClient {
    pub fn new(cfg: &PresenceSettings, timeout: Duration) -> Result<Self, PresenceError> {
        let http = reqwest::Client::builder()
            .user_agent("static-tv")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_owned(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
        })
    }

    /// Line surfaced in place of a reply when the presence cannot be reached.
    pub const SENTINEL: &'static str = "[SIGNAL LOST]";

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Like [`reply`](Self::reply), but failures collapse into the
    /// [`SENTINEL`](Self::SENTINEL) line instead of an error. The show must
    /// go on even when the other side hangs up.
    pub async fn reply_or_sentinel(&self, system_prompt: &str, history: &[Turn]) -> String {
        match self.reply(system_prompt, history).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(err = %e, "presence consult failed");
                Self::SENTINEL.to_owned()
            }
        }
    }

    /// Ask the presence for its next line given the conversation so far.
    pub async fn reply(
        &self,
        system_prompt: &str,
        history: &[Turn],
    ) -> Result<String, PresenceError> {
        let key = self.api_key.as_deref().ok_or(PresenceError::NotConfigured)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, key
        );

        let contents: Vec<Value> = history
            .iter()
            .map(|t| {
                let role = match t.role {
                    Role::Viewer => "user",
                    Role::Presence => "model",
                };
                json!({ "role": role, "parts": [{ "text": t.text }] })
            })
            .collect();
        let body = json!({
            "systemInstruction": { "parts": [{ "text": system_prompt }] },
            "contents": contents,
            "generationConfig": { "temperature": 1.0, "maxOutputTokens": 120 },
        });

        let resp = self.http.post(&url).json(&body).send().await?;
        if !resp.status().is_success() {
            return Err(PresenceError::Status {
                status: resp.status().as_u16(),
            });
        }

        let parsed: GenerateResponse = resp.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .ok_or(PresenceError::MalformedReply)?;
        Ok(text)
    }
}
