//! Typed HTTP client for an OpenAI-compatible chat completions API (Groq).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::prompt::{build_prompt, parse_response};
use super::{MeetingSummary, Summarizer};
use crate::config::SummarizerConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// ── Chat completions API types ──────────────────────

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ── Client impl ─────────────────────────────────────

pub struct GroqSummarizer {
    api_key: String,
    config: SummarizerConfig,
    client: reqwest::Client,
}

impl GroqSummarizer {
    pub fn new(api_key: String, config: SummarizerConfig) -> Self {
        Self {
            api_key,
            config,
            client: reqwest::Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.api_url.trim_end_matches('/'))
    }

    /// Send one prompt and return the assistant's reply text
    async fn complete(&self, prompt: &str) -> Result<String, String> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let resp = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status, body));
        }

        let completion: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| format!("invalid response: {}", e))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| "empty response from model".to_string())
    }
}

#[async_trait]
impl Summarizer for GroqSummarizer {
    fn name(&self) -> &'static str {
        "groq"
    }

    async fn summarize(&self, content: &str) -> Result<MeetingSummary, String> {
        log::info!("[AI] Groq API call started ({})", self.config.model);

        let prompt = build_prompt(content, self.config.input_chars);
        let reply = self.complete(&prompt).await?;

        log::info!("[AI] Groq API response received (length: {})", reply.len());
        Ok(parse_response(&reply))
    }
}
