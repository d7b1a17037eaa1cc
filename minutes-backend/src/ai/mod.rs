//! Meeting summarization
//!
//! Turns raw meeting notes into a short markdown summary and an action-item
//! table. The backend talks to an OpenAI-compatible chat completions API
//! (Groq by default); when no key is configured a disabled summarizer fills
//! in a placeholder so meetings can still be saved.

pub mod groq;
pub mod prompt;

use async_trait::async_trait;
use minutes_types::NO_ACTION_ITEMS;
use std::sync::Arc;

use crate::config::SummarizerConfig;
pub use groq::GroqSummarizer;

/// Summary and action items produced for one meeting
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingSummary {
    pub summary: String,
    /// Markdown table, or the "no action items" sentinel
    pub action_items: String,
}

impl MeetingSummary {
    /// A summary text with no action items
    pub fn without_action_items(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            action_items: NO_ACTION_ITEMS.to_string(),
        }
    }
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Short name for logs and the health endpoint
    fn name(&self) -> &'static str;

    async fn summarize(&self, content: &str) -> Result<MeetingSummary, String>;
}

/// Used when no API key is configured
pub struct DisabledSummarizer;

#[async_trait]
impl Summarizer for DisabledSummarizer {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn summarize(&self, _content: &str) -> Result<MeetingSummary, String> {
        Ok(MeetingSummary::without_action_items(
            "AI summary is disabled (GROQ_API_KEY is not set).",
        ))
    }
}

/// Pick the summarizer for this configuration
pub fn build_summarizer(config: &SummarizerConfig) -> Arc<dyn Summarizer> {
    match &config.api_key {
        Some(key) => {
            log::info!("[AI] Groq API key loaded (model: {})", config.model);
            Arc::new(GroqSummarizer::new(key.clone(), config.clone()))
        }
        None => {
            log::warn!("[AI] GROQ_API_KEY is not set, AI summaries are disabled");
            Arc::new(DisabledSummarizer)
        }
    }
}

/// Summarize, turning a failure into a stored explanation instead of an error.
/// Saving a meeting never fails because the model did.
pub async fn summarize_or_fallback(summarizer: &dyn Summarizer, content: &str) -> MeetingSummary {
    match summarizer.summarize(content).await {
        Ok(summary) => {
            log::info!("[AI] Summary generated (length: {})", summary.summary.len());
            summary
        }
        Err(e) => {
            log::error!("[AI] Summary failed: {}", e);
            MeetingSummary::without_action_items(format!("AI summary failed: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn summarize(&self, _content: &str) -> Result<MeetingSummary, String> {
            Err("HTTP 503: upstream unavailable".to_string())
        }
    }

    #[tokio::test]
    async fn test_fallback_on_failure() {
        let result = summarize_or_fallback(&FailingSummarizer, "anything at all").await;
        assert_eq!(result.summary, "AI summary failed: HTTP 503: upstream unavailable");
        assert_eq!(result.action_items, NO_ACTION_ITEMS);
    }

    #[tokio::test]
    async fn test_disabled_summarizer_still_produces_summary() {
        let result = summarize_or_fallback(&DisabledSummarizer, "notes").await;
        assert!(result.summary.contains("disabled"));
        assert_eq!(result.action_items, NO_ACTION_ITEMS);
    }

    #[test]
    fn test_build_without_key_is_disabled() {
        let summarizer = build_summarizer(&SummarizerConfig::default());
        assert_eq!(summarizer.name(), "disabled");

        let config = SummarizerConfig {
            api_key: Some("gsk_test".to_string()),
            ..SummarizerConfig::default()
        };
        assert_eq!(build_summarizer(&config).name(), "groq");
    }
}
