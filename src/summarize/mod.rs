use anyhow::Context;
use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{Result, SummarizerError};

pub mod styles;

pub use styles::style_prompt;

/// Named summary presets controlling prompt phrasing and output shape.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SummaryStyle {
    /// 2-3 sentence summary of the main topic
    Brief,
    /// Comprehensive summary organized in paragraphs
    Detailed,
    /// Bullet-point summary
    BulletPoints,
    /// Key insights, facts, and actionable advice
    KeyInsights,
    /// Formal summary with abstract, arguments, and conclusions
    Academic,
    /// Conversational summary
    Casual,
}

impl std::fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryStyle::Brief => write!(f, "brief"),
            SummaryStyle::Detailed => write!(f, "detailed"),
            SummaryStyle::BulletPoints => write!(f, "bullet_points"),
            SummaryStyle::KeyInsights => write!(f, "key_insights"),
            SummaryStyle::Academic => write!(f, "academic"),
            SummaryStyle::Casual => write!(f, "casual"),
        }
    }
}

/// Chat message for the completion API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completion backend, abstracted so tests and the batch orchestrator
/// can run without a network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send a chat completion request and return the assistant's text.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat-completion client.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base);

        tracing::debug!("Sending chat completion request to {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&ChatCompletionRequest {
                model: &self.model,
                messages,
                temperature,
                max_tokens,
            })
            .send()
            .await
            .context("Chat completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::SummarizationFailed(format!(
                "API returned HTTP {}: {}",
                status, body
            ))
            .into());
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                SummarizerError::SummarizationFailed("API response had no content".to_string())
                    .into()
            })
    }
}

/// Summary paired with the key questions the video answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryWithQuestions {
    pub summary: String,
    pub questions: String,
}

/// Summarization seam used by the batch orchestrator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(
        &self,
        transcript: &str,
        style: SummaryStyle,
        max_length: Option<usize>,
        custom_prompt: Option<String>,
    ) -> Result<String>;
}

/// Builds prompts from style templates and runs them through a chat model.
pub struct Summarizer {
    model: Box<dyn ChatModel>,
}

impl Summarizer {
    /// Create a summarizer backed by an OpenAI-compatible endpoint.
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        Self {
            model: Box::new(OpenAiClient::new(api_key, api_base, model)),
        }
    }

    /// Create a summarizer over an arbitrary chat model (used in tests).
    pub fn with_model(model: Box<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Generate a summary with optional questions parsed from the response.
    pub async fn summarize_with_questions(&self, transcript: &str) -> Result<SummaryWithQuestions> {
        let system_prompt = "Analyze this video transcript and provide:\n\
            1. A comprehensive summary of the main content\n\
            2. A list of key questions that this video answers\n\n\
            Format your response as:\n\
            SUMMARY:\n\
            [Your summary here]\n\n\
            KEY QUESTIONS ANSWERED:\n\
            - [Question 1]\n\
            - [Question 2]\n\
            - [etc.]";

        let messages = [
            ChatMessage::system(system_prompt),
            ChatMessage::user(format!("Transcript:\n\n{}", transcript)),
        ];

        let content = self.model.complete(&messages, 0.3, 2000).await?;
        Ok(parse_summary_with_questions(&content))
    }

    /// Extract the most important topics discussed in the transcript.
    pub async fn extract_key_topics(
        &self,
        transcript: &str,
        num_topics: usize,
    ) -> Result<Vec<String>> {
        let system_prompt = format!(
            "Extract the {} most important topics discussed in this video transcript. \
             Return only the topics, one per line, without numbers or bullets. \
             Focus on the main themes and subjects covered.",
            num_topics
        );

        let messages = [
            ChatMessage::system(system_prompt),
            ChatMessage::user(format!("Transcript:\n\n{}", transcript)),
        ];

        let content = self.model.complete(&messages, 0.2, 500).await?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(num_topics)
            .map(str::to_string)
            .collect())
    }
}

#[async_trait]
impl Summarize for Summarizer {
    async fn summarize(
        &self,
        transcript: &str,
        style: SummaryStyle,
        max_length: Option<usize>,
        custom_prompt: Option<String>,
    ) -> Result<String> {
        let mut system_prompt =
            custom_prompt.unwrap_or_else(|| style_prompt(style).to_string());

        if let Some(words) = max_length {
            system_prompt.push_str(&format!("\n\nKeep the summary under {} words.", words));
        }

        let messages = [
            ChatMessage::system(system_prompt),
            ChatMessage::user(format!(
                "Please summarize this video transcript:\n\n{}",
                transcript
            )),
        ];

        self.model.complete(&messages, 0.3, 2000).await
    }
}

/// Split a combined response into summary and questions sections.
fn parse_summary_with_questions(content: &str) -> SummaryWithQuestions {
    const MARKER: &str = "KEY QUESTIONS ANSWERED:";

    match content.split_once(MARKER) {
        Some((summary_part, questions_part)) => SummaryWithQuestions {
            summary: summary_part.replace("SUMMARY:", "").trim().to_string(),
            questions: questions_part.trim().to_string(),
        },
        None => SummaryWithQuestions {
            summary: content.trim().to_string(),
            questions: "Could not extract specific questions.".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::always;

    #[test]
    fn test_parse_summary_with_questions() {
        let content = "SUMMARY:\nA video about birds.\n\nKEY QUESTIONS ANSWERED:\n- What is a bird?";
        let parsed = parse_summary_with_questions(content);
        assert_eq!(parsed.summary, "A video about birds.");
        assert_eq!(parsed.questions, "- What is a bird?");
    }

    #[test]
    fn test_parse_summary_without_marker_falls_back() {
        let parsed = parse_summary_with_questions("just a summary");
        assert_eq!(parsed.summary, "just a summary");
        assert_eq!(parsed.questions, "Could not extract specific questions.");
    }

    #[tokio::test]
    async fn test_summarize_appends_length_constraint() {
        let mut model = MockChatModel::new();
        model
            .expect_complete()
            .withf(|messages, temperature, max_tokens| {
                messages[0].content.contains("Keep the summary under 100 words")
                    && *temperature == 0.3
                    && *max_tokens == 2000
            })
            .returning(|_, _, _| Ok("short summary".to_string()));

        let summarizer = Summarizer::with_model(Box::new(model));
        let summary = summarizer
            .summarize("some transcript", SummaryStyle::Brief, Some(100), None)
            .await
            .unwrap();
        assert_eq!(summary, "short summary");
    }

    #[tokio::test]
    async fn test_summarize_custom_prompt_overrides_style() {
        let mut model = MockChatModel::new();
        model
            .expect_complete()
            .withf(|messages, _, _| messages[0].content == "do something else")
            .returning(|_, _, _| Ok("done".to_string()));

        let summarizer = Summarizer::with_model(Box::new(model));
        let summary = summarizer
            .summarize(
                "transcript",
                SummaryStyle::Detailed,
                None,
                Some("do something else".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(summary, "done");
    }

    #[tokio::test]
    async fn test_summarize_with_questions_splits_sections() {
        let mut model = MockChatModel::new();
        model
            .expect_complete()
            .withf(|messages, temperature, _| {
                messages[0].content.contains("KEY QUESTIONS ANSWERED") && *temperature == 0.3
            })
            .returning(|_, _, _| {
                Ok("SUMMARY:\nPython basics.\n\nKEY QUESTIONS ANSWERED:\n- What is Python?"
                    .to_string())
            });

        let summarizer = Summarizer::with_model(Box::new(model));
        let result = summarizer
            .summarize_with_questions("transcript")
            .await
            .unwrap();
        assert_eq!(result.summary, "Python basics.");
        assert!(result.questions.contains("What is Python?"));
    }

    #[tokio::test]
    async fn test_extract_key_topics_truncates() {
        let mut model = MockChatModel::new();
        model
            .expect_complete()
            .with(always(), always(), always())
            .returning(|_, _, _| Ok("rust\n\nasync\nconcurrency\nextra".to_string()));

        let summarizer = Summarizer::with_model(Box::new(model));
        let topics = summarizer.extract_key_topics("transcript", 3).await.unwrap();
        assert_eq!(topics, vec!["rust", "async", "concurrency"]);
    }
}
