use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use yt_transcript_rs::api::YouTubeTranscriptApi;

use crate::video::VideoId;
use crate::{Result, SummarizerError};

pub mod clean;

pub use clean::clean_transcript;

/// One caption line with its timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Segment text
    pub text: String,

    /// Start offset in seconds
    pub start: f64,

    /// Duration in seconds
    pub duration: f64,
}

impl TranscriptSegment {
    /// End offset in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// A fetched transcript with its segments and language metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: VideoId,
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Full transcript text, one segment per line.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Total duration in seconds, taken from the last segment.
    pub fn duration(&self) -> f64 {
        self.segments.last().map(|s| s.end()).unwrap_or(0.0)
    }
}

/// Metadata about one available transcript track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptInfo {
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
    pub is_translatable: bool,
}

/// Source of transcripts, abstracted for testing and batch orchestration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch a transcript, preferring the given language codes.
    async fn fetch(&self, video_id: &VideoId, languages: &[String]) -> Result<Transcript>;

    /// List the transcript tracks available for a video.
    async fn list_available(&self, video_id: &VideoId) -> Result<Vec<TranscriptInfo>>;
}

/// Transcript client backed by YouTube's caption endpoints.
pub struct TranscriptClient {
    api: YouTubeTranscriptApi,
}

impl TranscriptClient {
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .context("Failed to create YouTube transcript client")?;
        Ok(Self { api })
    }

    async fn fetch_language(&self, video_id: &VideoId, codes: &[&str]) -> Result<Transcript> {
        let fetched = self
            .api
            .fetch_transcript(video_id.as_str(), codes, false)
            .await
            .with_context(|| format!("Failed to fetch transcript for {}", video_id))?;

        let segments = fetched
            .snippets
            .iter()
            .map(|snippet| TranscriptSegment {
                text: snippet.text.clone(),
                start: snippet.start,
                duration: snippet.duration,
            })
            .collect();

        Ok(Transcript {
            video_id: video_id.clone(),
            language: fetched.language.clone(),
            language_code: fetched.language_code.clone(),
            is_generated: fetched.is_generated,
            segments,
        })
    }
}

#[async_trait]
impl TranscriptSource for TranscriptClient {
    async fn fetch(&self, video_id: &VideoId, languages: &[String]) -> Result<Transcript> {
        let codes: Vec<&str> = languages.iter().map(String::as_str).collect();

        match self.fetch_language(video_id, &codes).await {
            Ok(transcript) => Ok(transcript),
            Err(err) => {
                tracing::warn!(
                    "Preferred languages {:?} failed for {} ({}), trying any available track",
                    languages,
                    video_id,
                    err
                );

                // Fall back to whatever track fetches successfully
                let available = self.list_available(video_id).await?;
                for info in &available {
                    match self
                        .fetch_language(video_id, &[info.language_code.as_str()])
                        .await
                    {
                        Ok(transcript) => {
                            tracing::info!(
                                "Fell back to {} ({}) for {}",
                                info.language,
                                info.language_code,
                                video_id
                            );
                            return Ok(transcript);
                        }
                        Err(fallback_err) => {
                            tracing::warn!(
                                "Transcript in {} failed for {}: {}",
                                info.language_code,
                                video_id,
                                fallback_err
                            );
                        }
                    }
                }

                Err(SummarizerError::TranscriptUnavailable {
                    video_id: video_id.to_string(),
                    reason: err.to_string(),
                }
                .into())
            }
        }
    }

    async fn list_available(&self, video_id: &VideoId) -> Result<Vec<TranscriptInfo>> {
        let list = self
            .api
            .list_transcripts(video_id.as_str())
            .await
            .with_context(|| format!("Failed to list transcripts for {}", video_id))?;

        Ok(list
            .transcripts()
            .map(|t| TranscriptInfo {
                language: t.language.clone(),
                language_code: t.language_code.clone(),
                is_generated: t.is_generated,
                is_translatable: t.is_translatable(),
            })
            .collect())
    }
}
