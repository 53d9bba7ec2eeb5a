//! YouTube Summarizer - A Rust CLI tool for transcript extraction and summarization
//!
//! This library fetches transcripts for YouTube videos and optionally summarizes
//! them through an OpenAI-compatible chat-completion API. It also provides a batch
//! mode that processes many videos concurrently with per-item failure isolation.

pub mod batch;
pub mod cli;
pub mod config;
pub mod output;
pub mod summarize;
pub mod transcript;
pub mod utils;
pub mod video;

pub use batch::{BatchItem, BatchProcessor, BatchReport};
pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use summarize::{Summarizer, SummaryStyle};
pub use transcript::{Transcript, TranscriptClient, TranscriptSegment};
pub use video::VideoId;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to the summarizer
#[derive(thiserror::Error, Debug)]
pub enum SummarizerError {
    #[error("Could not extract a video ID from: {0}")]
    InvalidVideoId(String),

    #[error("No usable transcript for video {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    #[error("OpenAI API key is required. Set OPENAI_API_KEY or add it to the config file")]
    MissingApiKey,

    #[error("Summarization failed: {0}")]
    SummarizationFailed(String),
}
