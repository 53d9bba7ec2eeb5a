use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::summarize::SummaryStyle;

#[derive(Parser)]
#[command(
    name = "yt-summarizer",
    about = "YouTube Video Summarizer - Extract and summarize YouTube video transcripts",
    version,
    long_about = "A CLI tool for extracting transcripts from YouTube videos and generating \
summaries through an OpenAI-compatible chat-completion API. Supports single videos and \
concurrent batch processing of many videos."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// OpenAI API key (overrides the config file)
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat model to use (overrides the config file)
    #[arg(long, global = true)]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a YouTube video from a URL or video ID
    Summarize {
        /// YouTube URL or bare 11-character video ID
        #[arg(value_name = "URL_OR_ID")]
        url: String,

        /// Summary style
        #[arg(short, long, value_enum, default_value = "detailed")]
        style: SummaryStyle,

        /// Maximum summary length in words
        #[arg(short = 'l', long, value_name = "WORDS")]
        max_length: Option<usize>,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Preferred transcript languages, in priority order (e.g. en, es)
        #[arg(long = "language", value_name = "LANG")]
        languages: Vec<String>,

        /// Save the raw transcript to a file
        #[arg(long, value_name = "FILE")]
        save_transcript: Option<PathBuf>,

        /// Custom summarization prompt (overrides --style)
        #[arg(long, value_name = "PROMPT")]
        custom_prompt: Option<String>,
    },

    /// Extract a transcript without summarizing
    Extract {
        /// YouTube URL or bare 11-character video ID
        #[arg(value_name = "URL_OR_ID")]
        url: String,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Preferred transcript languages, in priority order
        #[arg(long = "language", value_name = "LANG")]
        languages: Vec<String>,

        /// Include timestamps in text output
        #[arg(long)]
        timestamps: bool,
    },

    /// Process multiple videos from a file, one URL or ID per line
    Batch {
        /// Input file with one YouTube URL or video ID per line
        #[arg(value_name = "FILE")]
        input_file: PathBuf,

        /// Summary style
        #[arg(short, long, value_enum, default_value = "detailed")]
        style: SummaryStyle,

        /// Output directory for per-video summaries
        #[arg(short = 'd', long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Maximum summary length in words
        #[arg(short = 'l', long, value_name = "WORDS")]
        max_length: Option<usize>,

        /// Number of videos to process concurrently (defaults to the
        /// configured max_concurrent_jobs)
        #[arg(short = 'j', long, value_name = "COUNT")]
        concurrent: Option<usize>,
    },

    /// Show a video's available transcript tracks
    Info {
        /// YouTube URL or bare 11-character video ID
        #[arg(value_name = "URL_OR_ID")]
        url: String,
    },

    /// Show or initialize the configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON
    Json,
    /// Markdown
    Markdown,
    /// SRT subtitle format (transcripts only)
    Srt,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
            OutputFormat::Srt => "srt",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Srt => write!(f, "srt"),
        }
    }
}
