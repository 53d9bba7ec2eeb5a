use anyhow::{Context, Result};
use futures_util::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::cli::OutputFormat;
use crate::output::formatters::{format_summary, SummaryOutput};
use crate::summarize::{Summarize, SummaryStyle};
use crate::transcript::{clean_transcript, TranscriptSource};
use crate::utils::word_count;
use crate::video::VideoId;

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub style: SummaryStyle,
    pub format: OutputFormat,
    pub max_length: Option<usize>,
    pub concurrency: usize,
    pub output_dir: Option<PathBuf>,
    pub languages: Vec<String>,
    pub show_progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            style: SummaryStyle::Detailed,
            format: OutputFormat::Text,
            max_length: None,
            concurrency: 3,
            output_dir: None,
            languages: vec!["en".to_string()],
            show_progress: true,
        }
    }
}

/// One identifier plus its computed result or failure reason.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    /// The input line as given
    pub input: String,

    /// Resolved video ID, when the input parsed
    pub video_id: Option<String>,

    /// Generated summary, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Failure reason, on error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItem {
    pub fn succeeded(&self) -> bool {
        self.summary.is_some()
    }

    fn failure(input: String, video_id: Option<String>, error: impl ToString) -> Self {
        Self {
            input,
            video_id,
            summary: None,
            error: Some(error.to_string()),
        }
    }
}

/// Aggregated results of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub items: Vec<BatchItem>,
}

/// Bounded-concurrency orchestrator that fans out per-video work.
///
/// Items execute unordered under a semaphore cap; failures are isolated per
/// item and collected into the report instead of aborting the run. The report
/// preserves input order.
pub struct BatchProcessor {
    transcripts: Arc<dyn TranscriptSource>,
    summarizer: Arc<dyn Summarize>,
}

impl BatchProcessor {
    pub fn new(transcripts: Arc<dyn TranscriptSource>, summarizer: Arc<dyn Summarize>) -> Self {
        Self {
            transcripts,
            summarizer,
        }
    }

    /// Process a list of URL-or-ID inputs and assemble a report.
    pub async fn run(&self, inputs: Vec<String>, options: &BatchOptions) -> Result<BatchReport> {
        if inputs.is_empty() {
            anyhow::bail!("No video URLs or IDs to process");
        }

        if let Some(dir) = &options.output_dir {
            fs_err::create_dir_all(dir).context("Failed to create output directory")?;
        }

        let concurrency = options.concurrency.max(1);
        let semaphore = Arc::new(Semaphore::new(concurrency));

        let progress = if options.show_progress {
            let bar = ProgressBar::new(inputs.len() as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap(),
            );
            bar.set_message("Processing videos");
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut results = stream::iter(inputs.into_iter().enumerate())
            .map(|(index, input)| {
                let semaphore = semaphore.clone();
                let transcripts = self.transcripts.clone();
                let summarizer = self.summarizer.clone();
                let options = options.clone();
                let progress = progress.clone();

                async move {
                    // Permit cannot be poisoned; the semaphore is never closed
                    let _permit = semaphore.acquire().await.expect("semaphore closed");

                    let item = process_one(
                        transcripts.as_ref(),
                        summarizer.as_ref(),
                        input,
                        &options,
                    )
                    .await;

                    progress.inc(1);
                    (index, item)
                }
            })
            .buffer_unordered(concurrency)
            .collect::<Vec<_>>()
            .await;

        progress.finish_with_message("Batch complete");

        // Report preserves input order regardless of completion order
        results.sort_by_key(|(index, _)| *index);
        let items: Vec<BatchItem> = results.into_iter().map(|(_, item)| item).collect();

        let succeeded = items.iter().filter(|item| item.succeeded()).count();

        Ok(BatchReport {
            total: items.len(),
            succeeded,
            failed: items.len() - succeeded,
            items,
        })
    }
}

/// Run the full pipeline for one input. Every failure becomes a BatchItem
/// error rather than propagating.
async fn process_one(
    transcripts: &dyn TranscriptSource,
    summarizer: &dyn Summarize,
    input: String,
    options: &BatchOptions,
) -> BatchItem {
    let video_id = match VideoId::parse(&input) {
        Ok(id) => id,
        Err(err) => return BatchItem::failure(input, None, err),
    };

    tracing::debug!("Processing video {}", video_id);

    let transcript = match transcripts.fetch(&video_id, &options.languages).await {
        Ok(transcript) => transcript,
        Err(err) => {
            return BatchItem::failure(input, Some(video_id.to_string()), err);
        }
    };

    let cleaned = clean_transcript(&transcript.text());
    if cleaned.is_empty() {
        return BatchItem::failure(
            input,
            Some(video_id.to_string()),
            "Transcript is empty after cleaning",
        );
    }

    let summary = match summarizer
        .summarize(&cleaned, options.style, options.max_length, None)
        .await
    {
        Ok(summary) => summary,
        Err(err) => {
            return BatchItem::failure(input, Some(video_id.to_string()), err);
        }
    };

    // Per-video output file when a directory was given
    if let Some(dir) = &options.output_dir {
        let rendered = SummaryOutput {
            video_id: video_id.to_string(),
            style: options.style,
            summary: summary.clone(),
            transcript_words: word_count(&cleaned),
            summary_words: word_count(&summary),
        };

        let path = dir.join(format!("{}.{}", video_id, options.format.extension()));
        let write_result = format_summary(&rendered, options.format)
            .and_then(|content| fs_err::write(&path, content).map_err(Into::into));

        if let Err(err) = write_result {
            return BatchItem::failure(
                input,
                Some(video_id.to_string()),
                format!("Summary generated but could not be written: {}", err),
            );
        }
    }

    BatchItem {
        input,
        video_id: Some(video_id.to_string()),
        summary: Some(summary),
        error: None,
    }
}
