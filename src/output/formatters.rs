use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::batch::BatchReport;
use crate::cli::OutputFormat;
use crate::summarize::SummaryStyle;
use crate::transcript::Transcript;

/// A rendered summary with its source metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutput {
    pub video_id: String,
    pub style: SummaryStyle,
    pub summary: String,
    pub transcript_words: usize,
    pub summary_words: usize,
}

/// Render a summary into the requested format.
pub fn format_summary(output: &SummaryOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(output.summary.clone()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(output)?),
        OutputFormat::Markdown => Ok(format!(
            "# Video Summary\n\n**Video ID:** {}\n**Style:** {}\n\n## Summary\n\n{}",
            output.video_id, output.style, output.summary
        )),
        OutputFormat::Srt => {
            anyhow::bail!("SRT format is only available for transcript extraction")
        }
    }
}

/// Render a transcript into the requested format.
pub fn format_transcript(
    transcript: &Transcript,
    format: OutputFormat,
    timestamps: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_transcript_text(transcript, timestamps)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&transcript.segments)?),
        OutputFormat::Markdown => Ok(format_transcript_markdown(transcript)),
        OutputFormat::Srt => Ok(format_transcript_srt(transcript)),
    }
}

fn format_transcript_text(transcript: &Transcript, timestamps: bool) -> String {
    transcript
        .segments
        .iter()
        .map(|segment| {
            if timestamps {
                format!("[{:.2}s] {}", segment.start, segment.text)
            } else {
                segment.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markdown rendering groups segments into ~30 second paragraphs with a
/// bold minute:second marker.
fn format_transcript_markdown(transcript: &Transcript) -> String {
    const PARAGRAPH_SECONDS: f64 = 30.0;

    let mut out = String::new();
    let mut paragraph = String::new();
    let mut paragraph_start: Option<f64> = None;

    let flush = |paragraph: &mut String, start: f64, out: &mut String| {
        if !paragraph.is_empty() {
            let seconds = start as u64;
            out.push_str(&format!(
                "**[{:02}:{:02}]** {}\n\n",
                seconds / 60,
                seconds % 60,
                paragraph.trim()
            ));
            paragraph.clear();
        }
    };

    for segment in &transcript.segments {
        match paragraph_start {
            Some(start) if segment.start - start >= PARAGRAPH_SECONDS => {
                flush(&mut paragraph, start, &mut out);
                paragraph_start = Some(segment.start);
            }
            None => paragraph_start = Some(segment.start),
            _ => {}
        }

        if !paragraph.is_empty() {
            paragraph.push(' ');
        }
        paragraph.push_str(segment.text.trim());
    }

    if let Some(start) = paragraph_start {
        flush(&mut paragraph, start, &mut out);
    }

    out.trim_end().to_string()
}

fn format_transcript_srt(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            format!(
                "{}\n{} --> {}\n{}\n",
                i + 1,
                srt_timestamp(segment.start),
                srt_timestamp(segment.end()),
                segment.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format seconds as an SRT timestamp: `HH:MM:SS,mmm`.
pub fn srt_timestamp(seconds: f64) -> String {
    let millis = (seconds.max(0.0) * 1000.0).round() as u64;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        millis / 3_600_000,
        millis % 3_600_000 / 60_000,
        millis % 60_000 / 1000,
        millis % 1000
    )
}

/// Render a batch report into the requested format.
pub fn format_batch_report(report: &BatchReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(format_batch_report_text(report)),
        OutputFormat::Markdown => Ok(format_batch_report_markdown(report)),
        OutputFormat::Srt => {
            anyhow::bail!("SRT format is only available for transcript extraction")
        }
    }
}

fn format_batch_report_text(report: &BatchReport) -> String {
    let mut out = String::new();

    for item in &report.items {
        match (&item.video_id, &item.summary) {
            (Some(video_id), Some(summary)) => {
                out.push_str(&format!("=== {} ===\n", video_id));
                out.push_str(&format!("Input: {}\n\n", item.input));
                out.push_str(summary);
                out.push_str("\n\n");
                out.push_str(&"=".repeat(50));
                out.push_str("\n\n");
            }
            _ => {
                let reason = item.error.as_deref().unwrap_or("unknown error");
                out.push_str(&format!("=== FAILED: {} ===\n{}\n\n", item.input, reason));
            }
        }
    }

    out.push_str(&format!(
        "Processed {} videos: {} succeeded, {} failed\n",
        report.total, report.succeeded, report.failed
    ));

    out
}

fn format_batch_report_markdown(report: &BatchReport) -> String {
    let mut out = String::from("# Batch Summary Report\n\n");
    out.push_str(&format!(
        "**Total:** {} | **Succeeded:** {} | **Failed:** {}\n\n",
        report.total, report.succeeded, report.failed
    ));

    for item in &report.items {
        match (&item.video_id, &item.summary) {
            (Some(video_id), Some(summary)) => {
                out.push_str(&format!("## {}\n\n{}\n\n", video_id, summary));
            }
            _ => {
                let reason = item.error.as_deref().unwrap_or("unknown error");
                out.push_str(&format!("## {} (failed)\n\n{}\n\n", item.input, reason));
            }
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchItem;
    use crate::transcript::TranscriptSegment;
    use crate::video::VideoId;

    fn sample_transcript() -> Transcript {
        Transcript {
            video_id: VideoId::parse("dQw4w9WgXcQ").unwrap(),
            language: "English".to_string(),
            language_code: "en".to_string(),
            is_generated: false,
            segments: vec![
                TranscriptSegment {
                    text: "hello".to_string(),
                    start: 0.0,
                    duration: 1.5,
                },
                TranscriptSegment {
                    text: "world".to_string(),
                    start: 1.5,
                    duration: 2.0,
                },
            ],
        }
    }

    #[test]
    fn test_srt_timestamp() {
        assert_eq!(srt_timestamp(0.0), "00:00:00,000");
        assert_eq!(srt_timestamp(1.5), "00:00:01,500");
        assert_eq!(srt_timestamp(61.25), "00:01:01,250");
        assert_eq!(srt_timestamp(3661.009), "01:01:01,009");
    }

    #[test]
    fn test_format_transcript_srt() {
        let srt = format_transcript(&sample_transcript(), OutputFormat::Srt, false).unwrap();
        assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:01,500\nhello\n"));
        assert!(srt.contains("2\n00:00:01,500 --> 00:00:03,500\nworld\n"));
    }

    #[test]
    fn test_format_transcript_text_with_timestamps() {
        let text = format_transcript(&sample_transcript(), OutputFormat::Text, true).unwrap();
        assert_eq!(text, "[0.00s] hello\n[1.50s] world");

        let plain = format_transcript(&sample_transcript(), OutputFormat::Text, false).unwrap();
        assert_eq!(plain, "hello\nworld");
    }

    #[test]
    fn test_format_transcript_json_is_segment_array() {
        let json = format_transcript(&sample_transcript(), OutputFormat::Json, false).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["text"], "hello");
        assert_eq!(parsed[1]["start"], 1.5);
    }

    #[test]
    fn test_format_transcript_markdown_groups_paragraphs() {
        let mut transcript = sample_transcript();
        transcript.segments.push(TranscriptSegment {
            text: "later".to_string(),
            start: 45.0,
            duration: 1.0,
        });

        let md = format_transcript(&transcript, OutputFormat::Markdown, false).unwrap();
        assert!(md.contains("**[00:00]** hello world"));
        assert!(md.contains("**[00:45]** later"));
    }

    #[test]
    fn test_format_summary_markdown() {
        let output = SummaryOutput {
            video_id: "dQw4w9WgXcQ".to_string(),
            style: SummaryStyle::Brief,
            summary: "A short summary.".to_string(),
            transcript_words: 100,
            summary_words: 3,
        };

        let md = format_summary(&output, OutputFormat::Markdown).unwrap();
        assert!(md.contains("**Video ID:** dQw4w9WgXcQ"));
        assert!(md.contains("**Style:** brief"));
        assert!(md.contains("A short summary."));
    }

    #[test]
    fn test_format_summary_rejects_srt() {
        let output = SummaryOutput {
            video_id: "dQw4w9WgXcQ".to_string(),
            style: SummaryStyle::Brief,
            summary: "text".to_string(),
            transcript_words: 1,
            summary_words: 1,
        };
        assert!(format_summary(&output, OutputFormat::Srt).is_err());
    }

    #[test]
    fn test_format_summary_json_fields() {
        let output = SummaryOutput {
            video_id: "dQw4w9WgXcQ".to_string(),
            style: SummaryStyle::KeyInsights,
            summary: "insights".to_string(),
            transcript_words: 42,
            summary_words: 1,
        };

        let json = format_summary(&output, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["video_id"], "dQw4w9WgXcQ");
        assert_eq!(parsed["style"], "key_insights");
        assert_eq!(parsed["transcript_words"], 42);
    }

    #[test]
    fn test_format_batch_report_text_includes_failures() {
        let report = BatchReport {
            total: 2,
            succeeded: 1,
            failed: 1,
            items: vec![
                BatchItem {
                    input: "dQw4w9WgXcQ".to_string(),
                    video_id: Some("dQw4w9WgXcQ".to_string()),
                    summary: Some("fine".to_string()),
                    error: None,
                },
                BatchItem {
                    input: "garbage".to_string(),
                    video_id: None,
                    summary: None,
                    error: Some("invalid video id".to_string()),
                },
            ],
        };

        let text = format_batch_report(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("=== dQw4w9WgXcQ ==="));
        assert!(text.contains("FAILED: garbage"));
        assert!(text.contains("1 succeeded, 1 failed"));
    }
}
