use anyhow::Result;
use clap::Parser;
use console::style;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_summarizer::batch::{BatchOptions, BatchProcessor};
use yt_summarizer::cli::{Cli, Commands, OutputFormat};
use yt_summarizer::config::Config;
use yt_summarizer::output::{self, formatters};
use yt_summarizer::summarize::{Summarize, Summarizer};
use yt_summarizer::transcript::{clean_transcript, TranscriptClient, TranscriptSource};
use yt_summarizer::utils::{format_duration, word_count};
use yt_summarizer::video::VideoId;
use yt_summarizer::SummarizerError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; flags pick the default filter, RUST_LOG overrides
    let default_filter = if cli.quiet {
        "yt_summarizer=error"
    } else if cli.verbose {
        "yt_summarizer=debug"
    } else {
        "yt_summarizer=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().await?;
    let quiet = cli.quiet;

    match &cli.command {
        Commands::Summarize {
            url,
            style,
            max_length,
            output,
            format,
            languages,
            save_transcript,
            custom_prompt,
        } => {
            reject_srt_format(*format)?;

            let video_id = VideoId::parse(url)?;
            print_info(&format!("Processing video: {}", video_id), quiet);

            let transcripts = TranscriptClient::new()?;
            let languages = resolve_languages(languages, &config);
            let transcript = transcripts.fetch(&video_id, &languages).await?;

            if let Some(path) = save_transcript {
                output::save_to_file(&transcript.text(), path).await?;
                print_success(&format!("Transcript saved to {}", path.display()), quiet);
            }

            let cleaned = clean_transcript(&transcript.text());
            if cleaned.is_empty() {
                anyhow::bail!(SummarizerError::TranscriptUnavailable {
                    video_id: video_id.to_string(),
                    reason: "transcript is empty after cleaning".to_string(),
                });
            }

            let summarizer = build_summarizer(&cli, &config)?;
            let summary = summarizer
                .summarize(&cleaned, *style, *max_length, custom_prompt.clone())
                .await?;

            let rendered = formatters::format_summary(
                &formatters::SummaryOutput {
                    video_id: video_id.to_string(),
                    style: *style,
                    transcript_words: word_count(&cleaned),
                    summary_words: word_count(&summary),
                    summary,
                },
                *format,
            )?;

            match output {
                Some(path) => {
                    output::save_to_file(&rendered, path).await?;
                    print_success(&format!("Summary saved to {}", path.display()), quiet);
                }
                None => {
                    output::print_to_console(&rendered);
                    print_success("Summary generated successfully!", quiet);
                }
            }
        }

        Commands::Extract {
            url,
            output,
            format,
            languages,
            timestamps,
        } => {
            let video_id = VideoId::parse(url)?;
            print_info(
                &format!("Extracting transcript for video: {}", video_id),
                quiet,
            );

            let transcripts = TranscriptClient::new()?;
            let languages = resolve_languages(languages, &config);
            let transcript = transcripts.fetch(&video_id, &languages).await?;

            print_info(
                &format!(
                    "Got {} segments in {} ({})",
                    transcript.segments.len(),
                    transcript.language,
                    format_duration(transcript.duration())
                ),
                quiet,
            );

            let rendered = formatters::format_transcript(&transcript, *format, *timestamps)?;

            match output {
                Some(path) => {
                    output::save_to_file(&rendered, path).await?;
                    print_success(&format!("Transcript saved to {}", path.display()), quiet);
                }
                None => {
                    output::print_to_console(&rendered);
                    print_success("Transcript extracted successfully!", quiet);
                }
            }
        }

        Commands::Batch {
            input_file,
            style,
            output_dir,
            format,
            max_length,
            concurrent,
        } => {
            reject_srt_format(*format)?;

            let content = fs_err::read_to_string(input_file)?;
            let inputs: Vec<String> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();

            if inputs.is_empty() {
                anyhow::bail!("No URLs found in input file");
            }

            print_info(&format!("Processing {} videos", inputs.len()), quiet);

            let transcripts: Arc<dyn TranscriptSource> = Arc::new(TranscriptClient::new()?);
            let summarizer: Arc<dyn Summarize> = Arc::new(build_summarizer(&cli, &config)?);
            let processor = BatchProcessor::new(transcripts, summarizer);

            let options = BatchOptions {
                style: *style,
                format: *format,
                max_length: *max_length,
                concurrency: concurrent.unwrap_or(config.app.max_concurrent_jobs),
                output_dir: output_dir.clone(),
                languages: config.app.default_languages.clone(),
                show_progress: !quiet,
            };

            let report = processor.run(inputs, &options).await?;

            print_success(
                &format!("Successfully processed {} videos", report.succeeded),
                quiet,
            );

            if report.failed > 0 {
                print_warning(&format!("Failed to process {} videos:", report.failed));
                for item in report.items.iter().filter(|item| !item.succeeded()) {
                    let reason = item.error.as_deref().unwrap_or("unknown error");
                    print_error(&format!("  {}: {}", item.input, reason));
                }
            }

            // Aggregate file only when per-video files were not requested
            if output_dir.is_none() && report.succeeded > 0 {
                let path = std::path::PathBuf::from(format!(
                    "batch_results.{}",
                    format.extension()
                ));
                let rendered = formatters::format_batch_report(&report, *format)?;
                output::save_to_file(&rendered, &path).await?;
                print_success(
                    &format!("Batch results saved to {}", path.display()),
                    quiet,
                );
            }
        }

        Commands::Info { url } => {
            let video_id = VideoId::parse(url)?;
            print_info(
                &format!("Getting transcript information for video: {}", video_id),
                quiet,
            );

            let transcripts = TranscriptClient::new()?;
            let available = transcripts.list_available(&video_id).await?;

            if available.is_empty() {
                print_warning("No transcripts available for this video");
                return Ok(());
            }

            print_success(
                &format!("Found {} available transcript(s):", available.len()),
                quiet,
            );

            for info in &available {
                let mut markers = vec![if info.is_generated {
                    "Auto-generated"
                } else {
                    "Manual"
                }];
                if info.is_translatable {
                    markers.push("Translatable");
                }

                println!(
                    "  • {} ({}) - {}",
                    info.language,
                    info.language_code,
                    markers.join(" | ")
                );
            }
        }

        Commands::Config { show } => {
            if *show {
                config.display();
            } else {
                config.interactive_setup().await?;
            }
        }
    }

    Ok(())
}

/// Summaries cannot be rendered as SRT; fail before any work is done.
fn reject_srt_format(format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Srt {
        anyhow::bail!("SRT format is only available for transcript extraction");
    }
    Ok(())
}

/// Languages from the CLI flag, falling back to the configured defaults.
fn resolve_languages(flag: &[String], config: &Config) -> Vec<String> {
    if flag.is_empty() {
        config.app.default_languages.clone()
    } else {
        flag.to_vec()
    }
}

/// Build the summarizer from CLI overrides and config, requiring an API key.
fn build_summarizer(cli: &Cli, config: &Config) -> Result<Summarizer> {
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| config.resolved_api_key())
        .ok_or(SummarizerError::MissingApiKey)?;

    let model = cli
        .model
        .clone()
        .unwrap_or_else(|| config.openai.model.clone());

    Ok(Summarizer::new(api_key, config.resolved_api_base(), model))
}

fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{} {}", style("✓").green(), message);
    }
}

fn print_info(message: &str, quiet: bool) {
    if !quiet {
        println!("{} {}", style("ℹ").blue(), message);
    }
}

fn print_warning(message: &str) {
    println!("{} {}", style("⚠").yellow(), message);
}

fn print_error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}
