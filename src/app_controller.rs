use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, info, trace, warn, LevelFilter};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::{self, Provider};
use crate::subtitle_processor::SubtitleDocument;
use crate::translation_service::{LineOutcome, TranslationService};

// @module: Application controller for subtitle translation

const ANSI_RESET: &str = "\x1B[0m";

/// Color band of the progress indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    /// Below 50%
    Started,
    /// 50% up to 90%
    Halfway,
    /// 90% and above
    Finishing,
}

impl ProgressBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 50.0 {
            ProgressBand::Started
        } else if percentage < 90.0 {
            ProgressBand::Halfway
        } else {
            ProgressBand::Finishing
        }
    }

    // @returns: 256-color ANSI escape for the band (orange, light green, green)
    pub fn ansi_color(&self) -> &'static str {
        match self {
            ProgressBand::Started => "\x1B[38;5;214m",
            ProgressBand::Halfway => "\x1B[38;5;154m",
            ProgressBand::Finishing => "\x1B[38;5;82m",
        }
    }

    /// Wrap `label` in the band's color
    pub fn paint(&self, label: &str) -> String {
        format!("{}{}{}", self.ansi_color(), label, ANSI_RESET)
    }
}

/// Completion percentage after the line at `index` (0-based) is written
pub fn completion_percentage(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (index + 1) as f64 / total as f64 * 100.0
}

/// One translation run: what to read, where to write, which languages
#[derive(Debug, Clone)]
pub struct TranslationJob {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub source_language: String,
    pub target_language: String,
}

impl TranslationJob {
    /// Create a job, deriving the output path from the input name when none is given
    pub fn new(
        input_file: impl Into<PathBuf>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        output_file: Option<PathBuf>,
    ) -> Self {
        let input_file = input_file.into();
        let source_language = source_language.into();
        let target_language = target_language.into();
        let output_file = output_file.unwrap_or_else(|| {
            FileManager::generate_output_path(&input_file, &source_language, &target_language)
        });

        Self {
            input_file,
            output_file,
            source_language,
            target_language,
        }
    }
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranslationSummary {
    /// Where the output was written
    pub output_file: PathBuf,
    /// Lines in the source document
    pub total_lines: usize,
    /// Lines already present in the output when the run started
    pub resumed_from: usize,
    /// Dialogue lines replaced by a translation
    pub translated: usize,
    /// Structural lines copied unchanged
    pub passed_through: usize,
    /// Dialogue lines kept in the original after a provider error
    pub failed: usize,
    /// Progress percentage reported after the last processed line
    pub final_percentage: f64,
}

impl TranslationSummary {
    /// Lines processed during this run
    pub fn processed(&self) -> usize {
        self.translated + self.passed_through + self.failed
    }
}

/// Main application controller for subtitle translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Run a job with the provider selected by the configuration
    pub async fn run(&self, job: &TranslationJob) -> Result<TranslationSummary> {
        let provider = providers::create_provider(&self.config)
            .context("Failed to create translation provider")?;
        self.run_with_provider(job, provider).await
    }

    /// Run a job with an explicit provider
    pub async fn run_with_provider(
        &self,
        job: &TranslationJob,
        provider: Box<dyn Provider>,
    ) -> Result<TranslationSummary> {
        let start_time = Instant::now();

        let document = SubtitleDocument::read_from_file(&job.input_file)?;
        let total = document.len();
        debug!(
            "Read {} lines ({} dialogue) from {}",
            total,
            document.dialogue_count(),
            document.source_file.display()
        );

        if let Some(parent) = job.output_file.parent() {
            FileManager::ensure_dir(parent)?;
        }

        let resume = FileManager::prepare_resume(&job.output_file)?;
        if resume.truncated_bytes > 0 {
            warn!(
                "Removed an incomplete last line ({} bytes) from {}",
                resume.truncated_bytes,
                job.output_file.display()
            );
        }

        let start_line = resume.lines.min(total);
        if resume.lines > total {
            warn!(
                "Output already has {} lines, more than the {} source lines; nothing to do",
                resume.lines, total
            );
        } else if start_line == total && total > 0 {
            info!("Output is already complete, nothing to translate");
        } else if start_line > 0 {
            info!("Resuming at line {} of {}", start_line + 1, total);
        }

        FileManager::touch(&job.output_file)?;

        let service = TranslationService::new(provider, &job.source_language, &job.target_language);
        for code in [service.source_language(), service.target_language()] {
            if language_utils::get_language_name(code).is_none() {
                debug!("Unrecognized language code '{}', passing it through as is", code);
            }
        }
        info!(
            "{}: {} -> {}",
            service.provider_name(),
            language_utils::describe_language(service.source_language()),
            language_utils::describe_language(service.target_language())
        );

        let mut summary = TranslationSummary {
            output_file: job.output_file.clone(),
            total_lines: total,
            resumed_from: start_line,
            final_percentage: completion_percentage(start_line.saturating_sub(1), total),
            ..Default::default()
        };

        let progress_bar = self.create_progress_bar(total, start_line);

        let trace_lines = log::max_level() >= LevelFilter::Trace;

        for (index, line) in document.lines.iter().enumerate().skip(start_line) {
            if trace_lines {
                progress_bar.suspend(|| trace!("Line {} ({}): {}", index + 1, line.kind(), line.translatable_text()));
            }

            let outcome = service.translate_line(line).await;
            match &outcome {
                LineOutcome::Translated(_) => summary.translated += 1,
                LineOutcome::PassedThrough(_) => summary.passed_through += 1,
                LineOutcome::Failed(e) => {
                    summary.failed += 1;
                    progress_bar.suspend(|| warn!("Error translating line {}: {}", index + 1, e));
                }
            }

            FileManager::append_to_file(&job.output_file, &outcome.output_for(line))?;

            let percentage = completion_percentage(index, total);
            summary.final_percentage = percentage;
            progress_bar.set_message(ProgressBand::from_percentage(percentage).paint("Translating"));
            progress_bar.inc(1);
        }

        progress_bar.finish();

        if summary.failed > 0 {
            warn!("{} line(s) could not be translated and were kept as is", summary.failed);
        }
        debug!(
            "Processed {} lines in {}: {} translated, {} copied, {} failed",
            summary.processed(),
            Self::format_duration(start_time.elapsed()),
            summary.translated,
            summary.passed_through,
            summary.failed
        );
        info!("Translation complete. Saved to {}", job.output_file.display());

        Ok(summary)
    }

    /// Progress bar over all source lines, starting at the resume offset
    fn create_progress_bar(&self, total: usize, start_line: usize) -> ProgressBar {
        let target = if self.config.show_progress && total > 0 {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };

        let progress_bar = ProgressBar::with_draw_target(Some(total as u64), target);
        let style = ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines ({percent}%) {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        progress_bar.set_position(start_line as u64);
        progress_bar.reset_eta();
        let initial = completion_percentage(start_line.saturating_sub(1), total);
        let band = if start_line == 0 { ProgressBand::Started } else { ProgressBand::from_percentage(initial) };
        progress_bar.set_message(band.paint("Translating"));

        progress_bar
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:01}s", seconds, duration.subsec_millis() / 100)
        }
    }
}
