// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use subtrans::app_config::{Config, ConfigOverrides, LogLevel, TranslationProvider};
use subtrans::{Controller, TranslationJob};

/// Configuration file looked up when `--config` is not given
const DEFAULT_CONFIG_PATH: &str = "subtrans.json";

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    #[value(name = "libretranslate")]
    LibreTranslate,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::LibreTranslate => TranslationProvider::LibreTranslate,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for subtrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subtrans - translate subtitles line by line
///
/// Dialogue lines are sent to a machine-translation service; cue numbers,
/// timing lines and blank lines are copied unchanged. Progress is saved after
/// every line, so an interrupted run continues where it stopped.
#[derive(Parser, Debug)]
#[command(name = "subtrans")]
#[command(version)]
#[command(about = "Translate subtitles to a different language")]
#[command(subcommand_negates_reqs = true)]
#[command(long_about = "subtrans translates the dialogue of a subtitle file line by line and can resume an interrupted run.

EXAMPLES:
    subtrans movie.en.srt -f en -t fa              # Writes movie.fa.srt
    subtrans movie.srt -f en -t de                 # Writes movie_de.srt
    subtrans movie.srt -f en -t es -o out.srt      # Explicit output path
    subtrans movie.srt -f en -t fr -p libretranslate -e http://localhost:5000
    subtrans completions bash > subtrans.bash      # Generate bash completions

CONFIGURATION:
    Settings are read from subtrans.json in the current directory when it
    exists, or from the file given with --config. Command-line flags take
    precedence over the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the subtitle file to translate
    #[arg(value_name = "INPUT_PATH", required = true)]
    input_path: Option<PathBuf>,

    /// Source language code (e.g., 'en')
    #[arg(short = 'f', long = "from", value_name = "CODE", required = true)]
    source_language: Option<String>,

    /// Destination language code (e.g., 'fa')
    #[arg(short = 't', long = "to", value_name = "CODE", required = true)]
    target_language: Option<String>,

    /// Path to save the translated subtitle file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Provider endpoint URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Do not draw the progress bar
    #[arg(long)]
    no_progress: bool,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌"),
            Level::Warn => ("\x1B[1;33m", "🚧"),
            Level::Info => ("\x1B[1;32m", ""),
            Level::Debug => ("\x1B[1;36m", "🔍"),
            Level::Trace => ("\x1B[1;35m", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subtrans", &mut std::io::stdout());
        return Ok(());
    }

    run_translate(cli).await
}

async fn run_translate(options: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.into());
    }

    let config = load_config(&options)?;

    // Apply the file's level unless the command line already set one
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.into());
    }

    let input_path = options.input_path
        .ok_or_else(|| anyhow!("INPUT_PATH is required"))?;
    let source_language = options.source_language
        .ok_or_else(|| anyhow!("--from is required"))?;
    let target_language = options.target_language
        .ok_or_else(|| anyhow!("--to is required"))?;

    let job = TranslationJob::new(input_path, source_language, target_language, options.output);
    let controller = Controller::with_config(config);
    controller.run(&job).await?;

    Ok(())
}

/// Load the configuration file and apply command-line overrides
fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let overrides = ConfigOverrides {
        provider: options.provider.clone().map(Into::into),
        endpoint: options.endpoint.clone(),
        log_level: options.log_level.clone().map(Into::into),
        show_progress: options.no_progress.then_some(false),
    };

    let config_path = options.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    Config::resolve(options.config.as_deref(), Path::new(DEFAULT_CONFIG_PATH), &overrides)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
}
