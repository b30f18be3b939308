/*!
 * # subtrans - resumable subtitle translation
 *
 * A Rust library that translates the dialogue lines of a subtitle file one
 * line at a time through a machine-translation service, copying cue numbers,
 * timing lines and blank lines through untouched.
 *
 * ## Features
 *
 * - Line-for-line output: line `i` of the output always corresponds to line
 *   `i` of the source
 * - Resumable: each line is appended as soon as it is done, and a rerun
 *   continues after the last complete line on disk
 * - Per-line failure isolation: a line the service cannot translate is kept
 *   in the original language
 * - Providers:
 *   - Google Translate (public `gtx` endpoint)
 *   - LibreTranslate
 *
 * ## Architecture
 *
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Line splitting and classification
 * - `translation_service`: Per-line translation with failure fallback
 * - `app_controller`: The translation run and its progress display
 * - `file_utils`: Output naming, resume detection and appending
 * - `language_utils`: ISO language names for display
 * - `providers`: Translation service clients
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod subtitle_processor;
pub mod translation_service;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, TranslationJob, TranslationSummary};
pub use errors::{AppError, ProviderError};
pub use file_utils::create_output_filename;
pub use subtitle_processor::{LineKind, SubtitleDocument, SubtitleLine};
pub use translation_service::TranslationService;
