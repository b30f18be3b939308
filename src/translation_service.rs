/*!
 * Per-line translation on top of a provider.
 *
 * The service decides which lines reach the provider and turns every
 * provider failure into a recoverable outcome: a failed line is written out
 * unchanged and the run continues.
 */

use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::subtitle_processor::{LineKind, SubtitleLine};

/// What happened to one source line
#[derive(Debug)]
pub enum LineOutcome {
    /// Dialogue replaced by its translation
    Translated(String),
    /// Structural line copied unchanged
    PassedThrough(LineKind),
    /// Dialogue kept in the original because the provider failed
    Failed(ProviderError),
}

impl LineOutcome {
    /// The text to append to the output for `line`
    pub fn output_for(&self, line: &SubtitleLine) -> String {
        match self {
            LineOutcome::Translated(text) => line.replaced_with(text),
            LineOutcome::PassedThrough(_) | LineOutcome::Failed(_) => line.passthrough(),
        }
    }
}

/// Translation service bound to a provider and a language pair
#[derive(Debug)]
pub struct TranslationService {
    provider: Box<dyn Provider>,
    source_language: String,
    target_language: String,
}

impl TranslationService {
    /// Create a service translating from `source_language` to `target_language`
    pub fn new(
        provider: Box<dyn Provider>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Process one source line
    pub async fn translate_line(&self, line: &SubtitleLine) -> LineOutcome {
        let kind = line.kind();
        if !kind.is_translatable() {
            return LineOutcome::PassedThrough(kind);
        }

        match self.provider
            .translate(line.translatable_text(), &self.source_language, &self.target_language)
            .await
        {
            Ok(translated) => {
                // Multi-line answers would break the 1:1 line correspondence
                let translated = translated
                    .trim()
                    .replace("\r\n", " ")
                    .replace(['\r', '\n'], " ");
                if translated.is_empty() {
                    LineOutcome::Failed(ProviderError::EmptyResponse)
                } else {
                    LineOutcome::Translated(translated)
                }
            }
            Err(e) => LineOutcome::Failed(e),
        }
    }
}
