/*!
 * Line-level view of a subtitle file.
 *
 * Subtitles are never parsed into cues. A document is the ordered list of
 * its raw lines, and each line is classified on its own to decide whether it
 * goes to the translator or is copied through.
 */

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;

/// Token separating start and end time on a cue timing line
pub const TIMING_DELIMITER: &str = "-->";

/// Byte order mark some editors put in front of the first line
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Line content with a leading byte order mark and surrounding whitespace removed
fn trimmed_content(line: &str) -> &str {
    line.trim_start_matches(BYTE_ORDER_MARK).trim()
}

/// Classification of a single subtitle line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace only
    Blank,
    /// A lone cue number, in any script's decimal digits
    Index,
    /// A cue time range such as `00:00:01,000 --> 00:00:04,000`
    Timing,
    /// Text to be translated
    Dialogue,
}

impl LineKind {
    /// Classify a line. Precedence is blank, index, timing, then dialogue.
    pub fn classify(line: &str) -> Self {
        let trimmed = trimmed_content(line);
        if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.chars().all(char::is_numeric) {
            LineKind::Index
        } else if line.contains(TIMING_DELIMITER) {
            LineKind::Timing
        } else {
            LineKind::Dialogue
        }
    }

    /// Whether lines of this kind are sent to the translator
    pub fn is_translatable(&self) -> bool {
        matches!(self, LineKind::Dialogue)
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineKind::Blank => "blank",
            LineKind::Index => "index",
            LineKind::Timing => "timing",
            LineKind::Dialogue => "dialogue",
        };
        write!(f, "{}", name)
    }
}

/// One raw line of the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleLine {
    /// Line content without its terminator
    pub text: String,
    /// The original terminator: `"\n"`, `"\r\n"`, or empty for a final unterminated line
    pub ending: String,
}

impl SubtitleLine {
    /// Split a raw line (as produced by `split_inclusive('\n')`) into content and terminator
    pub fn from_raw(raw: &str) -> Self {
        let (text, ending) = if let Some(stripped) = raw.strip_suffix("\r\n") {
            (stripped, "\r\n")
        } else if let Some(stripped) = raw.strip_suffix('\n') {
            (stripped, "\n")
        } else {
            (raw, "")
        };

        Self {
            text: text.to_string(),
            ending: ending.to_string(),
        }
    }

    /// Classification of this line
    pub fn kind(&self) -> LineKind {
        LineKind::classify(&self.text)
    }

    /// Text handed to the translator
    pub fn translatable_text(&self) -> &str {
        trimmed_content(&self.text)
    }

    /// Terminator used when writing this line to the output.
    ///
    /// Output lines are always terminated so the line count on disk stays an
    /// exact resume marker.
    pub fn output_ending(&self) -> &str {
        if self.ending.is_empty() { "\n" } else { &self.ending }
    }

    /// The line as written to the output, unchanged
    pub fn passthrough(&self) -> String {
        format!("{}{}", self.text, self.output_ending())
    }

    /// `replacement` written in place of this line, keeping its terminator
    pub fn replaced_with(&self, replacement: &str) -> String {
        format!("{}{}", replacement, self.output_ending())
    }
}

/// A subtitle file as an ordered list of lines
#[derive(Debug, Clone)]
pub struct SubtitleDocument {
    /// Path the document was read from
    pub source_file: PathBuf,
    /// The lines in file order
    pub lines: Vec<SubtitleLine>,
}

impl SubtitleDocument {
    /// Split text into lines, keeping each line's terminator
    pub fn parse_str(source_file: impl Into<PathBuf>, content: &str) -> Self {
        let lines = content
            .split_inclusive('\n')
            .map(SubtitleLine::from_raw)
            .collect();

        Self {
            source_file: source_file.into(),
            lines,
        }
    }

    /// Read a document from disk
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)
            .context("Failed to load subtitle file")?;
        Ok(Self::parse_str(path, &content))
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines that will be sent to the translator
    pub fn dialogue_count(&self) -> usize {
        self.lines.iter().filter(|line| line.kind().is_translatable()).count()
    }
}
