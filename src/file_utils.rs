use anyhow::{Context, Result};
use regex::{NoExpand, RegexBuilder};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

/// State of a previously written output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResumePoint {
    /// Number of complete lines already on disk
    pub lines: usize,
    /// Bytes of an unterminated trailing line that were cut off
    pub truncated_bytes: usize,
}

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Append content to a file, opening and closing it for this write only
    pub fn append_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open output file: {:?}", path.as_ref()))?;

        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to output file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Create the file if it does not exist, leaving existing content alone
    pub fn touch<P: AsRef<Path>>(path: P) -> Result<()> {
        Self::append_to_file(path, "")
    }

    /// Inspect an existing output file and prepare it for appending.
    ///
    /// Returns the number of newline-terminated lines. A trailing line with no
    /// terminator can only come from an interrupted write, so it is removed
    /// from the file and reported in `truncated_bytes`. A missing file is a
    /// fresh start.
    pub fn prepare_resume<P: AsRef<Path>>(path: P) -> Result<ResumePoint> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(ResumePoint::default());
        }

        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read output file: {:?}", path))?;

        let lines = bytes.iter().filter(|&&b| b == b'\n').count();
        let complete_len = bytes.iter()
            .rposition(|&b| b == b'\n')
            .map(|pos| pos + 1)
            .unwrap_or(0);
        let truncated_bytes = bytes.len() - complete_len;

        if truncated_bytes > 0 {
            let file = OpenOptions::new()
                .write(true)
                .open(path)
                .with_context(|| format!("Failed to open output file: {:?}", path))?;
            file.set_len(complete_len as u64)
                .with_context(|| format!("Failed to truncate output file: {:?}", path))?;
        }

        Ok(ResumePoint { lines, truncated_bytes })
    }

    // @generates: Output path for translated subtitle next to the input
    pub fn generate_output_path<P: AsRef<Path>>(
        input_file: P,
        source_language: &str,
        target_language: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let file_name = input_file.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let output_name = create_output_filename(&file_name, source_language, target_language);
        input_file.with_file_name(output_name)
    }
}

/// Derive the translated file name from a source file name.
///
/// Whole-word, case-insensitive occurrences of `source_language` in the stem
/// are replaced by `target_language`; when there are none, `_<target>` is
/// appended to the stem. The extension is kept.
pub fn create_output_filename(file_name: &str, source_language: &str, target_language: &str) -> String {
    let path = Path::new(file_name);
    let stem = path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let replaced = if source_language.is_empty() {
        None
    } else {
        RegexBuilder::new(&format!(r"\b{}\b", regex::escape(source_language)))
            .case_insensitive(true)
            .build()
            .ok()
            .filter(|re| re.is_match(&stem))
            .map(|re| re.replace_all(&stem, NoExpand(target_language)).into_owned())
    };

    let new_stem = replaced.unwrap_or_else(|| format!("{}_{}", stem, target_language));
    format!("{}{}", new_stem, extension)
}
