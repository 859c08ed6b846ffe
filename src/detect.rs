//! Notebook format detection.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Notebook representation of a file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotebookFormat {
    /// Native Jupyter notebook JSON (`.ipynb`)
    Ipynb,
    /// Python script with `# %%` cell markers
    PercentScript,
    /// Python script where comment paragraphs are markdown cells
    LightScript,
    /// Markdown document with fenced code blocks
    Markdown,
}

impl NotebookFormat {
    /// Whether this is a plain-text (Jupytext style) representation.
    pub fn is_text(&self) -> bool {
        !matches!(self, NotebookFormat::Ipynb)
    }

    /// Short name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            NotebookFormat::Ipynb => "ipynb",
            NotebookFormat::PercentScript => "py:percent",
            NotebookFormat::LightScript => "py:light",
            NotebookFormat::Markdown => "md",
        }
    }
}

impl std::fmt::Display for NotebookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Cell marker of the percent script format.
pub(crate) const PERCENT_MARKER: &str = "# %%";

/// Extensions handled by the script readers.
const SCRIPT_EXTENSIONS: &[&str] = &["py"];

/// Extensions handled by the markdown reader.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "rmd"];

/// Detect the notebook format of a file.
///
/// Script files are inspected to tell the percent and light flavours apart.
///
/// # Returns
/// * `Err(Error::FileNotFound)` if the path does not exist
/// * `Err(Error::UnsupportedFormat)` if the extension is not a notebook format
///
/// # Example
/// ```no_run
/// use nbprofile::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("analysis.py").unwrap();
/// println!("format: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<NotebookFormat> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let ext = extension_of(path)?;
    if ext == "ipynb" {
        return Ok(NotebookFormat::Ipynb);
    }

    if SCRIPT_EXTENSIONS.contains(&ext.as_str()) {
        let content = fs::read_to_string(path)?;
        return detect_format_from_str(&ext, &content);
    }

    detect_format_from_str(&ext, "")
}

/// Detect the notebook format from an extension and the file content.
pub fn detect_format_from_str(ext: &str, content: &str) -> Result<NotebookFormat> {
    let ext = ext.trim_start_matches('.').to_lowercase();

    if ext == "ipynb" {
        return Ok(NotebookFormat::Ipynb);
    }
    if SCRIPT_EXTENSIONS.contains(&ext.as_str()) {
        return Ok(if is_percent_script(content) {
            NotebookFormat::PercentScript
        } else {
            NotebookFormat::LightScript
        });
    }
    if MARKDOWN_EXTENSIONS.contains(&ext.as_str()) {
        return Ok(NotebookFormat::Markdown);
    }

    Err(Error::UnsupportedFormat(format!(
        "no notebook reader for .{} files",
        ext
    )))
}

/// Check if script content uses `# %%` cell markers.
pub fn is_percent_script(content: &str) -> bool {
    content
        .lines()
        .any(|line| line.trim_start().starts_with(PERCENT_MARKER))
}

/// Check if a path has the `.ipynb` extension.
pub fn is_ipynb<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ipynb"))
}

/// Lowercase extension of a path.
pub(crate) fn extension_of(path: &Path) -> Result<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            Error::UnsupportedFormat(format!("{} has no file extension", path.display()))
        })
}
