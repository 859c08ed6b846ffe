//! Notebook readers providing a plugin architecture for multiple formats.
//!
//! Each reader turns one on-disk representation into a [`Notebook`]. The
//! registry dispatches on file extension, so Jupytext-style text notebooks
//! (percent and light scripts, markdown) load through the same path as
//! native `.ipynb` files.
//!
//! # Example
//!
//! ```no_run
//! use nbprofile::convert::{IpynbReader, ReaderRegistry};
//! use std::sync::Arc;
//! use std::path::Path;
//!
//! fn main() -> nbprofile::Result<()> {
//!     let mut registry = ReaderRegistry::new();
//!     registry.register(Arc::new(IpynbReader::new()));
//!
//!     let nb = registry.read(Path::new("analysis.ipynb"))?;
//!     println!("{} cells", nb.cell_count());
//!     Ok(())
//! }
//! ```

mod ipynb;
mod markdown;
mod script;

pub use ipynb::IpynbReader;
pub use markdown::MarkdownReader;
pub use script::ScriptReader;

use crate::detect::extension_of;
use crate::error::{Error, Result};
use crate::model::Notebook;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Trait for notebook readers.
///
/// Implement this trait to add support for a new notebook representation.
pub trait NotebookReader: Send + Sync {
    /// Get the supported file extensions for this reader.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["ipynb"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this reader.
    fn name(&self) -> &str;

    /// Whether this reader handles a plain-text (Jupytext style) format.
    fn is_text_format(&self) -> bool {
        true
    }

    /// Read a notebook from its file content.
    fn read_str(&self, content: &str) -> Result<Notebook>;

    /// Read a notebook from a file, recording the path in its metadata.
    ///
    /// Content that is not valid UTF-8 is a parse error.
    fn read(&self, path: &Path) -> Result<Notebook> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let content = String::from_utf8(fs::read(path)?).map_err(|e| {
            Error::Parse(format!("{}: not valid UTF-8: {}", path.display(), e))
        })?;
        let mut notebook = self.read_str(&content)?;
        notebook.metadata.path = Some(path.to_path_buf());
        Ok(notebook)
    }

    /// Check if this reader supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for notebook readers.
///
/// The registry maps file extensions to readers.
pub struct ReaderRegistry {
    readers: HashMap<String, Arc<dyn NotebookReader>>,
    by_name: HashMap<String, Arc<dyn NotebookReader>>,
}

impl ReaderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            readers: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the ipynb, script and markdown readers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(IpynbReader::new()));
        registry.register(Arc::new(ScriptReader::new()));
        registry.register(Arc::new(MarkdownReader::new()));
        registry
    }

    /// Register a reader for all its supported extensions.
    pub fn register(&mut self, reader: Arc<dyn NotebookReader>) {
        for ext in reader.supported_extensions() {
            self.readers.insert(ext.to_lowercase(), reader.clone());
        }
        self.by_name.insert(reader.name().to_lowercase(), reader);
    }

    /// Get a reader by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn NotebookReader>> {
        self.readers.get(&ext.to_lowercase()).cloned()
    }

    /// Get a reader by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn NotebookReader>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.readers.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.readers.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Read a file using the reader registered for its extension.
    pub fn read(&self, path: &Path) -> Result<Notebook> {
        let ext = extension_of(path)?;
        let reader = self.get_by_extension(&ext).ok_or_else(|| {
            Error::UnsupportedFormat(format!("no notebook reader for .{} files", ext))
        })?;
        reader.read(path)
    }

    /// Read file content using the extension to pick the reader.
    pub fn read_str(&self, content: &str, ext: &str) -> Result<Notebook> {
        let reader = self.get_by_extension(ext).ok_or_else(|| {
            Error::UnsupportedFormat(format!("no notebook reader for .{} files", ext))
        })?;
        reader.read_str(content)
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Drop a leading Jupytext YAML header delimited by `---` lines.
///
/// `comment` is the line comment prefix the header is wrapped in (`"#"` for
/// scripts), or `None` for markdown documents. Input without a complete
/// header is returned unchanged.
pub(crate) fn strip_yaml_header<'a>(lines: &'a [&'a str], comment: Option<&str>) -> &'a [&'a str] {
    let uncomment = |line: &str| -> String {
        let line = line.trim_end();
        match comment {
            Some(prefix) => line
                .strip_prefix(prefix)
                .map(|rest| rest.trim_start().to_string())
                .unwrap_or_else(|| line.to_string()),
            None => line.to_string(),
        }
    };

    let first = match lines.iter().position(|l| !l.trim().is_empty()) {
        Some(i) => i,
        None => return lines,
    };
    if uncomment(lines[first]) != "---" {
        return lines;
    }

    for (offset, line) in lines[first + 1..].iter().enumerate() {
        if comment.is_some_and(|prefix| !line.trim_start().starts_with(prefix)) {
            return lines;
        }
        if uncomment(line) == "---" {
            return &lines[first + offset + 2..];
        }
    }
    lines
}

/// Trim blank lines at both ends of a block.
pub(crate) fn trim_blank_lines<'a>(lines: &'a [&'a str]) -> &'a [&'a str] {
    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(start, |i| i + 1);
    &lines[start..end]
}
