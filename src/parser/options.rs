//! Loading options and configuration.

/// Directories never descended into when walking a directory of notebooks.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[".ipynb_checkpoints", ".git", "__MACOSX"];

/// Options for loading notebooks from files and directories.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Read Jupytext-style text notebooks (`.py`, `.md`, `.Rmd`) as well as `.ipynb`
    pub text_formats: bool,

    /// Descend into subdirectories when the input is a directory
    pub recursive: bool,

    /// Directory names skipped while walking
    pub exclude_dirs: Vec<String>,
}

impl LoadOptions {
    /// Create new load options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable text format readers.
    pub fn with_text_formats(mut self, enabled: bool) -> Self {
        self.text_formats = enabled;
        self
    }

    /// Only accept `.ipynb` files.
    pub fn ipynb_only(mut self) -> Self {
        self.text_formats = false;
        self
    }

    /// Enable or disable recursive directory walking.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Replace the list of excluded directory names.
    pub fn with_exclude_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Check if a directory name is excluded from walks.
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == dir_name)
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            text_formats: true,
            recursive: true,
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
