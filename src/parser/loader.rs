//! Notebook loading from files and directories.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use crate::convert::{NotebookReader, ReaderRegistry};
use crate::detect::extension_of;
use crate::error::{Error, Result};
use crate::model::Notebook;

use super::options::LoadOptions;

/// Loads notebooks from a file or a directory tree.
pub struct NotebookLoader {
    registry: ReaderRegistry,
    options: LoadOptions,
}

impl NotebookLoader {
    /// Create a loader with default options.
    pub fn new() -> Self {
        Self::with_options(LoadOptions::default())
    }

    /// Create a loader with custom options.
    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            registry: ReaderRegistry::with_defaults(),
            options,
        }
    }

    /// Replace the reader registry.
    pub fn with_registry(mut self, registry: ReaderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Loader options.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load every notebook found at `path`.
    ///
    /// A file yields exactly one notebook. A directory yields one notebook
    /// per readable file below it, in sorted path order.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Notebook>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        if path.is_dir() {
            self.discover(path)?
                .iter()
                .map(|file| self.load_file(file))
                .collect()
        } else {
            Ok(vec![self.load_file(path)?])
        }
    }

    /// Load a single notebook file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<Notebook> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let reader = self.reader_for(path)?;
        log::debug!("Loading {} with the {} reader", path.display(), reader.name());
        reader.read(path)
    }

    /// List the files under `dir` that this loader can read.
    pub fn discover<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let max_depth = if self.options.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        let walker = WalkDir::new(dir.as_ref())
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !self
                        .options
                        .is_excluded(&entry.file_name().to_string_lossy())
            });

        for entry in walker {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if self.reader_for(entry.path()).is_ok() {
                files.push(entry.into_path());
            } else {
                log::trace!("Skipping {}", entry.path().display());
            }
        }

        log::debug!("Found {} notebooks", files.len());
        Ok(files)
    }

    /// Pick the reader for a path, honouring the text format switch.
    fn reader_for(&self, path: &Path) -> Result<Arc<dyn NotebookReader>> {
        let ext = extension_of(path)?;
        let reader = self.registry.get_by_extension(&ext).ok_or_else(|| {
            Error::UnsupportedFormat(format!("no notebook reader for .{} files", ext))
        })?;

        if reader.is_text_format() && !self.options.text_formats {
            return Err(Error::UnsupportedFormat(format!(
                "{} is a text notebook and text formats are disabled",
                path.display()
            )));
        }
        Ok(reader)
    }
}

impl Default for NotebookLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const NOTEBOOK: &str = r##"{"cells": [
        {"cell_type": "markdown", "source": "# Title"},
        {"cell_type": "code", "source": ["import os\n", "print(os.sep)"]}
    ]}"##;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_single_notebook() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "a.ipynb", NOTEBOOK);

        let notebooks = NotebookLoader::new().load(&path).unwrap();
        assert_eq!(notebooks.len(), 1);
        assert_eq!(notebooks[0].cell_count(), 2);
        assert_eq!(notebooks[0].metadata.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_path() {
        let result = NotebookLoader::new().load("no/such/notebook.ipynb");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_text_format_disabled() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "script.py", "import os\n");

        let loader = NotebookLoader::with_options(LoadOptions::new().ipynb_only());
        let result = loader.load(&path);
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));

        let notebooks = NotebookLoader::new().load(&path).unwrap();
        assert_eq!(notebooks[0].cell_count(), 1);
    }

    #[test]
    fn test_unknown_extension() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "data.csv", "a,b\n");
        let result = NotebookLoader::new().load(&path);
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_discover_directory() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.ipynb", NOTEBOOK);
        write(tmp.path(), "a.ipynb", NOTEBOOK);
        write(tmp.path(), "notes.md", "# Notes\n");
        write(tmp.path(), "data.csv", "a,b\n");
        write(tmp.path(), "sub/c.ipynb", NOTEBOOK);
        write(tmp.path(), ".ipynb_checkpoints/a-checkpoint.ipynb", NOTEBOOK);

        let loader = NotebookLoader::with_options(LoadOptions::new().ipynb_only());
        let files = loader.discover(tmp.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(tmp.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(names, vec!["a.ipynb", "b.ipynb", "sub/c.ipynb"]);

        let all = NotebookLoader::new().discover(tmp.path()).unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_discover_non_recursive() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.ipynb", NOTEBOOK);
        write(tmp.path(), "sub/c.ipynb", NOTEBOOK);

        let loader = NotebookLoader::with_options(LoadOptions::new().with_recursive(false));
        assert_eq!(loader.discover(tmp.path()).unwrap().len(), 1);
    }

    #[test]
    fn test_load_directory_aborts_on_bad_notebook() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.ipynb", NOTEBOOK);
        write(tmp.path(), "b.ipynb", "{ broken");

        let result = NotebookLoader::new().load(tmp.path());
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
