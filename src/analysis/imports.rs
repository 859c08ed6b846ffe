//! Import statement extraction from code cells.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::model::{Cell, Notebook};

/// `import a, b.c as d`
static IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*import\s+([^#;]+)").expect("valid import regex"));

/// `from a.b import c`; relative modules keep their leading dots.
static FROM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*from\s+(\.*[\w.]*)\s+import\b").expect("valid from regex"));

/// Unique top-level package names, in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl ImportSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a package name; returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.names.push(name);
        true
    }

    /// Check if a package name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Number of unique names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no imports were found.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate in order of first occurrence.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Add the imports of every code cell in `cells`.
    pub fn extend_from_cells<'a, I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        for cell in cells.into_iter().filter(|c| c.is_code()) {
            for line in &cell.lines {
                for name in imported_packages(line) {
                    self.insert(name);
                }
            }
        }
    }

    /// Names as a vector, in order of first occurrence.
    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl Serialize for ImportSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.names.serialize(serializer)
    }
}

/// Collect the imports of a sequence of cells.
///
/// # Example
///
/// ```
/// use nbprofile::model::Cell;
/// use nbprofile::analysis::extract_imports;
///
/// let cells = [Cell::code("import pandas as pd\nfrom os import path")];
/// let imports = extract_imports(&cells);
/// assert!(imports.contains("pandas"));
/// assert!(imports.contains("os"));
/// ```
pub fn extract_imports<'a, I>(cells: I) -> ImportSet
where
    I: IntoIterator<Item = &'a Cell>,
{
    let mut set = ImportSet::new();
    set.extend_from_cells(cells);
    set
}

/// Collect the imports of several notebooks into one set.
pub fn notebook_imports(notebooks: &[Notebook]) -> ImportSet {
    let mut set = ImportSet::new();
    for notebook in notebooks {
        set.extend_from_cells(&notebook.cells);
    }
    set
}

/// Top-level packages introduced by one source line.
pub fn imported_packages(line: &str) -> Vec<String> {
    if let Some(caps) = FROM_RE.captures(line) {
        let module = &caps[1];
        if module.starts_with('.') {
            return Vec::new();
        }
        return root_package(module).into_iter().collect();
    }

    if let Some(caps) = IMPORT_RE.captures(line) {
        return caps[1]
            .split(',')
            .filter_map(|item| item.split_whitespace().next())
            .filter_map(root_package)
            .collect();
    }

    Vec::new()
}

/// `a.b.c` -> `a`, if `a` is a valid identifier.
fn root_package(module: &str) -> Option<String> {
    let root = module.split('.').next()?.trim();
    let mut chars = root.chars();
    let first = chars.next()?;
    let valid = (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_');
    valid.then(|| root.to_string())
}
