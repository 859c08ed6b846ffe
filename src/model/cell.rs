//! Cell-level types.

use serde::{Deserialize, Serialize};

/// Kind of a notebook cell.
///
/// Notebooks only distinguish markdown from code for profiling purposes;
/// any other tag found in a file (such as `raw`) is folded into `Code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    /// Markdown (prose) cell
    Markdown,
    /// Code cell
    Code,
}

impl CellType {
    /// Map an nbformat `cell_type` tag onto a cell type.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "markdown" => CellType::Markdown,
            "code" => CellType::Code,
            other => {
                log::debug!("Treating cell type {:?} as code", other);
                CellType::Code
            }
        }
    }

    /// The nbformat tag for this cell type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CellType::Markdown => "markdown",
            CellType::Code => "code",
        }
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single notebook cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Markdown or code
    pub cell_type: CellType,

    /// Source lines, without line terminators
    pub lines: Vec<String>,
}

impl Cell {
    /// Create a cell from its source text.
    pub fn new(cell_type: CellType, source: &str) -> Self {
        Self {
            cell_type,
            lines: source.lines().map(str::to_string).collect(),
        }
    }

    /// Create a cell from already split lines.
    pub fn from_lines<I, S>(cell_type: CellType, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cell_type,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a markdown cell.
    pub fn markdown(source: &str) -> Self {
        Self::new(CellType::Markdown, source)
    }

    /// Create a code cell.
    pub fn code(source: &str) -> Self {
        Self::new(CellType::Code, source)
    }

    /// Check if this is a markdown cell.
    pub fn is_markdown(&self) -> bool {
        self.cell_type == CellType::Markdown
    }

    /// Check if this is a code cell.
    pub fn is_code(&self) -> bool {
        self.cell_type == CellType::Code
    }

    /// Check if the cell has no source.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Source text with lines joined by newlines.
    pub fn source(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of source lines (0 for an empty cell).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whitespace-delimited word count of markdown cells; code cells count 0.
    pub fn word_count(&self) -> usize {
        if !self.is_markdown() {
            return 0;
        }
        self.lines
            .iter()
            .map(|line| line.split_whitespace().count())
            .sum()
    }
}
