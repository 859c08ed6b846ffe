//! Notebook-level types.

use super::{Cell, CellType};
use crate::detect::NotebookFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A loaded notebook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Notebook {
    /// Where the notebook came from and how it was stored
    pub metadata: NotebookMetadata,

    /// Cells in document order
    pub cells: Vec<Cell>,
}

impl Notebook {
    /// Create a new empty notebook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a notebook from a list of cells.
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self {
            metadata: NotebookMetadata::default(),
            cells,
        }
    }

    /// Get the number of cells in the notebook.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Add a cell to the end of the notebook.
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Check if the notebook has any cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over cells of one type.
    pub fn cells_of(&self, cell_type: CellType) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(move |c| c.cell_type == cell_type)
    }

    /// Iterate over markdown cells.
    pub fn markdown_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells_of(CellType::Markdown)
    }

    /// Iterate over code cells.
    pub fn code_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells_of(CellType::Code)
    }

    /// Concatenated markdown source, one blank line between cells.
    pub fn markdown_text(&self) -> String {
        self.markdown_cells()
            .map(|cell| cell.source())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Label used in reports and chart rows.
    pub fn display_name(&self) -> String {
        self.metadata
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<notebook>".to_string())
    }
}

/// Notebook metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotebookMetadata {
    /// Source file path
    pub path: Option<PathBuf>,

    /// Format the notebook was read from
    pub format: Option<NotebookFormat>,

    /// Kernel language (e.g., "python")
    pub language: Option<String>,

    /// nbformat major version, for `.ipynb` sources
    pub nbformat: Option<u32>,
}

impl NotebookMetadata {
    /// Create metadata for a notebook read in the given format.
    pub fn with_format(format: NotebookFormat) -> Self {
        Self {
            format: Some(format),
            ..Default::default()
        }
    }
}
