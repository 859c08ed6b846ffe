//! Per-notebook structural summaries.

use serde::{Deserialize, Serialize};

use super::markdown_features::MarkdownFeatures;
use super::measure::CodeLineSummary;
use crate::model::Notebook;

/// Cell and line totals for one notebook, or several merged together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotebookSummary {
    /// Notebook label, `None` for merged totals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub markdown_cells: usize,
    pub code_cells: usize,
    pub markdown_lines: usize,
    pub code_lines: usize,
    pub markdown_words: usize,

    /// Breakdown of code cell lines
    pub code_line_summary: CodeLineSummary,

    /// Headings, paragraphs and code blocks in markdown cells
    pub markdown_features: MarkdownFeatures,
}

impl NotebookSummary {
    /// Summarise one notebook.
    pub fn from_notebook(notebook: &Notebook) -> Self {
        let mut summary = Self {
            name: Some(notebook.display_name()),
            code_line_summary: CodeLineSummary::from_notebook(notebook),
            markdown_features: MarkdownFeatures::from_notebook(notebook),
            ..Default::default()
        };

        for cell in &notebook.cells {
            if cell.is_markdown() {
                summary.markdown_cells += 1;
                summary.markdown_lines += cell.line_count();
                summary.markdown_words += cell.word_count();
            } else {
                summary.code_cells += 1;
                summary.code_lines += cell.line_count();
            }
        }
        summary
    }

    /// Total summary over several notebooks.
    pub fn total(notebooks: &[Notebook]) -> Self {
        notebooks.iter().fold(Self::default(), |mut acc, nb| {
            acc.merge(&Self::from_notebook(nb));
            acc
        })
    }

    /// Add another summary's counts into this one. The name is dropped.
    pub fn merge(&mut self, other: &NotebookSummary) {
        self.name = None;
        self.markdown_cells += other.markdown_cells;
        self.code_cells += other.code_cells;
        self.markdown_lines += other.markdown_lines;
        self.code_lines += other.code_lines;
        self.markdown_words += other.markdown_words;
        self.code_line_summary.merge(&other.code_line_summary);
        self.markdown_features.merge(&other.markdown_features);
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.markdown_cells + self.code_cells
    }

    /// Fraction of cells that are markdown; 0 for an empty notebook.
    pub fn markdown_ratio(&self) -> f64 {
        match self.cell_count() {
            0 => 0.0,
            total => self.markdown_cells as f64 / total as f64,
        }
    }
}
