//! Per-cell measurements.

use serde::{Deserialize, Serialize};

use crate::model::{Cell, CellType, Notebook};

/// Character width of a rendered markdown line, used for screen lines.
pub const DEFAULT_SCREEN_WIDTH: usize = 160;

/// Derived metrics for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMetrics {
    /// Markdown or code
    pub cell_type: CellType,

    /// Number of source lines
    pub line_count: usize,

    /// Whitespace-delimited words (markdown only)
    pub word_count: usize,

    /// Lines after wrapping at the screen width; blank lines take no space
    pub screen_lines: usize,
}

/// Measure a single cell.
pub fn measure_cell(cell: &Cell, screen_width: usize) -> CellMetrics {
    CellMetrics {
        cell_type: cell.cell_type,
        line_count: cell.line_count(),
        word_count: cell.word_count(),
        screen_lines: screen_lines(&cell.lines, screen_width),
    }
}

/// Measure every cell of a notebook, in order.
pub fn measure_notebook(notebook: &Notebook, screen_width: usize) -> Vec<CellMetrics> {
    notebook
        .cells
        .iter()
        .map(|cell| measure_cell(cell, screen_width))
        .collect()
}

/// Count the screen lines a block of text occupies when words wrap at `width`.
pub fn screen_lines(lines: &[String], width: usize) -> usize {
    lines.iter().map(|line| wrapped_line_count(line, width)).sum()
}

/// Greedy word wrap; words longer than the width are broken across lines.
fn wrapped_line_count(line: &str, width: usize) -> usize {
    let width = width.max(1);
    let mut count = 0;
    let mut current = 0;

    for word in line.split_whitespace() {
        let len = word.chars().count();
        if current > 0 && current + 1 + len <= width {
            current += 1 + len;
            continue;
        }
        // Start a new line, splitting an over-long word into full-width pieces.
        count += len.div_ceil(width);
        current = match len % width {
            0 => width,
            rest => rest,
        };
    }
    count
}

/// Blank, comment and code line counts for code cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLineSummary {
    /// Empty or whitespace-only lines
    pub blank: usize,

    /// Lines starting with `#`
    pub comment: usize,

    /// Everything else
    pub code: usize,
}

impl CodeLineSummary {
    /// Summarise the lines of one cell; markdown cells contribute nothing.
    pub fn from_cell(cell: &Cell) -> Self {
        let mut summary = Self::default();
        if cell.is_code() {
            summary.add_lines(&cell.lines);
        }
        summary
    }

    /// Summarise all code cells of a notebook.
    pub fn from_notebook(notebook: &Notebook) -> Self {
        let mut summary = Self::default();
        for cell in notebook.code_cells() {
            summary.add_lines(&cell.lines);
        }
        summary
    }

    fn add_lines(&mut self, lines: &[String]) {
        for line in lines {
            self.add_line(line);
        }
    }

    /// Classify one line.
    pub(crate) fn add_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.blank += 1;
        } else if trimmed.starts_with('#') {
            self.comment += 1;
        } else {
            self.code += 1;
        }
    }

    /// Add another summary into this one.
    pub fn merge(&mut self, other: &CodeLineSummary) {
        self.blank += other.blank;
        self.comment += other.comment;
        self.code += other.code;
    }

    /// Total number of lines.
    pub fn total(&self) -> usize {
        self.blank + self.comment + self.code
    }
}
