//! Structural features of markdown cells: headings, paragraphs and fenced
//! code blocks.

use serde::{Deserialize, Serialize};

use super::measure::CodeLineSummary;
use crate::model::{Cell, Notebook};

const FENCE: &str = "```";

/// Headings, paragraphs and fenced code found in markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownFeatures {
    /// Lines starting with `#` outside code blocks
    pub headings: usize,

    /// Runs of consecutive prose lines outside code blocks
    pub paragraphs: usize,

    /// Fenced code blocks opened with a backtick fence
    pub code_blocks: usize,

    /// Lines inside code blocks, fences excluded
    pub code_block_lines: CodeLineSummary,
}

impl MarkdownFeatures {
    /// Features of one markdown cell; code cells have none.
    pub fn from_cell(cell: &Cell) -> Self {
        if cell.is_markdown() {
            Self::from_lines(cell.lines.iter().map(String::as_str))
        } else {
            Self::default()
        }
    }

    /// Features of every markdown cell of a notebook.
    ///
    /// Each cell is scanned on its own, so an unclosed fence ends with its cell.
    pub fn from_notebook(notebook: &Notebook) -> Self {
        notebook.markdown_cells().fold(Self::default(), |mut acc, cell| {
            acc.merge(&Self::from_cell(cell));
            acc
        })
    }

    /// Scan markdown source lines.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut features = Self::default();
        let mut in_code_block = false;
        let mut in_paragraph = false;

        for line in lines {
            if line.trim_start().starts_with(FENCE) {
                in_code_block = !in_code_block;
                if in_code_block {
                    features.code_blocks += 1;
                }
                in_paragraph = false;
            } else if in_code_block {
                features.code_block_lines.add_line(line);
            } else if line.starts_with('#') {
                features.headings += 1;
                in_paragraph = false;
            } else if line.trim().is_empty() {
                in_paragraph = false;
            } else if !in_paragraph {
                features.paragraphs += 1;
                in_paragraph = true;
            }
        }
        features
    }

    /// Lines that cost reading time: code and comment lines in code blocks.
    pub fn readable_code_lines(&self) -> usize {
        self.code_block_lines.code + self.code_block_lines.comment
    }

    /// Add another cell's features into this one.
    pub fn merge(&mut self, other: &MarkdownFeatures) {
        self.headings += other.headings;
        self.paragraphs += other.paragraphs;
        self.code_blocks += other.code_blocks;
        self.code_block_lines.merge(&other.code_block_lines);
    }
}
