//! Markdown text notebook reader (`.md`, `.Rmd`).

use crate::detect::NotebookFormat;
use crate::error::Result;
use crate::model::{Cell, CellType, Notebook, NotebookMetadata};

use super::{strip_yaml_header, trim_blank_lines, NotebookReader};

/// Reader for markdown documents stored as text notebooks.
///
/// Fenced blocks that name a language (```` ```python ````, ```` ```{r} ````)
/// are code cells; everything between them is markdown. Fences without a
/// language stay inside the surrounding markdown cell.
#[derive(Debug, Clone, Default)]
pub struct MarkdownReader {
    _private: (),
}

impl MarkdownReader {
    /// Create a new markdown reader.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl NotebookReader for MarkdownReader {
    fn supported_extensions(&self) -> &[&str] {
        &["md", "markdown", "rmd"]
    }

    fn name(&self) -> &str {
        "markdown"
    }

    fn read_str(&self, content: &str) -> Result<Notebook> {
        let lines: Vec<&str> = content.lines().collect();
        let body = strip_yaml_header(&lines, None);

        Ok(Notebook {
            metadata: NotebookMetadata {
                language: first_code_language(body),
                ..NotebookMetadata::with_format(NotebookFormat::Markdown)
            },
            cells: read_markdown(body),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fence {
    /// Outside any fenced block
    None,
    /// Inside a fenced code cell opened by the marker
    Code(&'static str),
    /// Inside a fence without language, kept as markdown
    Plain(&'static str),
}

/// Split a fence opening line into its marker and info string.
fn fence_open(line: &str) -> Option<(&'static str, &str)> {
    let trimmed = line.trim_start();
    ["```", "~~~"]
        .into_iter()
        .find_map(|marker| trimmed.strip_prefix(marker).map(|info| (marker, info.trim())))
}

fn is_fence_close(line: &str, marker: &str) -> bool {
    line.trim_start()
        .strip_prefix(marker)
        .is_some_and(|rest| rest.trim().is_empty())
}

/// Language named by a fence info string (`python`, `{r setup}` -> `r`).
fn fence_language(info: &str) -> Option<String> {
    let info = info.trim_start_matches('{');
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '}')
        .next()
        .filter(|lang| !lang.is_empty())
        .map(str::to_lowercase)
}

fn first_code_language(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .filter_map(|line| fence_open(line))
        .find_map(|(_, info)| fence_language(info))
}

fn read_markdown(lines: &[&str]) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    let mut fence = Fence::None;

    for &line in lines {
        match fence {
            Fence::None => match fence_open(line) {
                Some((marker, info)) if fence_language(info).is_some() => {
                    flush_markdown(&block, &mut cells);
                    block.clear();
                    fence = Fence::Code(marker);
                }
                Some((marker, _)) => {
                    block.push(line);
                    fence = Fence::Plain(marker);
                }
                None => block.push(line),
            },
            Fence::Code(marker) => {
                if is_fence_close(line, marker) {
                    cells.push(Cell::from_lines(CellType::Code, block.drain(..)));
                    fence = Fence::None;
                } else {
                    block.push(line);
                }
            }
            Fence::Plain(marker) => {
                block.push(line);
                if is_fence_close(line, marker) {
                    fence = Fence::None;
                }
            }
        }
    }

    match fence {
        // An unterminated code fence runs to the end of the document.
        Fence::Code(_) => cells.push(Cell::from_lines(CellType::Code, block.drain(..))),
        Fence::None | Fence::Plain(_) => flush_markdown(&block, &mut cells),
    }

    cells
}

fn flush_markdown(block: &[&str], cells: &mut Vec<Cell>) {
    let body = trim_blank_lines(block);
    if !body.is_empty() {
        cells.push(Cell::from_lines(CellType::Markdown, body.iter().copied()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_notebook() {
        let src = "\
---
jupyter:
  kernelspec:
    language: python
---

# Title

Some text.

```python
import numpy as np
x = np.arange(3)
```

Closing words.
";
        let nb = MarkdownReader::new().read_str(src).unwrap();
        assert_eq!(nb.metadata.format, Some(NotebookFormat::Markdown));
        assert_eq!(nb.metadata.language.as_deref(), Some("python"));
        assert_eq!(nb.cell_count(), 3);
        assert_eq!(nb.cells[0].lines, vec!["# Title", "", "Some text."]);
        assert!(nb.cells[1].is_code());
        assert_eq!(nb.cells[1].line_count(), 2);
        assert_eq!(nb.cells[2].lines, vec!["Closing words."]);
    }

    #[test]
    fn test_plain_fence_stays_markdown() {
        let src = "Intro\n\n```\nnot a cell\n```\n\nAfter\n";
        let nb = MarkdownReader::new().read_str(src).unwrap();
        assert_eq!(nb.cell_count(), 1);
        assert!(nb.cells[0].is_markdown());
        assert_eq!(nb.cells[0].line_count(), 7);
    }

    #[test]
    fn test_rmd_chunk() {
        let src = "Text\n\n```{r setup, echo=FALSE}\nlibrary(dplyr)\n```\n";
        let nb = MarkdownReader::new().read_str(src).unwrap();
        assert_eq!(nb.cell_count(), 2);
        assert_eq!(nb.metadata.language.as_deref(), Some("r"));
        assert_eq!(nb.cells[1].lines, vec!["library(dplyr)"]);
    }

    #[test]
    fn test_empty_code_fence_is_a_cell() {
        let src = "```python\n```\n";
        let nb = MarkdownReader::new().read_str(src).unwrap();
        assert_eq!(nb.cell_count(), 1);
        assert!(nb.cells[0].is_empty());
    }

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("python"), Some("python".to_string()));
        assert_eq!(fence_language("{r chunk}"), Some("r".to_string()));
        assert_eq!(fence_language(""), None);
    }
}
