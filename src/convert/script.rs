//! Python script reader for the percent and light text notebook formats.

use crate::detect::{is_percent_script, NotebookFormat, PERCENT_MARKER};
use crate::error::Result;
use crate::model::{Cell, CellType, Notebook, NotebookMetadata};

use super::{strip_yaml_header, trim_blank_lines, NotebookReader};

/// Opens an explicit code cell in the light format.
const LIGHT_CELL_START: &str = "# +";

/// Closes an explicit code cell in the light format.
const LIGHT_CELL_END: &str = "# -";

/// Reader for Python scripts stored as text notebooks.
///
/// Scripts containing `# %%` markers are read as percent notebooks; any
/// other script is read as a light notebook, where paragraphs made only of
/// comments are markdown cells.
#[derive(Debug, Clone, Default)]
pub struct ScriptReader {
    _private: (),
}

impl ScriptReader {
    /// Create a new script reader.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl NotebookReader for ScriptReader {
    fn supported_extensions(&self) -> &[&str] {
        &["py"]
    }

    fn name(&self) -> &str {
        "script"
    }

    fn read_str(&self, content: &str) -> Result<Notebook> {
        let lines: Vec<&str> = content.lines().collect();
        let body = strip_yaml_header(&lines, Some("#"));

        let (format, cells) = if is_percent_script(content) {
            (NotebookFormat::PercentScript, read_percent(body))
        } else {
            (NotebookFormat::LightScript, read_light(body))
        };

        Ok(Notebook {
            metadata: NotebookMetadata {
                language: Some("python".to_string()),
                ..NotebookMetadata::with_format(format)
            },
            cells,
        })
    }
}

/// Remove one level of `#` commenting from a markdown line.
fn uncomment(line: &str) -> &str {
    let trimmed = line.trim_start();
    trimmed
        .strip_prefix("# ")
        .or_else(|| trimmed.strip_prefix('#'))
        .unwrap_or(line)
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn percent_cell_type(marker_rest: &str) -> CellType {
    if marker_rest.contains("[markdown]") || marker_rest.contains("[md]") {
        CellType::Markdown
    } else {
        CellType::Code
    }
}

fn read_percent(lines: &[&str]) -> Vec<Cell> {
    let mut cells = Vec::new();
    // None until the first marker: text before it is a preamble.
    let mut current: Option<CellType> = None;
    let mut block: Vec<&str> = Vec::new();

    for &line in lines {
        if let Some(rest) = line.trim_start().strip_prefix(PERCENT_MARKER) {
            flush_percent(current, &block, &mut cells);
            block.clear();
            current = Some(percent_cell_type(rest));
        } else {
            block.push(line);
        }
    }
    flush_percent(current, &block, &mut cells);

    cells
}

fn flush_percent(kind: Option<CellType>, block: &[&str], cells: &mut Vec<Cell>) {
    let body = trim_blank_lines(block);
    match kind {
        None if body.is_empty() => {}
        None | Some(CellType::Code) => {
            cells.push(Cell::from_lines(CellType::Code, body.iter().copied()));
        }
        Some(CellType::Markdown) => {
            cells.push(Cell::from_lines(
                CellType::Markdown,
                body.iter().map(|l| uncomment(l)),
            ));
        }
    }
}

fn read_light(lines: &[&str]) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    let mut blanks = 0usize;
    let mut iter = lines.iter().copied();

    while let Some(line) = iter.next() {
        let trimmed = line.trim();

        if trimmed == LIGHT_CELL_START || trimmed.starts_with("# + ") {
            flush_light(&mut block, &mut cells);
            blanks = 0;
            let mut explicit: Vec<&str> = Vec::new();
            for inner in iter.by_ref() {
                if inner.trim() == LIGHT_CELL_END {
                    break;
                }
                explicit.push(inner);
            }
            cells.push(Cell::from_lines(
                CellType::Code,
                trim_blank_lines(&explicit).iter().copied(),
            ));
            continue;
        }

        if trimmed.is_empty() {
            if !block.is_empty() {
                blanks += 1;
            }
            continue;
        }

        if blanks > 0 {
            // Indented code after a blank line still belongs to the open block.
            let continues = line.starts_with([' ', '\t'])
                && !block.is_empty()
                && !block.iter().all(|l| is_comment(l));
            if continues {
                block.extend(std::iter::repeat("").take(blanks));
            } else {
                flush_light(&mut block, &mut cells);
            }
            blanks = 0;
        }
        block.push(line);
    }
    flush_light(&mut block, &mut cells);

    cells
}

fn flush_light(block: &mut Vec<&str>, cells: &mut Vec<Cell>) {
    if block.is_empty() {
        return;
    }
    if block.iter().all(|l| is_comment(l)) {
        cells.push(Cell::from_lines(
            CellType::Markdown,
            block.iter().map(|l| uncomment(l)),
        ));
    } else {
        cells.push(Cell::from_lines(CellType::Code, block.iter().copied()));
    }
    block.clear();
}
