//! Jupyter notebook JSON parser using serde.

use serde::Deserialize;

use crate::detect::NotebookFormat;
use crate::error::{Error, Result};
use crate::model::{Cell, CellType, Notebook, NotebookMetadata};

/// Minimal nbformat document: only the fields profiling reads.
#[derive(Debug, Deserialize)]
struct RawNotebook {
    cells: Vec<RawCell>,
    #[serde(default)]
    metadata: RawMetadata,
    #[serde(default)]
    nbformat: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    #[serde(default)]
    cell_type: String,
    #[serde(default)]
    source: RawSource,
}

/// Source is either one string or a list of line strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSource {
    Text(String),
    Lines(Vec<String>),
}

impl Default for RawSource {
    fn default() -> Self {
        RawSource::Text(String::new())
    }
}

impl RawSource {
    fn into_text(self) -> String {
        match self {
            RawSource::Text(s) => s,
            RawSource::Lines(lines) => lines.concat(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    kernelspec: Option<RawKernelspec>,
    #[serde(default)]
    language_info: Option<RawLanguageInfo>,
}

#[derive(Debug, Deserialize)]
struct RawKernelspec {
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLanguageInfo {
    #[serde(default)]
    name: Option<String>,
}

/// Parse notebook JSON into a [`Notebook`].
///
/// Fails with [`Error::Parse`] when the JSON is malformed or has no `cells`
/// array. Cell tags other than `markdown` are treated as code.
///
/// # Example
///
/// ```
/// use nbprofile::parser::parse_ipynb;
///
/// let nb = parse_ipynb(r#"{"cells": [{"cell_type": "code", "source": "x = 1"}]}"#).unwrap();
/// assert_eq!(nb.cell_count(), 1);
/// ```
pub fn parse_ipynb(content: &str) -> Result<Notebook> {
    let raw: RawNotebook = serde_json::from_str(content)
        .map_err(|e| Error::Parse(format!("invalid notebook JSON: {}", e)))?;

    let language = raw
        .metadata
        .kernelspec
        .and_then(|k| k.language)
        .or_else(|| raw.metadata.language_info.and_then(|l| l.name));

    let cells = raw
        .cells
        .into_iter()
        .map(|cell| Cell::new(CellType::from_tag(&cell.cell_type), &cell.source.into_text()))
        .collect();

    Ok(Notebook {
        metadata: NotebookMetadata {
            language,
            nbformat: raw.nbformat,
            ..NotebookMetadata::with_format(NotebookFormat::Ipynb)
        },
        cells,
    })
}
