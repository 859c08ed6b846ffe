//! Native `.ipynb` reader.

use crate::error::Result;
use crate::model::Notebook;
use crate::parser::parse_ipynb;

use super::NotebookReader;

/// Jupyter notebook JSON reader.
#[derive(Debug, Clone, Default)]
pub struct IpynbReader {
    _private: (),
}

impl IpynbReader {
    /// Create a new ipynb reader.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl NotebookReader for IpynbReader {
    fn supported_extensions(&self) -> &[&str] {
        &["ipynb"]
    }

    fn name(&self) -> &str {
        "ipynb"
    }

    fn is_text_format(&self) -> bool {
        false
    }

    fn read_str(&self, content: &str) -> Result<Notebook> {
        parse_ipynb(content)
    }
}
