//! Notebook loading module.

mod ipynb;
mod loader;
mod options;

pub use ipynb::parse_ipynb;
pub use loader::NotebookLoader;
pub use options::{LoadOptions, DEFAULT_EXCLUDE_DIRS};
