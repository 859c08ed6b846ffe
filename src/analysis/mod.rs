//! Metrics computed over loaded notebooks.

mod imports;
mod markdown_features;
mod measure;
mod reading;
mod summary;
mod text_stats;

pub use imports::{extract_imports, imported_packages, notebook_imports, ImportSet};
pub use markdown_features::MarkdownFeatures;
pub use measure::{
    measure_cell, measure_notebook, screen_lines, CellMetrics, CodeLineSummary,
    DEFAULT_SCREEN_WIDTH,
};
pub use reading::{
    estimate_reading_time, reading_time_for_words, Minutes, ReadingOptions, ReadingTimeReport,
    DEFAULT_READING_RATE,
};
pub use summary::NotebookSummary;
pub use text_stats::{analyze_text, count_syllables, Readability, TextAnalysis, TextStats};
