//! # nbprofile
//!
//! Structural profiling for Jupyter notebooks.
//!
//! This library loads `.ipynb` notebooks (and Jupytext text notebooks) and
//! reports simple metrics: relative cell lengths as a banded chart, the
//! markdown-vs-code balance, imported packages, and an estimated reading
//! time for the markdown content.
//!
//! ## Quick Start
//!
//! ```no_run
//! use nbprofile::{render_chart, ChartOptions};
//!
//! fn main() -> nbprofile::Result<()> {
//!     // One chart row per notebook found under the directory
//!     let options = ChartOptions::new().with_output("review.png");
//!     render_chart("notebooks/", &options)?;
//!
//!     let imports = nbprofile::imports("notebooks/")?;
//!     for name in imports.iter() {
//!         println!("{}", name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Notebook formats**: `.ipynb`, percent and light Python scripts, Markdown/R Markdown
//! - **Chart**: one row per notebook, one band per cell, PNG output
//! - **Imports**: top-level packages from `import` and `from ... import` lines
//! - **Reading time**: markdown word counts at a configurable rate, plus an
//!   optional overhead per line of code in markdown code blocks
//! - **Markdown features**: headings, paragraphs and fenced code blocks
//! - **Text statistics**: sentence counts and readability scores

pub mod analysis;
pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analysis::{
    CodeLineSummary, ImportSet, MarkdownFeatures, Minutes, NotebookSummary, ReadingOptions,
    ReadingTimeReport, TextAnalysis, TextStats,
};
pub use convert::{NotebookReader, ReaderRegistry};
pub use detect::{detect_format_from_path, is_ipynb, NotebookFormat};
pub use error::{Error, Result};
pub use model::{Cell, CellType, Notebook, NotebookMetadata};
pub use parser::{parse_ipynb, LoadOptions, NotebookLoader};
pub use render::{BandMeasure, ChartLayout, ChartOptions, Color, JsonFormat};

use std::path::Path;

/// Load every notebook at a path.
///
/// A file yields one notebook; a directory yields every notebook below it
/// in sorted path order. Text formats are enabled.
///
/// # Example
///
/// ```no_run
/// let notebooks = nbprofile::load("analysis.ipynb").unwrap();
/// println!("Cells: {}", notebooks[0].cell_count());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Notebook>> {
    NotebookLoader::new().load(path)
}

/// Load notebooks with custom options.
///
/// # Example
///
/// ```no_run
/// use nbprofile::{load_with_options, LoadOptions};
///
/// let options = LoadOptions::new().ipynb_only().with_recursive(false);
/// let notebooks = load_with_options("notebooks/", options).unwrap();
/// ```
pub fn load_with_options<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Vec<Notebook>> {
    NotebookLoader::with_options(options).load(path)
}

/// Render the chart for the notebooks at `path` to `options.output_path`.
///
/// Options are checked before anything is loaded or written.
///
/// # Example
///
/// ```no_run
/// use nbprofile::{render_chart, ChartOptions, Color};
///
/// let options = ChartOptions::new()
///     .with_gap(0.0)
///     .with_gap_color(Some(Color::WHITE))
///     .with_output("chart.png");
/// let layout = render_chart("analysis.ipynb", &options).unwrap();
/// println!("Rows: {}", layout.rows.len());
/// ```
pub fn render_chart<P: AsRef<Path>>(path: P, options: &ChartOptions) -> Result<ChartLayout> {
    options.validate()?;
    let notebooks = load(path)?;
    render::render_notebooks(&notebooks, options)
}

/// Unique top-level packages imported by the notebooks at `path`.
pub fn imports<P: AsRef<Path>>(path: P) -> Result<ImportSet> {
    let notebooks = load(path)?;
    Ok(analysis::notebook_imports(&notebooks))
}

/// Reading time for the markdown of the notebooks at `path`.
///
/// # Example
///
/// ```no_run
/// use nbprofile::{reading_time, ReadingOptions};
///
/// let options = ReadingOptions::new().with_rate(200).with_rounded_minutes(true);
/// let report = reading_time("analysis.ipynb", &options).unwrap();
/// println!("{} min", report.minutes);
/// ```
pub fn reading_time<P: AsRef<Path>>(path: P, options: &ReadingOptions) -> Result<ReadingTimeReport> {
    options.validate()?;
    let notebooks = load(path)?;
    let cells = notebooks.iter().flat_map(|nb| nb.cells.iter());
    analysis::estimate_reading_time(cells, options)
}

/// Builder for loading and profiling notebooks in one pass.
///
/// # Example
///
/// ```no_run
/// use nbprofile::Profiler;
///
/// let profile = Profiler::new()
///     .ipynb_only()
///     .with_reading_rate(150)
///     .profile("notebooks/")?;
/// println!("{} notebooks, {} imports", profile.notebooks.len(), profile.imports.len());
/// # Ok::<(), nbprofile::Error>(())
/// ```
pub struct Profiler {
    load_options: LoadOptions,
    reading_options: ReadingOptions,
}

impl Profiler {
    /// Create a new profiler with default options.
    pub fn new() -> Self {
        Self {
            load_options: LoadOptions::default(),
            reading_options: ReadingOptions::default(),
        }
    }

    /// Only load `.ipynb` files.
    pub fn ipynb_only(mut self) -> Self {
        self.load_options = self.load_options.ipynb_only();
        self
    }

    /// Enable or disable Jupytext text formats.
    pub fn with_text_formats(mut self, enabled: bool) -> Self {
        self.load_options = self.load_options.with_text_formats(enabled);
        self
    }

    /// Replace the load options.
    pub fn with_load_options(mut self, options: LoadOptions) -> Self {
        self.load_options = options;
        self
    }

    /// Set the reading rate in words per minute.
    pub fn with_reading_rate(mut self, rate_wpm: i64) -> Self {
        self.reading_options = self.reading_options.with_rate(rate_wpm);
        self
    }

    /// Round reading time up to whole minutes.
    pub fn with_rounded_minutes(mut self, rounded: bool) -> Self {
        self.reading_options = self.reading_options.with_rounded_minutes(rounded);
        self
    }

    /// Add reading time for each line of code in markdown code blocks.
    pub fn with_code_line_seconds(mut self, seconds: f64) -> Self {
        self.reading_options = self.reading_options.with_code_line_seconds(seconds);
        self
    }

    /// Load the notebooks at `path` and compute every report.
    pub fn profile<P: AsRef<Path>>(self, path: P) -> Result<ProfileResult> {
        self.reading_options.validate()?;
        let notebooks = load_with_options(path, self.load_options)?;
        Self::profile_notebooks(notebooks, &self.reading_options)
    }

    /// Compute every report for already loaded notebooks.
    pub fn profile_notebooks(
        notebooks: Vec<Notebook>,
        reading_options: &ReadingOptions,
    ) -> Result<ProfileResult> {
        let text = analysis::analyze_text(&notebooks, reading_options)?;
        let summaries = notebooks.iter().map(NotebookSummary::from_notebook).collect();
        let total = NotebookSummary::total(&notebooks);
        let imports = analysis::notebook_imports(&notebooks);

        Ok(ProfileResult {
            notebooks,
            summaries,
            total,
            imports,
            text,
        })
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Every report for a set of notebooks.
#[derive(Debug, Clone)]
pub struct ProfileResult {
    /// The loaded notebooks
    pub notebooks: Vec<Notebook>,
    /// One summary per notebook, in load order
    pub summaries: Vec<NotebookSummary>,
    /// All notebooks merged
    pub total: NotebookSummary,
    pub imports: ImportSet,
    /// Reading time and text statistics
    pub text: TextAnalysis,
}

impl ProfileResult {
    /// Render the chart of the profiled notebooks.
    pub fn render_chart(&self, options: &ChartOptions) -> Result<ChartLayout> {
        render::render_notebooks(&self.notebooks, options)
    }

    /// Text report of the per-notebook summaries.
    pub fn to_text(&self) -> String {
        self.summaries
            .iter()
            .map(render::summary_to_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
