//! Rendering module: the notebook chart and text/JSON reports.

mod chart;
mod color;
mod json;
mod options;
mod text;

pub use chart::{
    band_length, cell_color, draw_chart, layout_chart, render_notebooks, Band, BandKind,
    ChartLayout, Row,
};
pub use color::Color;
pub use json::{to_json, JsonFormat};
pub use options::{BandMeasure, ChartOptions, DEFAULT_CHART_FILE};
pub use text::{imports_to_text, summary_to_text, text_analysis_to_text};
