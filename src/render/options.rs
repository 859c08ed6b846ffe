//! Chart options and configuration.

use std::path::PathBuf;

use super::Color;
use crate::analysis::DEFAULT_SCREEN_WIDTH;
use crate::error::{Error, Result};

/// Default chart image file.
pub const DEFAULT_CHART_FILE: &str = "nb_quality_review.png";

/// Options for rendering a notebook chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Gap between bands in length units; `None` picks one from the longest notebook
    pub gap: Option<f64>,

    /// Multiplier applied to the automatic gap
    pub gap_boost: f64,

    /// Gap colour; `None` leaves the gap as background
    pub gap_color: Option<Color>,

    /// Band thickness in pixels
    pub line_width: u32,

    /// Image width in pixels
    pub width: u32,

    /// How band lengths are measured
    pub measure: BandMeasure,

    /// Draw a title and a label above each row
    pub labels: bool,

    /// Label text height in pixels
    pub font_size: f32,

    /// Where the image is written
    pub output_path: PathBuf,
}

/// Band length measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BandMeasure {
    /// Source line count for every cell
    #[default]
    Lines,

    /// Wrapped screen lines for markdown, source lines for code
    ScreenLines {
        /// Characters per screen line
        width: usize,
    },
}

impl BandMeasure {
    /// Screen lines at the default screen width.
    pub fn screen_lines() -> Self {
        BandMeasure::ScreenLines {
            width: DEFAULT_SCREEN_WIDTH,
        }
    }
}

impl ChartOptions {
    /// Create new chart options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed gap.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = Some(gap);
        self
    }

    /// Use the automatic gap.
    pub fn with_auto_gap(mut self) -> Self {
        self.gap = None;
        self
    }

    /// Set the automatic gap multiplier.
    pub fn with_gap_boost(mut self, boost: f64) -> Self {
        self.gap_boost = boost;
        self
    }

    /// Set the gap colour, or `None` for no colour.
    pub fn with_gap_color(mut self, color: Option<Color>) -> Self {
        self.gap_color = color;
        self
    }

    /// Set the band thickness in pixels.
    pub fn with_line_width(mut self, line_width: u32) -> Self {
        self.line_width = line_width;
        self
    }

    /// Set the image width in pixels.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the band measure.
    pub fn with_measure(mut self, measure: BandMeasure) -> Self {
        self.measure = measure;
        self
    }

    /// Enable or disable the title and row labels.
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    /// Set the label text height in pixels.
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the output file.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Check the options before anything is drawn.
    pub fn validate(&self) -> Result<()> {
        if let Some(gap) = self.gap {
            if !gap.is_finite() || gap < 0.0 {
                return Err(Error::InvalidOption(format!(
                    "gap must be a non-negative number, got {}",
                    gap
                )));
            }
        }
        if !self.gap_boost.is_finite() || self.gap_boost < 0.0 {
            return Err(Error::InvalidOption(format!(
                "gap boost must be a non-negative number, got {}",
                self.gap_boost
            )));
        }
        if self.line_width == 0 {
            return Err(Error::InvalidOption(
                "line width must be positive".to_string(),
            ));
        }
        if self.width == 0 {
            return Err(Error::InvalidOption("width must be positive".to_string()));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(Error::InvalidOption(format!(
                "font size must be a positive number, got {}",
                self.font_size
            )));
        }
        if let BandMeasure::ScreenLines { width: 0 } = self.measure {
            return Err(Error::InvalidOption(
                "screen line width must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            gap: None,
            gap_boost: 1.0,
            gap_color: Some(Color::LIGHT_GREY),
            line_width: 5,
            width: 2000,
            measure: BandMeasure::Lines,
            labels: true,
            font_size: 16.0,
            output_path: PathBuf::from(DEFAULT_CHART_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ChartOptions::default();
        assert_eq!(options.gap, None);
        assert_eq!(options.gap_color, Some(Color::LIGHT_GREY));
        assert_eq!(options.output_path, PathBuf::from("nb_quality_review.png"));
        assert!(options.labels);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = ChartOptions::new()
            .with_gap(2.5)
            .with_gap_color(None)
            .with_line_width(10)
            .with_measure(BandMeasure::screen_lines())
            .with_output("out.png");
        assert_eq!(options.gap, Some(2.5));
        assert_eq!(options.gap_color, None);
        assert_eq!(options.line_width, 10);
        assert_eq!(options.measure, BandMeasure::ScreenLines { width: 160 });
        assert_eq!(options.output_path, PathBuf::from("out.png"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let negative_gap = ChartOptions::new().with_gap(-1.0);
        assert!(matches!(negative_gap.validate(), Err(Error::InvalidOption(_))));

        let zero_line = ChartOptions::new().with_line_width(0);
        assert!(matches!(zero_line.validate(), Err(Error::InvalidOption(_))));

        let zero_width = ChartOptions::new().with_width(0);
        assert!(matches!(zero_width.validate(), Err(Error::InvalidOption(_))));

        let no_font = ChartOptions::new().with_font_size(0.0);
        assert!(matches!(no_font.validate(), Err(Error::InvalidOption(_))));

        assert!(ChartOptions::new().with_gap(0.0).validate().is_ok());
    }
}
