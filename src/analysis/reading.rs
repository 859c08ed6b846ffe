//! Reading time estimation for markdown content.

use serde::{Deserialize, Serialize};

use super::markdown_features::MarkdownFeatures;
use crate::error::{Error, Result};
use crate::model::Cell;

/// Default reading rate in words per minute.
pub const DEFAULT_READING_RATE: i64 = 100;

/// Options for reading time estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingOptions {
    /// Words per minute; must be positive
    pub rate_wpm: i64,

    /// Round minutes up to the next whole minute
    pub rounded_minutes: bool,

    /// Seconds added per code or comment line in markdown code blocks
    pub code_line_seconds: f64,
}

impl ReadingOptions {
    /// Create new reading options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reading rate in words per minute.
    pub fn with_rate(mut self, rate_wpm: i64) -> Self {
        self.rate_wpm = rate_wpm;
        self
    }

    /// Enable or disable rounding up to whole minutes.
    pub fn with_rounded_minutes(mut self, rounded: bool) -> Self {
        self.rounded_minutes = rounded;
        self
    }

    /// Set the reading overhead per line of code in markdown code blocks.
    pub fn with_code_line_seconds(mut self, seconds: f64) -> Self {
        self.code_line_seconds = seconds;
        self
    }

    /// The validated rate.
    pub fn rate(&self) -> Result<u64> {
        if self.rate_wpm > 0 {
            Ok(self.rate_wpm.unsigned_abs())
        } else {
            Err(Error::InvalidRate(self.rate_wpm))
        }
    }

    /// The validated per-line code overhead.
    pub fn code_line_seconds(&self) -> Result<f64> {
        if self.code_line_seconds.is_finite() && self.code_line_seconds >= 0.0 {
            Ok(self.code_line_seconds)
        } else {
            Err(Error::InvalidOption(format!(
                "code line seconds must be a non-negative number, got {}",
                self.code_line_seconds
            )))
        }
    }

    /// Check every option; the rate is checked first.
    pub fn validate(&self) -> Result<()> {
        self.rate()?;
        self.code_line_seconds()?;
        Ok(())
    }
}

impl Default for ReadingOptions {
    fn default() -> Self {
        Self {
            rate_wpm: DEFAULT_READING_RATE,
            rounded_minutes: false,
            code_line_seconds: 0.0,
        }
    }
}

/// Minutes of reading, exact or rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Minutes {
    /// Rounded up to a whole minute
    Rounded(u64),
    /// Fractional minutes
    Exact(f64),
}

impl Minutes {
    /// Minutes as a float.
    pub fn value(&self) -> f64 {
        match self {
            Minutes::Exact(m) => *m,
            Minutes::Rounded(m) => *m as f64,
        }
    }
}

impl std::fmt::Display for Minutes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Minutes::Exact(m) => write!(f, "{:.1}", m),
            Minutes::Rounded(m) => write!(f, "{}", m),
        }
    }
}

/// Estimated reading time for a body of markdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadingTimeReport {
    /// Markdown words counted
    pub total_words: usize,

    /// Rate used for the estimate
    pub rate_wpm: u64,

    /// Code and comment lines in markdown code blocks
    pub code_lines: usize,

    /// Reading time in seconds
    pub seconds: f64,

    /// Reading time in minutes
    pub minutes: Minutes,
}

/// Estimate how long the markdown in `cells` takes to read.
///
/// Code and comment lines inside markdown code blocks add
/// `code_line_seconds` each. Fails with [`Error::InvalidRate`] when the rate
/// is not positive.
///
/// # Example
///
/// ```
/// use nbprofile::analysis::{estimate_reading_time, ReadingOptions};
/// use nbprofile::model::Cell;
///
/// let cells = [Cell::markdown("one two three four")];
/// let options = ReadingOptions::new().with_rate(2).with_rounded_minutes(true);
/// let report = estimate_reading_time(&cells, &options).unwrap();
/// assert_eq!(report.minutes.value(), 2.0);
/// ```
pub fn estimate_reading_time<'a, I>(cells: I, options: &ReadingOptions) -> Result<ReadingTimeReport>
where
    I: IntoIterator<Item = &'a Cell>,
{
    let rate = options.rate()?;
    let line_seconds = options.code_line_seconds()?;

    let mut total_words = 0;
    let mut code_lines = 0;
    for cell in cells.into_iter().filter(|c| c.is_markdown()) {
        total_words += cell.word_count();
        code_lines += MarkdownFeatures::from_cell(cell).readable_code_lines();
    }

    Ok(reading_time_for_words(total_words, rate, options.rounded_minutes)
        .with_code_lines(code_lines, line_seconds))
}

/// Reading time for a known word total at a validated rate.
pub fn reading_time_for_words(total_words: usize, rate_wpm: u64, rounded: bool) -> ReadingTimeReport {
    let exact = total_words as f64 / rate_wpm as f64;
    let minutes = if rounded {
        Minutes::Rounded((total_words as u64).div_ceil(rate_wpm))
    } else {
        Minutes::Exact(exact)
    };

    ReadingTimeReport {
        total_words,
        rate_wpm,
        code_lines: 0,
        seconds: exact * 60.0,
        minutes,
    }
}

impl ReadingTimeReport {
    /// Record code lines and add `seconds_per_line` for each of them.
    pub fn with_code_lines(mut self, code_lines: usize, seconds_per_line: f64) -> Self {
        self.code_lines = code_lines;
        let overhead = code_lines as f64 * seconds_per_line;
        if overhead > 0.0 {
            self.seconds += overhead;
            self.minutes = match self.minutes {
                Minutes::Exact(_) => Minutes::Exact(self.seconds / 60.0),
                Minutes::Rounded(_) => Minutes::Rounded((self.seconds / 60.0).ceil() as u64),
            };
        }
        self
    }
}
