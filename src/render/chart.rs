//! Banded notebook chart: layout and raster output.
//!
//! Each notebook becomes one horizontal row. Every cell is a band whose
//! length follows the cell's size, coloured by cell type, with an optional
//! gap between consecutive bands. All rows share a single horizontal scale
//! so notebooks can be compared by eye.

use std::path::Path;

use ab_glyph::{FontRef, PxScale};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use super::{BandMeasure, ChartOptions, Color};
use crate::analysis::screen_lines;
use crate::error::{Error, Result};
use crate::model::{Cell, CellType, Notebook};

/// Fraction of the longest row used as the automatic gap.
const AUTO_GAP_FRACTION: f64 = 0.01;

/// What a band stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandKind {
    Cell(CellType),
    Gap,
}

/// One rectangle of a chart row, in length units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub start: f64,
    pub length: f64,
    pub kind: BandKind,
    /// `None` leaves the band as background
    pub color: Option<Color>,
}

impl Band {
    /// Where the band ends.
    pub fn end(&self) -> f64 {
        self.start + self.length
    }

    /// Check if the band is a cell (not a gap).
    pub fn is_cell(&self) -> bool {
        matches!(self.kind, BandKind::Cell(_))
    }
}

/// Bands for one notebook.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub label: String,
    pub bands: Vec<Band>,
}

impl Row {
    /// Total row length including gaps.
    pub fn length(&self) -> f64 {
        self.bands.last().map(Band::end).unwrap_or(0.0)
    }

    /// Only the cell bands, in cell order.
    pub fn cell_bands(&self) -> impl Iterator<Item = &Band> {
        self.bands.iter().filter(|b| b.is_cell())
    }
}

/// A laid-out chart, ready to rasterise.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub rows: Vec<Row>,
    /// Gap used between bands
    pub gap: f64,
}

impl ChartLayout {
    /// Length of the longest row.
    pub fn max_length(&self) -> f64 {
        self.rows.iter().map(Row::length).fold(0.0, f64::max)
    }

    /// Total number of cell bands.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cell_bands().count()).sum()
    }
}

/// Band length of a cell; empty cells still get one unit.
pub fn band_length(cell: &Cell, measure: BandMeasure) -> f64 {
    let units = match measure {
        BandMeasure::ScreenLines { width } if cell.is_markdown() => {
            screen_lines(&cell.lines, width)
        }
        _ => cell.line_count(),
    };
    units.max(1) as f64
}

/// Fill colour of a cell band.
pub fn cell_color(cell_type: CellType) -> Color {
    match cell_type {
        CellType::Markdown => Color::CORNFLOWER_BLUE,
        CellType::Code => Color::PINK,
    }
}

/// Lay out one row per notebook.
///
/// Fails with [`Error::InvalidOption`] for bad options and with
/// [`Error::Render`] when there are no cells to draw.
pub fn layout_chart(notebooks: &[Notebook], options: &ChartOptions) -> Result<ChartLayout> {
    options.validate()?;

    if notebooks.iter().all(Notebook::is_empty) {
        return Err(Error::Render("nothing to draw: no cells found".to_string()));
    }

    let lengths: Vec<Vec<(CellType, f64)>> = notebooks
        .iter()
        .map(|nb| {
            nb.cells
                .iter()
                .map(|cell| (cell.cell_type, band_length(cell, options.measure)))
                .collect()
        })
        .collect();

    let gap = match options.gap {
        Some(gap) => gap,
        None => {
            let longest = lengths
                .iter()
                .map(|row| row.iter().map(|(_, len)| len).sum::<f64>())
                .fold(0.0, f64::max);
            (longest * AUTO_GAP_FRACTION).ceil() * options.gap_boost
        }
    };

    let rows = notebooks
        .iter()
        .zip(&lengths)
        .map(|(nb, cells)| Row {
            label: nb.display_name(),
            bands: row_bands(cells, gap, options.gap_color),
        })
        .collect();

    Ok(ChartLayout { rows, gap })
}

fn row_bands(cells: &[(CellType, f64)], gap: f64, gap_color: Option<Color>) -> Vec<Band> {
    let mut bands = Vec::with_capacity(cells.len() * 2);
    let mut x = 0.0;

    for (i, &(cell_type, length)) in cells.iter().enumerate() {
        if i > 0 && gap > 0.0 {
            bands.push(Band {
                start: x,
                length: gap,
                kind: BandKind::Gap,
                color: gap_color,
            });
            x += gap;
        }
        bands.push(Band {
            start: x,
            length,
            kind: BandKind::Cell(cell_type),
            color: Some(cell_color(cell_type)),
        });
        x += length;
    }
    bands
}

/// Largest image, in pixels, the renderer will allocate.
const MAX_PIXELS: u64 = 1 << 27;

/// Title drawn above the rows when labels are on.
const TITLE: &str = "Notebook quality report";

/// Embedded label font.
static LABEL_FONT: &[u8] = include_bytes!("../../assets/DejaVuSansMono.ttf");

const LABEL_COLOR: Color = Color::rgb(0, 0, 0);

/// Label text is inset this many pixels from the left edge.
const LABEL_INSET: u32 = 2;

/// Vertical extents of the chart, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Geometry {
    line_width: u32,
    spacing: u32,
    title_height: u32,
    label_height: u32,
    height: u32,
}

impl Geometry {
    fn new(rows: usize, width: u32, options: &ChartOptions) -> Result<Self> {
        let line_width = options.line_width.max(1);
        let spacing = line_width / 2;
        let (title_height, label_height) = if options.labels {
            (
                text_height(options.font_size * 1.5),
                text_height(options.font_size),
            )
        } else {
            (0, 0)
        };

        let too_large = || {
            Error::Render(format!(
                "chart of {} rows is too large to draw at {} px wide",
                rows, width
            ))
        };
        let height = label_height
            .checked_add(u64::from(line_width) + u64::from(spacing))
            .and_then(|pitch| (rows as u64).checked_mul(pitch))
            .and_then(|h| h.checked_add(title_height))
            .and_then(|h| h.checked_add(u64::from(spacing)))
            .ok_or_else(too_large)?
            .max(1);
        if height
            .checked_mul(u64::from(width))
            .map_or(true, |pixels| pixels > MAX_PIXELS)
        {
            return Err(too_large());
        }

        // Every extent is at most the height, which is below MAX_PIXELS.
        let narrow = |v: u64| u32::try_from(v).map_err(|_| too_large());
        Ok(Self {
            line_width,
            spacing,
            title_height: narrow(title_height)?,
            label_height: narrow(label_height)?,
            height: narrow(height)?,
        })
    }

    /// Top of the label strip of row `i`.
    fn row_top(&self, i: usize) -> u32 {
        let pitch = self.label_height + self.line_width + self.spacing;
        self.title_height + self.spacing + i as u32 * pitch
    }

    /// Top of the bands of row `i`.
    fn band_top(&self, i: usize) -> u32 {
        self.row_top(i) + self.label_height
    }
}

/// Pixel height reserved for a line of text.
fn text_height(font_size: f32) -> u64 {
    (font_size.ceil() as u64).saturating_add(4)
}

/// Rasterise a layout.
///
/// Fails with [`Error::Render`] when the image would be too large to allocate.
pub fn draw_chart(layout: &ChartLayout, options: &ChartOptions) -> Result<RgbImage> {
    let width = options.width.max(1);
    let geometry = Geometry::new(layout.rows.len(), width, options)?;

    let mut img = RgbImage::from_pixel(width, geometry.height, Rgb(Color::WHITE.to_array()));

    if options.labels {
        draw_labels(&mut img, layout, &geometry, options.font_size)?;
    }

    let max_length = layout.max_length();
    if max_length <= 0.0 {
        return Ok(img);
    }
    let scale = f64::from(width) / max_length;

    for (i, row) in layout.rows.iter().enumerate() {
        let y0 = geometry.band_top(i);
        for band in &row.bands {
            let Some(color) = band.color else {
                continue;
            };
            let x0 = ((band.start * scale).round() as u32).min(width);
            let mut x1 = ((band.end() * scale).round() as u32).min(width);
            if x1 <= x0 && band.length > 0.0 {
                x1 = (x0 + 1).min(width);
            }
            if x1 > x0 {
                let rect = Rect::at(x0 as i32, y0 as i32).of_size(x1 - x0, geometry.line_width);
                draw_filled_rect_mut(&mut img, rect, Rgb(color.to_array()));
            }
        }
    }
    Ok(img)
}

/// Draw the title and one label above each row.
fn draw_labels(
    img: &mut RgbImage,
    layout: &ChartLayout,
    geometry: &Geometry,
    font_size: f32,
) -> Result<()> {
    let font = FontRef::try_from_slice(LABEL_FONT)
        .map_err(|e| Error::Render(format!("cannot load label font: {}", e)))?;
    let color = Rgb(LABEL_COLOR.to_array());
    let x = LABEL_INSET as i32;

    draw_text_mut(img, color, x, 2, PxScale::from(font_size * 1.5), &font, TITLE);
    for (i, row) in layout.rows.iter().enumerate() {
        let y = (geometry.row_top(i) + 2) as i32;
        draw_text_mut(img, color, x, y, PxScale::from(font_size), &font, &row.label);
    }
    Ok(())
}

/// Lay out, rasterise and save a chart of `notebooks` to the configured path.
///
/// An existing file at the path is overwritten.
pub fn render_notebooks(notebooks: &[Notebook], options: &ChartOptions) -> Result<ChartLayout> {
    let layout = layout_chart(notebooks, options)?;
    let img = draw_chart(&layout, options)?;
    save_image(&img, &options.output_path)?;
    log::debug!(
        "Wrote {}x{} chart of {} cells to {}",
        img.width(),
        img.height(),
        layout.cell_count(),
        options.output_path.display()
    );
    Ok(layout)
}

/// Write the image in the format named by the path's extension.
fn save_image(img: &RgbImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .ok()
        .filter(ImageFormat::writing_enabled)
        .ok_or_else(|| {
            Error::Render(format!(
                "cannot write image {}: unsupported image format",
                path.display()
            ))
        })?;

    img.save_with_format(path, format).map_err(|e| {
        Error::Render(format!("cannot write image {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cells(shape: &[(CellType, usize)]) -> Notebook {
        Notebook::from_cells(
            shape.iter()
                .map(|&(t, n)| Cell::from_lines(t, (0..n).map(|i| format!("line {}", i))))
                .collect(),
        )
    }

    #[test]
    fn test_two_bands_one_gap() {
        let nb = cells(&[(CellType::Code, 3), (CellType::Markdown, 5)]);
        let layout = layout_chart(&[nb], &ChartOptions::default()).unwrap();
        let row = &layout.rows[0];

        assert_eq!(row.bands.len(), 3);
        assert_eq!(row.bands[0].kind, BandKind::Cell(CellType::Code));
        assert_eq!(row.bands[0].length, 3.0);
        assert_eq!(row.bands[1].kind, BandKind::Gap);
        assert_eq!(row.bands[2].kind, BandKind::Cell(CellType::Markdown));
        assert_eq!(row.bands[2].length, 5.0);
        assert_eq!(layout.gap, 1.0);
        assert_eq!(row.bands[2].start, 4.0);
    }

    #[test]
    fn test_empty_cell_gets_one_unit() {
        let nb = Notebook::from_cells(vec![Cell::code(""), Cell::markdown("")]);
        let layout = layout_chart(&[nb], &ChartOptions::new().with_gap(0.0)).unwrap();
        let lengths: Vec<f64> = layout.rows[0].bands.iter().map(|b| b.length).collect();
        assert_eq!(lengths, vec![1.0, 1.0]);
    }

    #[test]
    fn test_auto_gap_uses_longest_row() {
        let short = cells(&[(CellType::Code, 10)]);
        let long = cells(&[(CellType::Code, 150), (CellType::Markdown, 100)]);
        let options = ChartOptions::new().with_gap_boost(2.0);
        let layout = layout_chart(&[short, long], &options).unwrap();
        assert_eq!(layout.gap, 6.0);
        assert_eq!(layout.max_length(), 256.0);
    }

    #[test]
    fn test_screen_line_measure() {
        let nb = Notebook::from_cells(vec![Cell::markdown(&"word ".repeat(100))]);
        let lines = layout_chart(std::slice::from_ref(&nb), &ChartOptions::default()).unwrap();
        assert_eq!(lines.rows[0].bands[0].length, 1.0);

        let options = ChartOptions::new().with_measure(BandMeasure::ScreenLines { width: 50 });
        let screen = layout_chart(&[nb], &options).unwrap();
        assert_eq!(screen.rows[0].bands[0].length, 10.0);
    }

    #[test]
    fn test_no_cells_is_render_error() {
        let result = layout_chart(&[], &ChartOptions::default());
        assert!(matches!(result, Err(Error::Render(_))));

        let result = layout_chart(&[Notebook::new()], &ChartOptions::default());
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_gap_color_none() {
        let nb = cells(&[(CellType::Code, 1), (CellType::Code, 1)]);
        let options = ChartOptions::new().with_gap(1.0).with_gap_color(None);
        let layout = layout_chart(&[nb], &options).unwrap();
        assert_eq!(layout.rows[0].bands[1].color, None);
    }

    #[test]
    fn test_draw_chart_pixels() {
        let nb = cells(&[(CellType::Markdown, 1), (CellType::Code, 1)]);
        let options = ChartOptions::new()
            .with_gap(2.0)
            .with_width(40)
            .with_line_width(4)
            .with_labels(false);
        let layout = layout_chart(&[nb], &options).unwrap();
        let img = draw_chart(&layout, &options).unwrap();

        assert_eq!(img.width(), 40);
        assert_eq!(img.height(), 4 + 2 * 2);
        // 4 units over 40 px: markdown 0..10, gap 10..30, code 30..40
        assert_eq!(img.get_pixel(5, 3).0, Color::CORNFLOWER_BLUE.to_array());
        assert_eq!(img.get_pixel(20, 3).0, Color::LIGHT_GREY.to_array());
        assert_eq!(img.get_pixel(35, 3).0, Color::PINK.to_array());
        assert_eq!(img.get_pixel(5, 0).0, Color::WHITE.to_array());
    }

    #[test]
    fn test_labels_reserve_space_above_rows() {
        let nb = cells(&[(CellType::Code, 2)]);
        let options = ChartOptions::new()
            .with_width(200)
            .with_line_width(4)
            .with_font_size(16.0);
        let layout = layout_chart(&[nb.clone(), nb], &options).unwrap();
        let img = draw_chart(&layout, &options).unwrap();

        // title 28 px, then per row: 2 spacing, 20 label, 4 band; 2 below
        assert_eq!(img.height(), 28 + 2 + 2 * (20 + 4 + 2));
        assert_eq!(img.get_pixel(100, 28 + 2 + 20).0, Color::PINK.to_array());
        assert_eq!(img.get_pixel(100, 28 + 2 + 20 + 4 + 2 + 20).0, Color::PINK.to_array());

        let label_strip = 28 + 2..28 + 2 + 20;
        let inked = label_strip
            .flat_map(|y| (0..100).map(move |x| (x, y)))
            .any(|(x, y)| img.get_pixel(x, y).0 != Color::WHITE.to_array());
        assert!(inked);

        let title_inked = (0..28)
            .flat_map(|y| (0..100).map(move |x| (x, y)))
            .any(|(x, y)| img.get_pixel(x, y).0 != Color::WHITE.to_array());
        assert!(title_inked);
    }

    #[test]
    fn test_oversized_chart_is_render_error() {
        let nb = cells(&[(CellType::Code, 1)]);
        for line_width in [3_000_000_000, u32::MAX] {
            let options = ChartOptions::new().with_line_width(line_width);
            let layout = layout_chart(std::slice::from_ref(&nb), &options).unwrap();
            assert!(matches!(draw_chart(&layout, &options), Err(Error::Render(_))));
        }

        let huge_font = ChartOptions::new().with_font_size(1.0e30);
        let layout = layout_chart(std::slice::from_ref(&nb), &huge_font).unwrap();
        assert!(matches!(draw_chart(&layout, &huge_font), Err(Error::Render(_))));

        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("chart.png");
        let options = ChartOptions::new()
            .with_line_width(100_000)
            .with_output(&out);
        let result = render_notebooks(&[nb], &options);
        assert!(matches!(result, Err(Error::Render(_))));
        assert!(!out.exists());
    }

    #[test]
    fn test_render_writes_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("chart.png");
        std::fs::write(&out, b"old").unwrap();

        let nb = cells(&[(CellType::Code, 3), (CellType::Markdown, 5)]);
        let options = ChartOptions::new().with_width(100).with_output(&out);
        render_notebooks(&[nb], &options).unwrap();

        let bytes = std::fs::read(&out).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_render_unwritable_path() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("missing").join("chart.png");
        let nb = cells(&[(CellType::Code, 1)]);
        let result = render_notebooks(&[nb], &ChartOptions::new().with_output(&out));
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_unsupported_extension_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let nb = cells(&[(CellType::Code, 1)]);
        for name in ["chart.jpg", "chart.txt"] {
            let out = tmp.path().join(name);
            let result = render_notebooks(&[nb.clone()], &ChartOptions::new().with_output(&out));
            assert!(matches!(result, Err(Error::Render(_))));
            assert!(!out.exists());
        }
    }

    #[test]
    fn test_invalid_option_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("chart.png");
        let nb = cells(&[(CellType::Code, 1)]);
        let options = ChartOptions::new().with_line_width(0).with_output(&out);
        let result = render_notebooks(&[nb], &options);
        assert!(matches!(result, Err(Error::InvalidOption(_))));
        assert!(!out.exists());
    }
}
