//! nbprofile CLI - notebook structure profiling tool

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use nbprofile::analysis::{analyze_text, notebook_imports, DEFAULT_READING_RATE};
use nbprofile::render::{self, DEFAULT_CHART_FILE};
use nbprofile::{
    BandMeasure, ChartOptions, Color, JsonFormat, LoadOptions, Notebook, NotebookLoader,
    NotebookSummary, ReadingOptions,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "nbprofile")]
#[command(version)]
#[command(about = "Profile the structure of Jupyter notebooks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw one banded row per notebook, one band per cell
    Chart {
        /// Notebook file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Image file to write
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CHART_FILE)]
        out: PathBuf,

        /// Gap between cells, in lines (automatic if not set)
        #[arg(long, allow_negative_numbers = true)]
        gap: Option<f64>,

        /// Multiplier for the automatic gap
        #[arg(long, default_value_t = 1.0)]
        gap_boost: f64,

        /// Gap colour: a colour name, #rrggbb, or "none"
        #[arg(long = "gapcolor", value_name = "NAME", default_value = "lightgrey")]
        gap_color: String,

        /// Band thickness in pixels
        #[arg(long = "linewidth", value_name = "INT", default_value_t = 5)]
        line_width: u32,

        /// Image width in pixels
        #[arg(long, value_name = "INT", default_value_t = 2000)]
        width: u32,

        /// Size markdown cells by wrapped screen lines
        #[arg(long)]
        screen_lines: bool,

        /// Leave out the title and the notebook label above each row
        #[arg(long)]
        no_labels: bool,

        /// Label text height in pixels
        #[arg(long, value_name = "PX", default_value_t = 16.0, allow_negative_numbers = true)]
        font_size: f32,

        #[command(flatten)]
        formats: FormatArgs,
    },

    /// List the packages imported by code cells
    Imports {
        /// Notebook file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,

        #[command(flatten)]
        formats: FormatArgs,
    },

    /// Reading time and readability of the markdown cells
    TextAnalysis {
        /// Notebook file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Reading rate in words per minute
        #[arg(long, value_name = "INT", default_value_t = DEFAULT_READING_RATE, allow_negative_numbers = true)]
        reading_rate: i64,

        /// Round reading time up to whole minutes
        #[arg(long)]
        rounded_minutes: bool,

        /// Seconds added per line of code in markdown code blocks
        #[arg(long, value_name = "SECONDS", default_value_t = 0.0, allow_negative_numbers = true)]
        code_line_seconds: f64,

        #[command(flatten)]
        formats: FormatArgs,
    },

    /// Show cell and line counts per notebook
    Info {
        /// Notebook file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        formats: FormatArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct FormatArgs {
    /// Read Jupytext text notebooks (.py, .md, .Rmd) as well as .ipynb (default)
    #[arg(long, overrides_with = "no_text_formats")]
    text_formats: bool,

    /// Only read .ipynb files
    #[arg(long, overrides_with = "text_formats")]
    no_text_formats: bool,
}

impl FormatArgs {
    fn load_options(&self) -> LoadOptions {
        LoadOptions::new().with_text_formats(!self.no_text_formats)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Chart {
            path,
            out,
            gap,
            gap_boost,
            gap_color,
            line_width,
            width,
            screen_lines,
            no_labels,
            font_size,
            formats,
        } => cmd_chart(
            &path,
            &formats,
            ChartArgs {
                out,
                gap,
                gap_boost,
                gap_color,
                line_width,
                width,
                screen_lines,
                labels: !no_labels,
                font_size,
            },
        ),
        Commands::Imports { path, formats } => cmd_imports(&path, &formats),
        Commands::TextAnalysis {
            path,
            reading_rate,
            rounded_minutes,
            code_line_seconds,
            formats,
        } => {
            let options = ReadingOptions::new()
                .with_rate(reading_rate)
                .with_rounded_minutes(rounded_minutes)
                .with_code_line_seconds(code_line_seconds);
            cmd_text_analysis(&path, &formats, &options)
        }
        Commands::Info {
            path,
            json,
            formats,
        } => cmd_info(&path, &formats, json),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load notebooks, showing a spinner while walking a directory.
fn load_notebooks(
    path: &Path,
    formats: &FormatArgs,
) -> Result<Vec<Notebook>, Box<dyn std::error::Error>> {
    let loader = NotebookLoader::with_options(formats.load_options());
    if !path.is_dir() {
        return Ok(loader.load(path)?);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Scanning {}...", path.display()));

    let files = loader.discover(path)?;
    let mut notebooks = Vec::with_capacity(files.len());
    for file in &files {
        pb.set_message(format!("Loading {}", file.display()));
        pb.tick();
        match loader.load_file(file) {
            Ok(notebook) => notebooks.push(notebook),
            Err(e) => {
                pb.finish_and_clear();
                return Err(e.into());
            }
        }
    }
    pb.finish_and_clear();

    log::debug!("Loaded {} notebooks from {}", notebooks.len(), path.display());
    Ok(notebooks)
}

struct ChartArgs {
    out: PathBuf,
    gap: Option<f64>,
    gap_boost: f64,
    gap_color: String,
    line_width: u32,
    width: u32,
    screen_lines: bool,
    labels: bool,
    font_size: f32,
}

fn cmd_chart(path: &Path, formats: &FormatArgs, args: ChartArgs) -> CliResult {
    let measure = if args.screen_lines {
        BandMeasure::screen_lines()
    } else {
        BandMeasure::Lines
    };

    let mut options = ChartOptions::new()
        .with_gap_boost(args.gap_boost)
        .with_gap_color(Color::parse_optional(&args.gap_color)?)
        .with_line_width(args.line_width)
        .with_width(args.width)
        .with_measure(measure)
        .with_labels(args.labels)
        .with_font_size(args.font_size)
        .with_output(&args.out);
    if let Some(gap) = args.gap {
        options = options.with_gap(gap);
    }
    options.validate()?;

    let notebooks = load_notebooks(path, formats)?;
    let layout = render::render_notebooks(&notebooks, &options)?;

    println!(
        "{} {} ({} notebooks, {} cells)",
        "Saved to".green(),
        args.out.display(),
        layout.rows.len(),
        layout.cell_count()
    );
    Ok(())
}

fn cmd_imports(path: &Path, formats: &FormatArgs) -> CliResult {
    let notebooks = load_notebooks(path, formats)?;
    let imports = notebook_imports(&notebooks);

    if !imports.is_empty() {
        println!("{}", render::imports_to_text(&imports));
    }
    Ok(())
}

fn cmd_text_analysis(path: &Path, formats: &FormatArgs, options: &ReadingOptions) -> CliResult {
    options.validate()?;

    let notebooks = load_notebooks(path, formats)?;
    let analysis = analyze_text(&notebooks, options)?;

    println!("{}", "Text Analysis".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", render::text_analysis_to_text(&analysis));
    Ok(())
}

fn cmd_info(path: &Path, formats: &FormatArgs, json: bool) -> CliResult {
    let notebooks = load_notebooks(path, formats)?;
    let summaries: Vec<NotebookSummary> =
        notebooks.iter().map(NotebookSummary::from_notebook).collect();

    if json {
        println!("{}", render::to_json(&summaries, JsonFormat::Pretty)?);
        return Ok(());
    }

    for (notebook, summary) in notebooks.iter().zip(&summaries) {
        println!("{}", "Notebook Information".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        if let Some(format) = notebook.metadata.format {
            println!("{}: {}", "Format".bold(), format);
        }
        if let Some(ref language) = notebook.metadata.language {
            println!("{}: {}", "Language".bold(), language);
        }
        println!("{}", render::summary_to_text(summary));
        println!();
    }

    if summaries.len() > 1 {
        println!("{}", "Total".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", render::summary_to_text(&NotebookSummary::total(&notebooks)));
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "nbprofile".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Jupyter notebook structure profiling tool");
    println!();
    println!("License: MIT");
}
