//! Benchmarks for nbprofile parsing and analysis.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use nbprofile::analysis::{analyze_text, extract_imports, ReadingOptions};
use nbprofile::render::layout_chart;
use nbprofile::{ChartOptions, Notebook, ReaderRegistry};

/// Builds a synthetic notebook JSON with alternating markdown and code cells.
fn create_test_notebook(cell_count: usize) -> String {
    let cells: Vec<String> = (0..cell_count)
        .map(|i| {
            if i % 2 == 0 {
                format!(
                    r#"{{"cell_type": "markdown", "metadata": {{}}, "source": ["Section {}. This paragraph explains the next step.\n", "It has two sentences."]}}"#,
                    i
                )
            } else {
                format!(
                    r#"{{"cell_type": "code", "metadata": {{}}, "outputs": [], "source": ["import numpy as np\n", "from os import path\n", "x{} = np.arange({})\n", "print(x{})"]}}"#,
                    i, i, i
                )
            }
        })
        .collect();

    format!(
        r#"{{"cells": [{}], "metadata": {{}}, "nbformat": 4, "nbformat_minor": 5}}"#,
        cells.join(",")
    )
}

fn create_percent_script(cell_count: usize) -> String {
    let mut script = String::new();
    for i in 0..cell_count {
        if i % 2 == 0 {
            script.push_str(&format!("# %% [markdown]\n# Step {} explains the data.\n\n", i));
        } else {
            script.push_str(&format!("# %%\nimport pandas as pd\ndf{} = pd.DataFrame()\n\n", i));
        }
    }
    script
}

/// Benchmark ipynb parsing at various sizes.
fn bench_ipynb_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("ipynb_parsing");

    for cell_count in [10, 100, 1000].iter() {
        let data = create_test_notebook(*cell_count);

        group.bench_function(format!("{}_cells", cell_count), |b| {
            b.iter(|| nbprofile::parse_ipynb(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the percent script reader.
fn bench_script_reading(c: &mut Criterion) {
    let registry = ReaderRegistry::with_defaults();
    let script = create_percent_script(200);

    c.bench_function("percent_script_200_cells", |b| {
        b.iter(|| registry.read_str(black_box(&script), "py").unwrap());
    });
}

/// Benchmark the analysis passes over one loaded notebook.
fn bench_analysis(c: &mut Criterion) {
    let notebook: Notebook = nbprofile::parse_ipynb(&create_test_notebook(500)).unwrap();
    let notebooks = vec![notebook];
    let reading = ReadingOptions::default();
    let chart = ChartOptions::default();

    c.bench_function("extract_imports", |b| {
        b.iter(|| extract_imports(black_box(&notebooks[0].cells)));
    });

    c.bench_function("text_analysis", |b| {
        b.iter(|| analyze_text(black_box(&notebooks), &reading).unwrap());
    });

    c.bench_function("chart_layout", |b| {
        b.iter(|| layout_chart(black_box(&notebooks), &chart).unwrap());
    });
}

criterion_group!(
    benches,
    bench_ipynb_parsing,
    bench_script_reading,
    bench_analysis,
);
criterion_main!(benches);
