//! Plain text reports.

use crate::analysis::{ImportSet, NotebookSummary, TextAnalysis};

/// One package name per line, in order of first occurrence.
pub fn imports_to_text(imports: &ImportSet) -> String {
    imports.iter().collect::<Vec<_>>().join("\n")
}

/// Reading time, counts and readability scores.
pub fn text_analysis_to_text(analysis: &TextAnalysis) -> String {
    let reading = &analysis.reading_time;
    let stats = &analysis.stats;

    let mut lines = vec![
        format!("Words: {}", reading.total_words),
        format!(
            "Reading time: {} min ({:.0} s at {} wpm)",
            reading.minutes, reading.seconds, reading.rate_wpm
        ),
    ];
    if reading.code_lines > 0 {
        lines.push(format!("Code lines in markdown: {}", reading.code_lines));
    }
    lines.push(format!("Sentences: {}", stats.n_sentences));
    lines.push(format!("Unique words: {}", stats.n_unique_words));
    lines.push(format!("Syllables: {}", stats.n_syllables));
    lines.push(format!("Polysyllable words: {}", stats.n_polysyllable_words));
    lines.push(format!("Long words: {}", stats.n_long_words));
    if let (Some(mean), Some(median)) = (stats.sentence_length_mean, stats.sentence_length_median)
    {
        lines.push(format!(
            "Sentence length: mean {:.1}, median {:.1}, stdev {:.1}",
            mean,
            median,
            stats.sentence_length_stdev.unwrap_or(0.0)
        ));
    }

    if let Some(r) = &stats.readability {
        lines.push(format!("Flesch reading ease: {:.1}", r.flesch_reading_ease));
        lines.push(format!("Flesch-Kincaid grade: {:.1}", r.flesch_kincaid_grade_level));
        lines.push(format!(
            "Automated readability index: {:.1}",
            r.automated_readability_index
        ));
        lines.push(format!("Coleman-Liau index: {:.1}", r.coleman_liau_index));
        lines.push(format!("Gunning fog index: {:.1}", r.gunning_fog_index));
        if let Some(smog) = r.smog_index {
            lines.push(format!("SMOG index: {:.1}", smog));
        }
    }

    lines.join("\n")
}

/// Cell and line counts for one summary.
pub fn summary_to_text(summary: &NotebookSummary) -> String {
    let code = &summary.code_line_summary;
    let features = &summary.markdown_features;

    let mut lines = Vec::new();
    if let Some(name) = &summary.name {
        lines.push(format!("Notebook: {}", name));
    }
    lines.push(format!(
        "Cells: {} ({} markdown, {} code)",
        summary.cell_count(),
        summary.markdown_cells,
        summary.code_cells
    ));
    lines.push(format!("Markdown ratio: {:.2}", summary.markdown_ratio()));
    lines.push(format!("Markdown lines: {}", summary.markdown_lines));
    lines.push(format!("Markdown words: {}", summary.markdown_words));
    lines.push(format!(
        "Markdown features: {} headings, {} paragraphs, {} code blocks",
        features.headings, features.paragraphs, features.code_blocks
    ));
    if features.code_blocks > 0 {
        let block = &features.code_block_lines;
        lines.push(format!(
            "Markdown code lines: {} ({} code, {} comment, {} blank)",
            block.total(),
            block.code,
            block.comment,
            block.blank
        ));
    }
    lines.push(format!(
        "Code lines: {} ({} code, {} comment, {} blank)",
        summary.code_lines, code.code, code.comment, code.blank
    ));
    lines.join("\n")
}
