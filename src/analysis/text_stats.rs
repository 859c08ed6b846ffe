//! Prose statistics and readability scores for markdown text.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::reading::{estimate_reading_time, ReadingOptions, ReadingTimeReport};
use crate::error::Result;
use crate::model::Notebook;

/// Sentence terminators followed by whitespace or end of text.
static SENTENCE_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("valid sentence regex"));

/// Minimum sentences for a SMOG index.
const SMOG_MIN_SENTENCES: usize = 30;

/// Words longer than this are "long words".
const LONG_WORD_CHARS: usize = 6;

/// Counts and readability scores for a body of prose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    /// Letters and digits
    pub n_chars: usize,
    pub n_words: usize,
    pub n_sentences: usize,
    /// Distinct words, case-insensitive
    pub n_unique_words: usize,
    pub n_syllables: usize,
    pub n_monosyllable_words: usize,
    /// Words of three or more syllables
    pub n_polysyllable_words: usize,
    pub n_long_words: usize,
    pub sentence_lengths: Vec<usize>,
    pub sentence_length_mean: Option<f64>,
    pub sentence_length_median: Option<f64>,
    pub sentence_length_stdev: Option<f64>,
    /// Absent when there are no words or no sentences
    pub readability: Option<Readability>,
}

/// Standard readability formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade_level: f64,
    pub automated_readability_index: f64,
    pub coleman_liau_index: f64,
    pub gunning_fog_index: f64,
    /// Only defined for texts of 30 sentences or more
    pub smog_index: Option<f64>,
}

impl TextStats {
    /// Compute statistics for `text`.
    pub fn from_text(text: &str) -> Self {
        let mut stats = TextStats::default();
        let mut unique = HashSet::new();

        for sentence in split_sentences(text) {
            let words: Vec<&str> = sentence.split_whitespace().filter_map(clean_word).collect();
            if words.is_empty() {
                continue;
            }
            stats.sentence_lengths.push(words.len());

            for word in words {
                let syllables = count_syllables(word);
                let chars = word.chars().count();

                stats.n_words += 1;
                stats.n_chars += word.chars().filter(|c| c.is_alphanumeric()).count();
                stats.n_syllables += syllables;
                if syllables == 1 {
                    stats.n_monosyllable_words += 1;
                }
                if syllables >= 3 {
                    stats.n_polysyllable_words += 1;
                }
                if chars > LONG_WORD_CHARS {
                    stats.n_long_words += 1;
                }
                unique.insert(word.to_lowercase());
            }
        }

        stats.n_sentences = stats.sentence_lengths.len();
        stats.n_unique_words = unique.len();
        stats.sentence_length_mean = mean(&stats.sentence_lengths);
        stats.sentence_length_median = median(&stats.sentence_lengths);
        stats.sentence_length_stdev = stdev(&stats.sentence_lengths);
        stats.readability = Readability::from_counts(&stats);
        stats
    }
}

impl Readability {
    fn from_counts(stats: &TextStats) -> Option<Self> {
        if stats.n_words == 0 || stats.n_sentences == 0 {
            return None;
        }
        let words = stats.n_words as f64;
        let sentences = stats.n_sentences as f64;
        let syllables = stats.n_syllables as f64;
        let chars = stats.n_chars as f64;
        let poly = stats.n_polysyllable_words as f64;

        let words_per_sentence = words / sentences;
        let syllables_per_word = syllables / words;

        let smog_index = (stats.n_sentences >= SMOG_MIN_SENTENCES)
            .then(|| 1.0430 * (poly * (30.0 / sentences)).sqrt() + 3.1291);

        Some(Self {
            flesch_reading_ease: 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
            flesch_kincaid_grade_level: 0.39 * words_per_sentence + 11.8 * syllables_per_word
                - 15.59,
            automated_readability_index: 4.71 * (chars / words) + 0.5 * words_per_sentence
                - 21.43,
            coleman_liau_index: 0.0588 * (chars / words * 100.0)
                - 0.296 * (sentences / words * 100.0)
                - 15.8,
            gunning_fog_index: 0.4 * (words_per_sentence + 100.0 * (poly / words)),
            smog_index,
        })
    }
}

/// Reading time plus prose statistics for the markdown of some notebooks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnalysis {
    pub reading_time: ReadingTimeReport,
    pub stats: TextStats,
}

/// Analyse the markdown cells of `notebooks` as one body of text.
///
/// The reading options are validated before any text is examined.
pub fn analyze_text(notebooks: &[Notebook], options: &ReadingOptions) -> Result<TextAnalysis> {
    options.validate()?;
    let cells = notebooks.iter().flat_map(|nb| nb.cells.iter());
    let reading_time = estimate_reading_time(cells, options)?;
    let text = notebooks
        .iter()
        .map(Notebook::markdown_text)
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(TextAnalysis {
        reading_time,
        stats: TextStats::from_text(&text),
    })
}

/// Split text into sentences on `.`, `!` and `?`.
fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    SENTENCE_END_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Strip surrounding punctuation; tokens with no letters or digits are not words.
fn clean_word(token: &str) -> Option<&str> {
    let word = token.trim_matches(|c: char| !c.is_alphanumeric());
    (!word.is_empty()).then_some(word)
}

/// Vowel-group syllable estimate; every word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let mut groups = 0;
    let mut in_vowel_group = false;
    for c in word.chars().flat_map(char::to_lowercase) {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !in_vowel_group {
            groups += 1;
        }
        in_vowel_group = vowel;
    }
    groups.max(1)
}

fn mean(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<usize>() as f64 / values.len() as f64)
}

fn median(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    })
}

/// Sample standard deviation; 0 for a single value.
fn stdev(values: &[usize]) -> Option<f64> {
    let m = mean(values)?;
    if values.len() < 2 {
        return Some(0.0);
    }
    let variance = values
        .iter()
        .map(|v| (*v as f64 - m).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}
