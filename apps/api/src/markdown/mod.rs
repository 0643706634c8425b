//! Markdown Normalizer — turns the AI's lightweight markdown into display
//! text and styled, width-wrapped lines for the exporter.
//!
//! The canonical plan representation is markdown; both prompt paths request
//! it. Bold runs are captured position-tracked during the single parse scan,
//! so the exporter never has to rediscover emphasis by substring search.
//!
//! Pipeline per plan:
//! 1. Per-line scan: strip header markers, split `**bold**` delimiters into
//!    inline runs, record distinct bold-span texts in extraction order.
//! 2. Collapse runs of blank lines to at most one.
//! 3. Greedy word-wrap of the styled runs to the page measure.

use crate::layout::{get_metrics, FontFace, PageConfig};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// A contiguous stretch of same-styled text within one line.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineRun {
    pub text: String,
    pub bold: bool,
}

impl InlineRun {
    fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// The normalized plan: display text for the view/copy actions, the recorded
/// bold spans, and the wrapped line sequence the exporter paginates.
///
/// Invariant: the visible character content of `lines` equals `display_text`
/// modulo whitespace introduced by wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPlan {
    pub display_text: String,
    /// Distinct bold-span texts, in first-appearance order.
    pub bold_spans: Vec<String>,
    /// Word-wrapped lines of styled runs. An empty run list is a blank line.
    pub lines: Vec<Vec<InlineRun>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Normalizes a generated plan for display and export.
pub fn normalize(text: &str, config: &PageConfig) -> NormalizedPlan {
    let mut bold_spans: Vec<String> = Vec::new();
    let mut logical_lines: Vec<Vec<InlineRun>> = Vec::new();

    for raw_line in text.lines() {
        let stripped = strip_header_marker(raw_line);
        let runs = parse_inline_runs(&stripped, &mut bold_spans);
        logical_lines.push(runs);
    }

    collapse_blank_lines(&mut logical_lines);

    let display_text = logical_lines
        .iter()
        .map(|runs| plain_text(runs))
        .collect::<Vec<_>>()
        .join("\n");

    let mut wrapped: Vec<Vec<InlineRun>> = Vec::new();
    for runs in &logical_lines {
        if runs.is_empty() {
            wrapped.push(Vec::new());
        } else {
            wrapped.extend(wrap_runs(runs, config));
        }
    }

    NormalizedPlan {
        display_text,
        bold_spans,
        lines: wrapped,
    }
}

/// Concatenated visible text of one line's runs.
pub fn plain_text(runs: &[InlineRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Scanning
// ────────────────────────────────────────────────────────────────────────────

/// Removes a leading `#` header marker run (and its following whitespace).
fn strip_header_marker(line: &str) -> String {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        let after_hashes = trimmed.trim_start_matches('#');
        return after_hashes.trim_start().to_string();
    }
    line.to_string()
}

/// Splits one line around `**...**` delimiters into styled runs, recording
/// each distinct span text. An unpaired trailing delimiter is dropped and the
/// remainder is treated as normal text; stray single asterisks (bullet glyphs,
/// half-stripped emphasis) are removed so no marker survives into display.
fn parse_inline_runs(line: &str, bold_spans: &mut Vec<String>) -> Vec<InlineRun> {
    let mut runs: Vec<InlineRun> = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find("**") {
        let before = &rest[..open];
        if !before.is_empty() {
            push_run(&mut runs, InlineRun::normal(scrub(before)));
        }
        let after_open = &rest[open + 2..];
        match after_open.find("**") {
            Some(close) => {
                let clean = scrub(&after_open[..close]);
                if !clean.is_empty() {
                    if !bold_spans.iter().any(|s| s == &clean) {
                        bold_spans.push(clean.clone());
                    }
                    push_run(&mut runs, InlineRun::bold(clean));
                }
                rest = &after_open[close + 2..];
            }
            None => {
                // Dangling delimiter — drop it, keep the text.
                rest = after_open;
                break;
            }
        }
    }

    if !rest.is_empty() {
        push_run(&mut runs, InlineRun::normal(scrub(rest)));
    }

    // A line of pure markup can scrub down to nothing — treat it as blank.
    if runs.iter().all(|r| r.text.trim().is_empty()) {
        return Vec::new();
    }
    runs
}

/// Removes residual markdown marker characters from visible text.
fn scrub(text: &str) -> String {
    text.chars().filter(|c| *c != '*' && *c != '#').collect()
}

/// Appends a run, merging into the previous one when the style matches.
fn push_run(runs: &mut Vec<InlineRun>, run: InlineRun) {
    if run.text.is_empty() {
        return;
    }
    if let Some(last) = runs.last_mut() {
        if last.bold == run.bold {
            last.text.push_str(&run.text);
            return;
        }
    }
    runs.push(run);
}

/// Collapses consecutive blank lines into at most one, and trims leading and
/// trailing blank lines.
fn collapse_blank_lines(lines: &mut Vec<Vec<InlineRun>>) {
    let mut collapsed: Vec<Vec<InlineRun>> = Vec::new();
    let mut prev_blank = false;
    for line in lines.drain(..) {
        let blank = line.is_empty();
        if blank && prev_blank {
            continue;
        }
        prev_blank = blank;
        collapsed.push(line);
    }
    while collapsed.first().is_some_and(|l| l.is_empty()) {
        collapsed.remove(0);
    }
    while collapsed.last().is_some_and(|l| l.is_empty()) {
        collapsed.pop();
    }
    *lines = collapsed;
}

// ────────────────────────────────────────────────────────────────────────────
// Wrapping
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word-wrap of one logical line's styled runs to the page measure.
///
/// Width is measured with the face-specific metric table, so bold words
/// consume their real (wider) width. Inter-word spaces attach to the
/// preceding run, keeping each output line reconstructible by concatenation.
fn wrap_runs(runs: &[InlineRun], config: &PageConfig) -> Vec<Vec<InlineRun>> {
    let words: Vec<(String, bool)> = runs
        .iter()
        .flat_map(|run| {
            run.text
                .split_whitespace()
                .map(|w| (w.to_string(), run.bold))
                .collect::<Vec<_>>()
        })
        .collect();

    if words.is_empty() {
        return vec![Vec::new()];
    }

    let space_mm = get_metrics(FontFace::Helvetica).space_mm(config.body_size_pt);
    let max_width = config.content_width_mm;

    let mut out: Vec<Vec<InlineRun>> = Vec::new();
    let mut current: Vec<InlineRun> = Vec::new();
    let mut current_width = 0.0_f32;

    for (word, bold) in words {
        let face = if bold {
            FontFace::HelveticaBold
        } else {
            FontFace::Helvetica
        };
        let word_mm = get_metrics(face).measure_mm(&word, config.body_size_pt);

        if !current.is_empty() && current_width + space_mm + word_mm > max_width {
            out.push(current);
            current = Vec::new();
            current_width = 0.0;
        }

        if current.is_empty() {
            current.push(InlineRun { text: word, bold });
            current_width = word_mm;
        } else {
            let last = current.last_mut().expect("non-empty line");
            if last.bold == bold {
                last.text.push(' ');
                last.text.push_str(&word);
            } else {
                last.text.push(' ');
                current.push(InlineRun { text: word, bold });
            }
            current_width += space_mm + word_mm;
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
