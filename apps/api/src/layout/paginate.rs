//! Pagination — places normalized lines onto pages with a running cursor.
//!
//! Pure function of its inputs: exporting the same plan twice yields
//! byte-identical page and line assignments. Rules, in precedence order:
//! 1. Forced break: a line recognized as an answer-key heading starts a new
//!    page unless the current page is still empty. Resets to
//!    `forced_break_top_mm`.
//! 2. Overflow break: a cursor past `page_bottom_mm` starts a new page.
//!    Resets to `overflow_top_mm` (slightly lower on the page than the
//!    forced reset — asymmetry preserved from the original layout).

use serde::Serialize;

use crate::layout::font_metrics::{get_metrics, FontFace, PageConfig};
use crate::markdown::{plain_text, InlineRun};

/// Literal heading fragments that force the answer-key section onto a fresh
/// page, checked as substrings anywhere in the line.
const ANSWER_KEY_MARKERS: [&str; 3] = [
    "Answer Key for Teachers",
    "Answer Key",
    "Answers for Teachers",
];

// ────────────────────────────────────────────────────────────────────────────
// Artifact types
// ────────────────────────────────────────────────────────────────────────────

/// One styled run placed at an absolute horizontal position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedRun {
    /// Left edge in millimetres from the page's left side.
    pub x_mm: f32,
    pub text: String,
    pub bold: bool,
}

/// One line placed at an absolute vertical position (top-down).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    /// Baseline in millimetres from the top of the page.
    pub y_mm: f32,
    pub runs: Vec<PlacedRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// The exported document layout: an ordered sequence of pages, each an
/// ordered sequence of positioned, styled lines. Independent of the stored
/// plan — no back-reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanArtifact {
    pub pages: Vec<Page>,
}

impl PlanArtifact {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

fn is_answer_key_line(plain: &str) -> bool {
    ANSWER_KEY_MARKERS.iter().any(|m| plain.contains(m))
}

/// Lays the wrapped line sequence out onto pages.
pub fn paginate(lines: &[Vec<InlineRun>], config: &PageConfig) -> PlanArtifact {
    let mut pages: Vec<Page> = vec![Page { lines: Vec::new() }];
    let mut cursor_mm = config.first_page_top_mm;

    for runs in lines {
        let plain = plain_text(runs);

        let page_has_content = !pages.last().expect("at least one page").lines.is_empty();

        if is_answer_key_line(&plain) && page_has_content {
            // Forced break wins over the ordinary space check.
            pages.push(Page { lines: Vec::new() });
            cursor_mm = config.forced_break_top_mm;
        } else if cursor_mm > config.page_bottom_mm {
            pages.push(Page { lines: Vec::new() });
            cursor_mm = config.overflow_top_mm;
        }

        let placed = place_line(runs, cursor_mm, config);
        pages.last_mut().expect("at least one page").lines.push(placed);
        cursor_mm += config.line_height_mm;
    }

    PlanArtifact { pages }
}

/// Places one line's runs left-to-right, advancing a horizontal cursor by
/// each run's measured width in its own face.
fn place_line(runs: &[InlineRun], y_mm: f32, config: &PageConfig) -> PlacedLine {
    let mut x_mm = config.margin_left_mm;
    let mut placed_runs = Vec::with_capacity(runs.len());

    for run in runs {
        let face = if run.bold {
            FontFace::HelveticaBold
        } else {
            FontFace::Helvetica
        };
        placed_runs.push(PlacedRun {
            x_mm,
            text: run.text.clone(),
            bold: run.bold,
        });
        x_mm += get_metrics(face).measure_mm(&run.text, config.body_size_pt);
    }

    PlacedLine {
        y_mm,
        runs: placed_runs,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::default_page_config;

    fn line(text: &str) -> Vec<InlineRun> {
        vec![InlineRun {
            text: text.to_string(),
            bold: false,
        }]
    }

    fn bold_run(text: &str) -> InlineRun {
        InlineRun {
            text: text.to_string(),
            bold: true,
        }
    }

    #[test]
    fn test_single_line_lands_on_first_page_top() {
        let config = default_page_config();
        let artifact = paginate(&[line("Introduction")], &config);
        assert_eq!(artifact.page_count(), 1);
        assert_eq!(artifact.pages[0].lines.len(), 1);
        assert_eq!(artifact.pages[0].lines[0].y_mm, config.first_page_top_mm);
    }

    #[test]
    fn test_pagination_is_deterministic() {
        let config = default_page_config();
        let lines: Vec<Vec<InlineRun>> = (0..90).map(|i| line(&format!("line {i}"))).collect();
        let first = paginate(&lines, &config);
        let second = paginate(&lines, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_overflow_breaks_at_bottom_threshold() {
        let config = default_page_config();
        // First page fits lines at 30, 38, ... 270 — the cursor passes 270
        // after (270-30)/8 + 1 = 31 lines.
        let lines: Vec<Vec<InlineRun>> = (0..40).map(|i| line(&format!("line {i}"))).collect();
        let artifact = paginate(&lines, &config);
        assert_eq!(artifact.page_count(), 2);
        assert_eq!(artifact.pages[0].lines.len(), 31);
        assert_eq!(artifact.pages[1].lines[0].y_mm, config.overflow_top_mm);
    }

    #[test]
    fn test_answer_key_line_forces_new_page_mid_page() {
        let config = default_page_config();
        let lines = vec![
            line("Warm-up discussion"),
            line("Group activity"),
            line("Answer Key for Teachers"),
            line("1. B"),
        ];
        let artifact = paginate(&lines, &config);
        assert_eq!(artifact.page_count(), 2);
        assert_eq!(artifact.pages[0].lines.len(), 2);
        // The answer key opens the new page at the forced-break margin.
        let key_line = &artifact.pages[1].lines[0];
        assert_eq!(key_line.y_mm, config.forced_break_top_mm);
        assert_eq!(key_line.runs[0].text, "Answer Key for Teachers");
    }

    #[test]
    fn test_all_answer_key_variants_force_break() {
        let config = default_page_config();
        for marker in ["Answer Key for Teachers", "Answer Key", "Answers for Teachers"] {
            let lines = vec![line("body"), line(marker)];
            let artifact = paginate(&lines, &config);
            assert_eq!(artifact.page_count(), 2, "marker {marker:?} should break");
        }
    }

    #[test]
    fn test_answer_key_as_first_line_does_not_break() {
        let config = default_page_config();
        let artifact = paginate(&[line("Answer Key"), line("1. A")], &config);
        assert_eq!(artifact.page_count(), 1);
    }

    #[test]
    fn test_forced_break_takes_precedence_over_overflow() {
        let config = default_page_config();
        let mut lines: Vec<Vec<InlineRun>> = (0..31).map(|i| line(&format!("line {i}"))).collect();
        // Cursor is past the bottom threshold here — both rules apply, the
        // forced reset margin must win.
        lines.push(line("Answer Key"));
        let artifact = paginate(&lines, &config);
        assert_eq!(artifact.page_count(), 2);
        assert_eq!(artifact.pages[1].lines[0].y_mm, config.forced_break_top_mm);
    }

    #[test]
    fn test_bold_run_advances_horizontal_cursor() {
        let config = default_page_config();
        let runs = vec![
            InlineRun {
                text: "The ".to_string(),
                bold: false,
            },
            bold_run("goal"),
            InlineRun {
                text: " is clarity".to_string(),
                bold: false,
            },
        ];
        let artifact = paginate(&[runs], &config);
        let placed = &artifact.pages[0].lines[0].runs;
        assert_eq!(placed.len(), 3);
        assert_eq!(placed[0].x_mm, config.margin_left_mm);
        assert!(placed[1].x_mm > placed[0].x_mm);
        assert!(placed[2].x_mm > placed[1].x_mm);
        assert!(placed[1].bold);
    }

    #[test]
    fn test_blank_line_consumes_vertical_space() {
        let config = default_page_config();
        let artifact = paginate(&[line("a"), Vec::new(), line("b")], &config);
        let page = &artifact.pages[0];
        assert_eq!(page.lines.len(), 3);
        assert_eq!(
            page.lines[2].y_mm - page.lines[0].y_mm,
            config.line_height_mm * 2.0
        );
    }
}
