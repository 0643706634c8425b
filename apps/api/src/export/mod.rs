//! Document Exporter — renders a paginated artifact to PDF and saves it
//! under the fixed default name.
//!
//! The save is write-then-rename through a temp file in the target directory,
//! so a failed export never leaves a partial Training_Plan.pdf behind: the
//! operation is atomic as seen by the caller.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::layout::{PageConfig, PlanArtifact};

pub mod handlers;

/// Fixed artifact name, matching the download name of the original export.
pub const ARTIFACT_FILE_NAME: &str = "Training_Plan.pdf";

const DOCUMENT_TITLE: &str = "Training Plan";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist artifact: {0}")]
    Persist(String),
}

/// Outcome of a successful export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub pages: usize,
    pub path: PathBuf,
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Renders the artifact into PDF bytes.
///
/// A4 portrait, builtin Helvetica faces. The document title is drawn bold at
/// the top of the first page; body lines land at the positions the paginator
/// assigned, converted from top-down millimetres to PDF's bottom-up axis.
pub fn render_pdf(artifact: &PlanArtifact, config: &PageConfig) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(config.page_width_mm),
        Mm(config.page_height_mm),
        "Layer 1",
    );

    let normal = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Render(e.to_string()))?;

    for (index, page) in artifact.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) = doc.add_page(
                Mm(config.page_width_mm),
                Mm(config.page_height_mm),
                "Layer 1",
            );
            doc.get_page(page_ref).get_layer(layer_ref)
        };

        if index == 0 {
            layer.use_text(
                DOCUMENT_TITLE,
                config.title_size_pt,
                Mm(config.margin_left_mm),
                Mm(config.page_height_mm - config.title_y_mm),
                &bold,
            );
        }

        for line in &page.lines {
            let y = Mm(config.page_height_mm - line.y_mm);
            for run in &line.runs {
                let font: &IndirectFontRef = if run.bold { &bold } else { &normal };
                layer.use_text(&run.text, config.body_size_pt, Mm(run.x_mm), y, font);
            }
        }
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| ExportError::Render(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| ExportError::Render(e.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Saving
// ────────────────────────────────────────────────────────────────────────────

/// Writes the PDF bytes to `<export_dir>/Training_Plan.pdf` atomically,
/// overwriting any previous artifact. Returns the final path.
pub fn save_artifact(bytes: &[u8], export_dir: &Path) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(export_dir)?;

    let target = export_dir.join(ARTIFACT_FILE_NAME);

    // Temp file in the same directory so the rename stays on one filesystem.
    let mut tmp = tempfile::NamedTempFile::new_in(export_dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(&target)
        .map_err(|e| ExportError::Persist(e.to_string()))?;

    info!(path = %target.display(), bytes = bytes.len(), "Exported plan artifact");
    Ok(target)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{default_page_config, paginate};
    use crate::markdown::InlineRun;

    fn sample_artifact() -> PlanArtifact {
        let lines: Vec<Vec<InlineRun>> = vec![
            vec![InlineRun {
                text: "Session outline".to_string(),
                bold: false,
            }],
            vec![
                InlineRun {
                    text: "The ".to_string(),
                    bold: false,
                },
                InlineRun {
                    text: "goal".to_string(),
                    bold: true,
                },
            ],
        ];
        paginate(&lines, &default_page_config())
    }

    #[test]
    fn test_render_pdf_produces_pdf_bytes() {
        let bytes = render_pdf(&sample_artifact(), &default_page_config()).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "output should be a PDF stream");
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_render_pdf_multi_page() {
        let lines: Vec<Vec<InlineRun>> = (0..80)
            .map(|i| {
                vec![InlineRun {
                    text: format!("line {i}"),
                    bold: false,
                }]
            })
            .collect();
        let config = default_page_config();
        let artifact = paginate(&lines, &config);
        assert!(artifact.page_count() > 1);
        let bytes = render_pdf(&artifact, &config).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_save_artifact_writes_fixed_name_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = save_artifact(b"%PDF-one", dir.path()).unwrap();
        assert_eq!(first.file_name().unwrap(), ARTIFACT_FILE_NAME);
        assert_eq!(std::fs::read(&first).unwrap(), b"%PDF-one");

        let second = save_artifact(b"%PDF-two", dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read(&second).unwrap(), b"%PDF-two");
    }
}
