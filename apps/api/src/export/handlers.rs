//! Axum route handler for the document export action.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::export::{render_pdf, save_artifact, ExportError, ExportSummary};
use crate::layout::paginate;
use crate::markdown::normalize;
use crate::state::AppState;

/// POST /api/v1/plans/export
///
/// Normalizes the stored plan, paginates it, renders the PDF, and saves it
/// under the fixed artifact name. Rendering and the file write are CPU/IO
/// bound, so they run inside `tokio::task::spawn_blocking`.
///
/// A missing plan is a notice, not an error; an export failure never touches
/// the stored plan.
pub async fn handle_export(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let Some(plan) = state.store.get().await else {
        return Ok(Json(json!({
            "status": "no_plan",
            "message": "No plan available to export"
        })));
    };

    let config = state.page_config.clone();
    let export_dir = state.config.export_dir.clone();

    let summary = tokio::task::spawn_blocking(move || -> Result<ExportSummary, ExportError> {
        let normalized = normalize(&plan.text, &config);
        tracing::debug!(
            bold_spans = normalized.bold_spans.len(),
            lines = normalized.lines.len(),
            "Plan normalized for export"
        );
        let artifact = paginate(&normalized.lines, &config);
        let bytes = render_pdf(&artifact, &config)?;
        let path = save_artifact(&bytes, &export_dir)?;
        Ok(ExportSummary {
            pages: artifact.page_count(),
            path,
        })
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    Ok(Json(json!({
        "status": "exported",
        "pages": summary.pages,
        "path": summary.path,
    })))
}
