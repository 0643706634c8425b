//! Axum route handlers for the plan lifecycle: submit, read, copy, clear.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::generation::generator::submit_plan;
use crate::generation::templates::{all_templates, expand_template};
use crate::markdown::normalize;
use crate::models::plan::PlanRequest;
use crate::state::AppState;

/// POST /api/v1/plans/generate
///
/// Submits a plan request — freeform or structured — through the generation
/// pipeline. Rejected with 409 while another submission is outstanding.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Response, AppError> {
    let response = submit_plan(&state.gate, state.store.as_ref(), &state.llm, request).await?;
    Ok(Json(response).into_response())
}

/// GET /api/v1/templates
///
/// The quick-template presets the form offers as one-click starting points.
pub async fn handle_templates() -> Json<Value> {
    Json(json!({ "templates": all_templates() }))
}

/// POST /api/v1/templates/:id/generate
///
/// Expands a quick template into its structured request and submits it.
pub async fn handle_generate_from_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<Response, AppError> {
    let request = expand_template(&template_id)
        .ok_or_else(|| AppError::NotFound(format!("Template '{template_id}' not found")))?;

    let response = submit_plan(
        &state.gate,
        state.store.as_ref(),
        &state.llm,
        PlanRequest::Structured(request),
    )
    .await?;
    Ok(Json(response).into_response())
}

/// GET /api/v1/plans/current
///
/// The stored plan with its metadata and the pipeline phase. A missing plan
/// is a notice, not an error.
pub async fn handle_current(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    match state.store.get().await {
        Some(plan) => Ok(Json(json!({
            "status": "ok",
            "phase": state.gate.phase(),
            "plan": plan,
        }))),
        None => Ok(Json(no_plan_notice())),
    }
}

/// GET /api/v1/plans/current/text
///
/// Plain display text of the current plan (markers stripped) — the copy
/// action. A missing plan is a notice, not an error.
pub async fn handle_current_text(State(state): State<AppState>) -> Result<Response, AppError> {
    match state.store.get().await {
        Some(plan) => {
            let normalized = normalize(&plan.text, &state.page_config);
            Ok(normalized.display_text.into_response())
        }
        None => Ok(Json(no_plan_notice()).into_response()),
    }
}

/// DELETE /api/v1/plans/current
///
/// Clears the stored plan and its persisted slot.
pub async fn handle_clear(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.store.clear().await?;
    Ok(Json(json!({ "status": "cleared" })))
}

fn no_plan_notice() -> Value {
    json!({
        "status": "no_plan",
        "message": "No plan has been generated yet"
    })
}
