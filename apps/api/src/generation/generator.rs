//! Plan Generation — orchestrates the submission pipeline.
//!
//! Flow: validate → acquire gate → clear slot → build prompt → Gemini call →
//!       epoch check → store plan → return response.
//!
//! Submission is single-flight: the gate rejects a second submit while one is
//! outstanding, and a monotonically increasing epoch discards any stale
//! completion that would otherwise overwrite a newer result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{build_freeform_prompt, build_structured_prompt};
use crate::llm_client::GeminiClient;
use crate::models::plan::PlanRequest;
use crate::store::{SlotStore, StoredPlan};

// ────────────────────────────────────────────────────────────────────────────
// State machine
// ────────────────────────────────────────────────────────────────────────────

/// Lifecycle of the generation pipeline. Replaces the scattered loading/error
/// flags of a UI with one explicit machine:
/// Idle → Submitting → Success | Failed, then back through Submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationPhase {
    Idle,
    Submitting,
    Success,
    Failed,
}

/// Single-flight gate plus stale-result guard.
///
/// `begin` moves the machine into Submitting and hands back an epoch token;
/// `finish` only lands an outcome if its token is still the latest issued.
pub struct GenerationGate {
    phase: Mutex<GenerationPhase>,
    epoch: AtomicU64,
}

impl Default for GenerationGate {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationGate {
    pub fn new() -> Self {
        Self {
            phase: Mutex::new(GenerationPhase::Idle),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn phase(&self) -> GenerationPhase {
        *self.phase.lock().expect("gate mutex poisoned")
    }

    /// Claims the gate for a new submission. Fails with `Busy` while another
    /// submission is outstanding.
    pub fn begin(&self) -> Result<u64, AppError> {
        let mut phase = self.phase.lock().expect("gate mutex poisoned");
        if *phase == GenerationPhase::Submitting {
            return Err(AppError::Busy(
                "a generation request is already in flight".to_string(),
            ));
        }
        *phase = GenerationPhase::Submitting;
        Ok(self.epoch.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Lands an outcome for the submission holding `token`. Returns false —
    /// and leaves the phase untouched — when a newer submission has since
    /// been issued (the stale result must be discarded).
    pub fn finish(&self, token: u64, outcome: GenerationPhase) -> bool {
        let mut phase = self.phase.lock().expect("gate mutex poisoned");
        if self.epoch.load(Ordering::SeqCst) != token {
            return false;
        }
        *phase = outcome;
        true
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Response from a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub status: GenerationPhase,
    pub plan: StoredPlan,
}

/// Runs one submission through the pipeline.
///
/// Ordering guarantees:
/// - Validation failures happen before the slot is touched, so an invalid
///   request never clears an existing plan.
/// - The slot is cleared before the upstream call, so a failed attempt leaves
///   it empty rather than resurrecting the previous plan.
pub async fn submit_plan(
    gate: &GenerationGate,
    store: &dyn SlotStore,
    llm: &GeminiClient,
    request: PlanRequest,
) -> Result<GenerateResponse, AppError> {
    request.validate()?;

    let token = gate.begin()?;

    let prompt = match &request {
        PlanRequest::Freeform(req) => {
            info!("Submitting freeform plan request ({} chars)", req.prompt.len());
            build_freeform_prompt(&req.prompt)
        }
        PlanRequest::Structured(req) => {
            info!(title = %req.title, "Submitting structured plan request");
            build_structured_prompt(req)
        }
    };

    if let Err(e) = store.clear().await {
        gate.finish(token, GenerationPhase::Failed);
        return Err(e.into());
    }

    match llm.generate(&prompt).await {
        Ok(text) => {
            if !gate.finish(token, GenerationPhase::Success) {
                warn!("Discarding stale generation result (epoch {token})");
                return Err(AppError::Busy(
                    "a newer generation superseded this request".to_string(),
                ));
            }
            let plan = StoredPlan::new(text);
            store.set(plan.clone()).await?;
            info!(chars = plan.text.len(), "Plan generated and stored");
            Ok(GenerateResponse {
                status: GenerationPhase::Success,
                plan,
            })
        }
        Err(e) => {
            gate.finish(token, GenerationPhase::Failed);
            // The slot stays cleared — the previous plan is not resurrected.
            Err(e.into())
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
