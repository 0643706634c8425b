use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Default session duration in minutes when the form leaves it blank.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

/// A request to generate a training plan — either a free-text description or
/// the structured form.
///
/// Untagged: a body carrying `prompt` is freeform, anything else is matched
/// against the structured shape. Field presence is NOT enforced by serde —
/// `validate()` surfaces missing required fields as a `ValidationError`
/// before any network call is made.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PlanRequest {
    Freeform(FreeformRequest),
    Structured(StructuredRequest),
}

#[derive(Debug, Clone, Deserialize)]
pub struct FreeformRequest {
    pub prompt: String,
}

/// The structured form. `duration_minutes` defaults to 60; the UI bounds it to
/// [15, 240] but the core deliberately does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub teaching_level: String,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub objectives: String,
    #[serde(default)]
    pub additional_notes: String,
}

impl PlanRequest {
    /// Presence checks for required fields. Runs at the submission boundary,
    /// before the stored plan is cleared and before any upstream call.
    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            PlanRequest::Freeform(req) => {
                if req.prompt.trim().is_empty() {
                    return Err(AppError::Validation("prompt cannot be empty".to_string()));
                }
                Ok(())
            }
            PlanRequest::Structured(req) => {
                let mut missing = Vec::new();
                if req.title.trim().is_empty() {
                    missing.push("title");
                }
                if req.objectives.trim().is_empty() {
                    missing.push("objectives");
                }
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(AppError::Validation(format!(
                        "Missing required fields: {}",
                        missing.join(", ")
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freeform_body_deserializes_as_freeform() {
        let json = serde_json::json!({ "prompt": "PBL for science teachers" });
        let request: PlanRequest = serde_json::from_value(json).unwrap();
        assert!(matches!(request, PlanRequest::Freeform(_)));
    }

    #[test]
    fn test_structured_body_deserializes_as_structured() {
        let json = serde_json::json!({
            "title": "Effective Classroom Management",
            "subject": "all",
            "teachingLevel": "All Levels",
            "durationMinutes": 90,
            "objectives": "Reduce disruptions",
            "additionalNotes": ""
        });
        let request: PlanRequest = serde_json::from_value(json).unwrap();
        match request {
            PlanRequest::Structured(req) => {
                assert_eq!(req.title, "Effective Classroom Management");
                assert_eq!(req.duration_minutes, 90);
            }
            PlanRequest::Freeform(_) => panic!("expected structured request"),
        }
    }

    #[test]
    fn test_duration_defaults_to_60() {
        let json = serde_json::json!({
            "title": "T",
            "objectives": "O"
        });
        let request: PlanRequest = serde_json::from_value(json).unwrap();
        match request {
            PlanRequest::Structured(req) => assert_eq!(req.duration_minutes, 60),
            PlanRequest::Freeform(_) => panic!("expected structured request"),
        }
    }

    #[test]
    fn test_validate_rejects_missing_title_and_objectives() {
        let request = PlanRequest::Structured(StructuredRequest {
            title: String::new(),
            subject: "science".to_string(),
            teaching_level: String::new(),
            duration_minutes: 60,
            objectives: "  ".to_string(),
            additional_notes: String::new(),
        });
        let err = request.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("title"), "error should name title: {msg}");
        assert!(
            msg.contains("objectives"),
            "error should name objectives: {msg}"
        );
    }

    #[test]
    fn test_validate_rejects_empty_prompt() {
        let request = PlanRequest::Freeform(FreeformRequest {
            prompt: "   ".to_string(),
        });
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_complete_structured_request() {
        let request = PlanRequest::Structured(StructuredRequest {
            title: "Modern Assessment Techniques".to_string(),
            subject: "all".to_string(),
            teaching_level: "All Levels".to_string(),
            duration_minutes: 75,
            objectives: "Train teachers on formative assessment".to_string(),
            additional_notes: String::new(),
        });
        assert!(request.validate().is_ok());
    }
}
