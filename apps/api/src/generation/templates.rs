//! Quick templates — the three preset training needs the original form
//! offered as one-click starting points. Each expands to a full structured
//! request.

use serde::Serialize;

use crate::models::plan::StructuredRequest;

/// A quick-template card: identifier, display copy, and the structured
/// request it expands to.
#[derive(Debug, Clone, Serialize)]
pub struct QuickTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub request: StructuredRequest,
}

/// Returns all quick templates, in display order.
pub fn all_templates() -> Vec<QuickTemplate> {
    vec![
        QuickTemplate {
            id: "new-tech",
            name: "Integrating New Technology",
            description: "Help teachers incorporate modern tech tools in their lessons",
            request: StructuredRequest {
                title: "Integrating New Technology in the Classroom".to_string(),
                subject: "technology".to_string(),
                teaching_level: "All Levels".to_string(),
                duration_minutes: 90,
                objectives: "Introduce teachers to new educational technology tools and \
                             demonstrate effective integration into lessons."
                    .to_string(),
                additional_notes: "Ensure the session includes hands-on practice with the tools."
                    .to_string(),
            },
        },
        QuickTemplate {
            id: "student-engagement",
            name: "Student Engagement Strategies",
            description: "Boost participation and involvement in the classroom",
            request: StructuredRequest {
                title: "Increasing Student Engagement Strategies".to_string(),
                subject: "all".to_string(),
                teaching_level: "All Levels".to_string(),
                duration_minutes: 60,
                objectives: "Equip teachers with practical strategies to boost student \
                             engagement and participation."
                    .to_string(),
                additional_notes: "Focus on inclusive approaches that work for diverse \
                                   learning styles."
                    .to_string(),
            },
        },
        QuickTemplate {
            id: "assessment",
            name: "Modern Assessment Techniques",
            description: "Train on effective evaluation methods for student learning",
            request: StructuredRequest {
                title: "Modern Assessment Techniques".to_string(),
                subject: "all".to_string(),
                teaching_level: "All Levels".to_string(),
                duration_minutes: 75,
                objectives: "Train teachers on effective formative and summative assessment \
                             methods."
                    .to_string(),
                additional_notes: "Include digital assessment tools that provide immediate \
                                   feedback."
                    .to_string(),
            },
        },
    ]
}

/// Expands a template id into its structured request, if known.
pub fn expand_template(id: &str) -> Option<StructuredRequest> {
    all_templates()
        .into_iter()
        .find(|t| t.id == id)
        .map(|t| t.request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_templates_in_display_order() {
        let templates = all_templates();
        let ids: Vec<&str> = templates.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["new-tech", "student-engagement", "assessment"]);
    }

    #[test]
    fn test_expand_known_template() {
        let request = expand_template("assessment").unwrap();
        assert_eq!(request.title, "Modern Assessment Techniques");
        assert_eq!(request.duration_minutes, 75);
    }

    #[test]
    fn test_expand_unknown_template_is_none() {
        assert!(expand_template("no-such-template").is_none());
    }

    #[test]
    fn test_every_template_expands_to_a_valid_request() {
        use crate::models::plan::PlanRequest;
        for template in all_templates() {
            let request = PlanRequest::Structured(template.request);
            assert!(request.validate().is_ok(), "template {} invalid", template.id);
        }
    }
}
