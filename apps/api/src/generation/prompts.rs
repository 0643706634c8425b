// All LLM prompt constants for the Generation module.
// Both paths request markdown — the canonical plan representation. Nothing
// downstream branches on which path produced the text.

use crate::models::plan::StructuredRequest;

/// Prompt template for the free-text path. Replace `{input}` before sending.
pub const FREEFORM_PROMPT_TEMPLATE: &str = r#"Create a detailed teacher training session plan based on the following input: {input}

The plan should include:
1. A clear title and duration
2. Target audience specification
3. Detailed learning objectives
4. A session outline with timing for each section
5. Required materials and resources
6. Follow-up activities or assessment
7. Do not include tables to present the information

### Important Formatting Guidelines:
- Do not use any code blocks
- Use a clear and concise writing style
- Use proper markdown headers (# for main titles, ## for subtitles)
- Use bullet points for lists
- **Bold important terms** for emphasis
- Do **not** wrap your entire response in markdown code blocks (```)
- Ensure proper spacing between sections
- Format time allocations consistently
- Use a friendly and engaging tone

Make it practical and engaging for teachers.
Keep the tone professional but approachable."#;

/// Prompt template for the structured form path.
/// Replace: {title}, {subject}, {teaching_level}, {duration}, {objectives},
///          {additional_notes}
pub const STRUCTURED_PROMPT_TEMPLATE: &str = r#"Create a detailed teacher training plan with the following specifications:

Title: {title}
Subject Area: {subject}
Teaching Level: {teaching_level}
Duration: {duration} minutes
Main Objectives: {objectives}
Additional Requirements: {additional_notes}

The plan should include:
1. A clear title and duration
2. Target audience specification
3. Detailed learning objectives
4. A session outline with timing for each section
5. Required materials and resources
6. Follow-up activities or assessment
7. Do not include tables to present the information

### Important Formatting Guidelines:
- Do not use any code blocks
- Use proper markdown headers (# for main titles, ## for subtitles)
- Use bullet points for lists
- **Bold important terms** for emphasis
- Format time allocations consistently

Keep the tone professional but approachable."#;

/// Embeds the user's free-text description in the instruction template.
/// Never fails; validation happens at the submission boundary.
pub fn build_freeform_prompt(input: &str) -> String {
    FREEFORM_PROMPT_TEMPLATE.replace("{input}", input.trim())
}

/// Interpolates the six structured fields into the instruction template.
pub fn build_structured_prompt(request: &StructuredRequest) -> String {
    STRUCTURED_PROMPT_TEMPLATE
        .replace("{title}", request.title.trim())
        .replace("{subject}", request.subject.trim())
        .replace("{teaching_level}", request.teaching_level.trim())
        .replace("{duration}", &request.duration_minutes.to_string())
        .replace("{objectives}", request.objectives.trim())
        .replace("{additional_notes}", request.additional_notes.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> StructuredRequest {
        StructuredRequest {
            title: "Effective Classroom Management".to_string(),
            subject: "all".to_string(),
            teaching_level: "All Levels".to_string(),
            duration_minutes: 90,
            objectives: "Reduce disruptions through proactive routines".to_string(),
            additional_notes: "Include role-play practice".to_string(),
        }
    }

    #[test]
    fn test_freeform_prompt_embeds_input_verbatim() {
        let prompt = build_freeform_prompt("PBL for high school science teachers");
        assert!(prompt.contains("PBL for high school science teachers"));
        assert!(!prompt.contains("{input}"));
    }

    #[test]
    fn test_freeform_prompt_states_formatting_rules() {
        let prompt = build_freeform_prompt("anything");
        assert!(prompt.contains("markdown headers"));
        assert!(prompt.contains("code blocks"));
        assert!(prompt.contains("tables"));
    }

    #[test]
    fn test_structured_prompt_interpolates_all_fields() {
        let prompt = build_structured_prompt(&sample_request());
        assert!(prompt.contains("Effective Classroom Management"));
        assert!(prompt.contains("All Levels"));
        assert!(prompt.contains("90 minutes"));
        assert!(prompt.contains("proactive routines"));
        assert!(prompt.contains("role-play practice"));
        assert!(!prompt.contains('{'), "no placeholder may survive");
    }

    #[test]
    fn test_structured_prompt_requests_markdown_not_html() {
        let prompt = build_structured_prompt(&sample_request());
        assert!(prompt.contains("markdown headers"));
        assert!(!prompt.to_lowercase().contains("html"));
    }
}
