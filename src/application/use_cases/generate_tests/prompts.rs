use crate::domain::story::{sanitize_text as sanitize, GenerateRequest};

pub(crate) const SYSTEM_PROMPT: &str = r#"You are a senior QA engineer who turns user stories into comprehensive, executable test cases.

CRITICAL: Return ONLY valid JSON matching this exact schema:

{
  "cases": [
    {
      "id": "TC-001",
      "title": "string",
      "steps": ["string", "..."],
      "testData": "string (optional)",
      "expectedResult": "string",
      "category": "string (Positive|Negative|Edge|Authorization|Non-Functional)",
      "suiteCategory": "string (optional) - the test suite the case belongs to, such as Unit|Integration|End-to-End|Component|Performance|Security"
    }
  ],
  "model": "string (optional)",
  "promptTokens": 0,
  "completionTokens": 0
}

Guidelines:
- Number test case IDs sequentially: TC-001, TC-002, TC-003, ...
- Write concise, imperative steps (e.g., "Click the login button", "Enter a valid email")
- Include Positive, Negative and Edge cases where relevant
- Categories: Positive, Negative, Edge, Authorization, Non-Functional
- Steps must be actionable and specific
- Expected results must be clear and measurable

Return only the JSON object, no additional text."#;

/// Builds the user prompt for one story. Identical input always yields identical text.
pub(crate) fn build_prompt(request: &GenerateRequest, categories: &[String]) -> String {
    let mut body = String::new();
    body.push_str("Generate comprehensive test cases for the following user story:\n\n");
    body.push_str(&format!(
        "Story Title: {}\n\n",
        sanitize(&request.story_title)
    ));
    body.push_str(&format!(
        "Acceptance Criteria:\n{}\n",
        sanitize(&request.acceptance_criteria)
    ));

    if let Some(description) = non_blank(request.description.as_deref()) {
        body.push_str(&format!("\nDescription:\n{}\n", description));
    }

    if let Some(additional_info) = non_blank(request.additional_info.as_deref()) {
        body.push_str(&format!("\nAdditional Information:\n{}\n", additional_info));
    }

    if !categories.is_empty() {
        let joined = categories
            .iter()
            .map(|category| sanitize(category))
            .collect::<Vec<_>>()
            .join(", ");
        body.push_str(&format!(
            "\nFocus the generated tests on the following test suite categories: {}.\n",
            joined
        ));
        body.push_str(
            "For each generated test case include a \"suiteCategory\" field whose value is exactly one of the categories listed above. Keep suiteCategory concise.\n",
        );
    }

    body.push_str("\nGenerate test cases covering positive scenarios, negative scenarios, edge cases, and any authorization or non-functional requirements as applicable. Return only the JSON response.");

    body
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(sanitize).filter(|text| !text.is_empty())
}
