use once_cell::sync::Lazy;
use regex::Regex;

static REASONING_BLOCK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<think>.*?</think>|<think\s*/>|<reasoning>.*?</reasoning>")
        .expect("reasoning pattern is valid")
});

static CODE_FENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_-]*\s*\n?(.*?)\n?\s*```$").expect("code fence pattern is valid")
});

/// Strips reasoning blocks and a wrapping Markdown code fence so the remainder can be
/// handed to a JSON parser. Text that is neither is returned trimmed.
pub fn clean_json_output(response: &str) -> String {
    let without_reasoning = REASONING_BLOCK_PATTERN.replace_all(response, "");
    let trimmed = without_reasoning.trim();

    match CODE_FENCE_PATTERN.captures(trimmed) {
        Some(captures) => captures
            .get(1)
            .map(|body| body.as_str().trim().to_string())
            .unwrap_or_default(),
        None => trimmed.to_string(),
    }
}

/// First `max_chars` characters of `text`, for log lines.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_untouched() {
        let input = r#"  {"cases": []}  "#;
        assert_eq!(clean_json_output(input), r#"{"cases": []}"#);
    }

    #[test]
    fn test_strips_json_fence() {
        let input = "```json\n{\"cases\": []}\n```";
        assert_eq!(clean_json_output(input), r#"{"cases": []}"#);
    }

    #[test]
    fn test_strips_bare_fence() {
        let input = "```\n{\"a\": 1}\n```";
        assert_eq!(clean_json_output(input), r#"{"a": 1}"#);
    }

    #[test]
    fn test_strips_think_block_before_fence() {
        let input = "<think>\nplan the cases\n</think>\n```json\n{\"cases\": []}\n```";
        assert_eq!(clean_json_output(input), r#"{"cases": []}"#);
    }

    #[test]
    fn test_self_closing_think_and_reasoning() {
        assert_eq!(clean_json_output("<think/>{}"), "{}");
        assert_eq!(clean_json_output("<reasoning>x</reasoning> [1]"), "[1]");
    }

    #[test]
    fn test_non_json_prose_is_kept() {
        assert_eq!(clean_json_output("{not json"), "{not json");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("héllo world", 5), "héllo…");
        assert_eq!(preview("short", 10), "short");
    }
}
