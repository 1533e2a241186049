use crate::sample::CodeSample;

const RESPONSE_FORMAT: &str = "\
Please answer in the following format:

## Error Analysis
[Explain what the error is]

## Cause
[Explain why this error occurred]

## Repair Suggestions
[Provide conceptual repair methods, do not give complete code]

## Learning Points
[Relevant knowledge points]";

/// Build the user prompt for one code sample.
///
/// Embeds the code in a fenced block, the associated error message (an
/// empty section when none was supplied), and the response-format skeleton
/// the assistant is asked to follow. The sections are opaque to this
/// system; they are never parsed back out of the reply.
pub fn build_user_prompt(sample: &CodeSample, language: &str) -> String {
    let mut parts = Vec::new();

    parts.push(format!("Please analyze the following {language} code error:"));
    parts.push(format!("Code:\n```{language}\n{}\n```", sample.body));
    parts.push(format!(
        "Error message (if any):\n{}",
        sample.error_message.as_deref().unwrap_or("")
    ));
    parts.push(RESPONSE_FORMAT.to_string());

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embeds_code_in_fenced_block() {
        let sample = CodeSample::new("script.py", "print(numbers[10])");
        let prompt = build_user_prompt(&sample, "python");

        assert!(prompt.starts_with("Please analyze the following python code error:"));
        assert!(prompt.contains("```python\nprint(numbers[10])\n```"));
    }

    #[test]
    fn test_embeds_error_message_when_present() {
        let sample =
            CodeSample::new("script.py", "print(numbers[10])").with_error("IndexError: list index out of range");
        let prompt = build_user_prompt(&sample, "python");

        assert!(prompt.contains("Error message (if any):\nIndexError: list index out of range"));
    }

    #[test]
    fn test_error_section_is_empty_when_absent() {
        let sample = CodeSample::new("script.py", "print(numbers[10])");
        let prompt = build_user_prompt(&sample, "python");

        assert!(prompt.contains("Error message (if any):\n\n"));
    }

    #[test]
    fn test_requests_response_sections() {
        let sample = CodeSample::new("script.py", "x = 1");
        let prompt = build_user_prompt(&sample, "python");

        assert!(prompt.contains("## Error Analysis"));
        assert!(prompt.contains("## Cause"));
        assert!(prompt.contains("## Repair Suggestions"));
        assert!(prompt.contains("## Learning Points"));
    }

    #[test]
    fn test_language_tag_is_configurable() {
        let sample = CodeSample::new("main.rs", "fn main() {}");
        let prompt = build_user_prompt(&sample, "rust");

        assert!(prompt.contains("rust code error"));
        assert!(prompt.contains("```rust\nfn main() {}\n```"));
    }
}
