//! Prompts for model-based report classification

/// System prompt defining the classification task
pub const CLASSIFIER_SYSTEM_PROMPT: &str = r#"You are a test result analyzer. Your job is to determine if a test execution report indicates SUCCESS or FAILURE.

Analyze the provided test result and respond with a JSON object containing:
- "success": boolean (true if test passed, false if failed)
- "confidence": number between 0 and 1 (how confident you are in this assessment)
- "reason": string (brief explanation of your decision)

Consider these factors:
- Explicit success/failure statements
- Whether expected results were achieved
- Presence of errors, exceptions, or unexpected behaviors
- Completion of all test steps
- Validation of expected outcomes

Be conservative with confidence scores. Only use confidence > 0.9 for very clear results."#;

/// Build the user prompt embedding the verbatim report
pub fn build_classification_prompt(report: &str) -> String {
    format!(
        "Analyze this test execution result and determine if it indicates success or failure:\n\n{}\n\nRespond only with valid JSON in the specified format.",
        report
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_report_verbatim() {
        let report = "## Results\n- Step 1: ✓ done\n";
        let prompt = build_classification_prompt(report);
        assert!(prompt.contains(report));
        assert!(prompt.ends_with("Respond only with valid JSON in the specified format."));
    }

    #[test]
    fn test_system_prompt_defines_contract() {
        for field in ["\"success\"", "\"confidence\"", "\"reason\""] {
            assert!(CLASSIFIER_SYSTEM_PROMPT.contains(field));
        }
        assert!(CLASSIFIER_SYSTEM_PROMPT.contains("confidence > 0.9"));
    }
}
