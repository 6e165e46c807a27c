/// Patterns rejected in custom instructions (prompt injection protection)
pub const DISALLOWED_PATTERNS: [&str; 4] = ["system:", "assistant:", "user:", "{{"];

/// Maximum length allowed for the instruction of the `custom` style
pub const MAX_CUSTOM_PROMPT_LENGTH: usize = 800;

/// Checks the instruction of a `custom` style request and strips control characters.
/// Returns the cleaned instruction or a message suitable for the caller.
pub fn sanitize_custom_prompt(prompt: &str) -> Result<String, String> {
    if prompt.chars().count() > MAX_CUSTOM_PROMPT_LENGTH {
        return Err(format!(
            "Custom prompt exceeds maximum length of {} characters",
            MAX_CUSTOM_PROMPT_LENGTH
        ));
    }

    let lowered = prompt.to_lowercase();
    for pattern in DISALLOWED_PATTERNS.iter() {
        if lowered.contains(pattern) {
            return Err(format!(
                "Custom prompt contains disallowed pattern: {}",
                pattern
            ));
        }
    }

    let sanitized = prompt
        .chars()
        .filter(|&c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string();

    if sanitized.is_empty() {
        return Err("Custom prompt cannot be empty".to_string());
    }

    Ok(sanitized)
}
