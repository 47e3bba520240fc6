//! Discord text limit helpers
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Field limit, truncation shared through `truncate_to`
//! - 1.0.0: Initial creation

/// Discord embed description limit
const EMBED_LIMIT: usize = 4096;
/// Discord embed field value limit
const FIELD_LIMIT: usize = 1024;
/// Discord message content limit
const MESSAGE_LIMIT: usize = 2000;

/// Truncate to at most `limit` bytes on a UTF-8 boundary, ending in "..." when cut
fn truncate_to(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }

    let mut end = limit.saturating_sub(3); // Room for "..."
    while !text.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Truncate text to fit embed limit, adding ellipsis if needed
pub fn truncate_for_embed(text: &str) -> String {
    truncate_to(text, EMBED_LIMIT)
}

/// Truncate text to fit an embed field value
pub fn truncate_for_field(text: &str) -> String {
    truncate_to(text, FIELD_LIMIT)
}

/// Truncate text to fit message limit, adding ellipsis if needed
pub fn truncate_for_message(text: &str) -> String {
    truncate_to(text, MESSAGE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_embed_short() {
        let text = "short text";
        assert_eq!(truncate_for_embed(text), text);
    }

    #[test]
    fn test_truncate_for_embed_long() {
        let text = "a".repeat(5000);
        let result = truncate_for_embed(&text);
        assert!(result.len() <= EMBED_LIMIT);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_utf8_safety() {
        // 3-byte characters never land exactly on the cut point
        let text = "猫".repeat(1000);
        let result = truncate_for_field(&text);
        assert!(result.len() <= FIELD_LIMIT);
        assert!(result.trim_end_matches("...").chars().all(|c| c == '猫'));
    }

    #[test]
    fn test_exactly_at_limit() {
        let text = "a".repeat(MESSAGE_LIMIT);
        assert_eq!(truncate_for_message(&text), text);
    }
}
