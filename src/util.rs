// src/util.rs — Shared utility functions

/// Truncate a string for prompt embedding (UTF-8 safe).
///
/// Returns at most `max_len` bytes of `s`, with the cut point pulled back
/// to a valid character boundary, followed by "..." when anything was
/// dropped. Worker prompts embed only the head of large documents.
pub fn excerpt(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_short() {
        assert_eq!(excerpt("hello", 10), "hello");
    }

    #[test]
    fn test_excerpt_exact() {
        assert_eq!(excerpt("hello", 5), "hello");
    }

    #[test]
    fn test_excerpt_long() {
        assert_eq!(excerpt("hello world", 5), "hello...");
    }

    #[test]
    fn test_excerpt_multibyte() {
        // "café" is 5 bytes (é = 2 bytes); cutting at 4 must not split é
        assert_eq!(excerpt("café", 4), "caf...");
    }

    #[test]
    fn test_excerpt_empty() {
        assert_eq!(excerpt("", 5), "");
    }
}
