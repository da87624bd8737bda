//! Log sanitization utilities
//!
//! Keeps API response bodies and credentials from being fully exposed in
//! debug/error logs.

/// Maximum number of bytes to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters kept visible by [`mask_secret`].
const MASK_VISIBLE_PREFIX: usize = 2;

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Strings within the limit are returned unchanged; longer ones keep the first
/// `TRUNCATE_LIMIT` bytes (on a char boundary) plus a suffix with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a credential for logging: `"hunter2"` becomes `"hu*****"`.
///
/// Secrets no longer than the visible prefix are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= MASK_VISIBLE_PREFIX {
        return "*".repeat(len);
    }
    let visible: String = secret.chars().take(MASK_VISIBLE_PREFIX).collect();
    format!("{visible}{}", "*".repeat(len - MASK_VISIBLE_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_unchanged() {
        let s = r#"{"results":[]}"#;
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn over_limit_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains(&format!("total {} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_chars_safe() {
        let s = "é".repeat(300);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }

    #[test]
    fn mask_keeps_prefix_only() {
        assert_eq!(mask_secret("hunter2"), "hu*****");
        assert_eq!(mask_secret("ab"), "**");
        assert_eq!(mask_secret(""), "");
    }
}
