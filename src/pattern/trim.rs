//! Newline trimming for accumulated output

/// Strip one trailing line terminator (`\n` or `\r\n`) from `text`.
///
/// Only a single terminator is removed; other trailing whitespace is kept.
///
/// ```
/// use expect_script::trim_response;
///
/// assert_eq!(trim_response("a\r\n"), "a");
/// assert_eq!(trim_response("a\n\n"), "a\n");
/// assert_eq!(trim_response("Password: "), "Password: ");
/// ```
pub fn trim_response(text: &str) -> &str {
    match text.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_trim_crlf() {
        assert_eq!(trim_response("a\r\n"), "a");
    }

    #[test]
    fn test_trim_single_of_two() {
        assert_eq!(trim_response("a\n\n"), "a\n");
        assert_eq!(trim_response("a\r\n\r\n"), "a\r\n");
    }

    #[test]
    fn test_trim_lone_cr_kept() {
        assert_eq!(trim_response("a\r"), "a\r");
    }

    #[test]
    fn test_trim_whitespace_kept() {
        assert_eq!(trim_response("prompt> \n"), "prompt> ");
        assert_eq!(trim_response("  "), "  ");
    }

    #[test]
    fn test_trim_empty() {
        assert_eq!(trim_response(""), "");
        assert_eq!(trim_response("\n"), "");
        assert_eq!(trim_response("\r\n"), "");
    }

    proptest! {
        #[test]
        fn prop_trim_removes_at_most_one_terminator(body in "[^\r]*", crlf in any::<bool>()) {
            let terminator = if crlf { "\r\n" } else { "\n" };
            let text = format!("{body}{terminator}");
            prop_assert_eq!(trim_response(&text), body.as_str());
        }

        #[test]
        fn prop_trim_is_prefix(text in ".*") {
            let trimmed = trim_response(&text);
            prop_assert!(text.starts_with(trimmed));
            prop_assert!(text.len() - trimmed.len() <= 2);
        }
    }
}
