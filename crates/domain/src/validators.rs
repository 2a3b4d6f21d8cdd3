/// Whether `line` contains only characters permitted in a blocklist source
/// line: alphanumerics, `.`, `_`, `-`, and space.
///
/// Comment lines (`# ...`) and anything else outside this set are rejected
/// by this check, which is how `#` lines get skipped without special-casing
/// them.
pub fn is_allowed_source_line(line: &str) -> bool {
    line.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ' '))
}

/// Lower-cases `domain` and strips a single trailing dot, the normalized
/// form used as the blocklist matching key and cache key component.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim_end_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_lines_are_rejected() {
        assert!(!is_allowed_source_line("# a comment"));
    }

    #[test]
    fn hosts_format_line_is_allowed() {
        assert!(is_allowed_source_line("0.0.0.0 example.com"));
    }

    #[test]
    fn bare_domain_is_allowed() {
        assert!(is_allowed_source_line("example.com"));
    }

    #[test]
    fn url_like_line_is_rejected() {
        assert!(!is_allowed_source_line("https://example.com/list"));
    }

    #[test]
    fn normalize_strips_trailing_dot_and_lowercases() {
        assert_eq!(normalize_domain("FOO.EXAMPLE."), "foo.example");
    }
}
