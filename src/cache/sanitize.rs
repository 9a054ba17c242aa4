//! Key sanitising for cache file names.

/// Normalises an arbitrary string into a safe file-name fragment.
///
/// Leading and trailing `/` are trimmed, remaining `/` become `~`, `?` becomes
/// `@`, and anything outside `[A-Za-z0-9._@~-]` is dropped.
///
/// ```
/// use file_cache::sanitize_key;
///
/// assert_eq!(sanitize_key("/a/b?c*d"), "a~b@cd");
/// ```
pub fn sanitize_key(raw: &str) -> String {
    raw.trim_matches('/')
        .chars()
        .map(|c| match c {
            '/' => '~',
            '?' => '@',
            other => other,
        })
        .filter(|c| is_allowed(*c))
        .collect()
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '@' | '~')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_url_path() {
        assert_eq!(sanitize_key("/a/b?c*d"), "a~b@cd");
    }

    #[test]
    fn test_sanitize_trims_repeated_slashes() {
        assert_eq!(sanitize_key("///news/today//"), "news~today");
    }

    #[test]
    fn test_sanitize_keeps_allowed_punctuation() {
        assert_eq!(sanitize_key("a-b.c_d@e~f"), "a-b.c_d@e~f");
    }

    #[test]
    fn test_sanitize_strips_non_ascii_and_spaces() {
        assert_eq!(sanitize_key("caf\u{e9} menu&x=1"), "cafmenux1");
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_key(""), "");
        assert_eq!(sanitize_key("///"), "");
    }
}
