//! Compilation of robots path patterns into regexes.
//!
//! A directive path is a pattern when it contains `*` or ends with `$`.
//! Everything else is a plain prefix and never comes through here.

use regex::Regex;

/// Returns true when `path` must be evaluated as a pattern rather than a
/// literal prefix.
pub(crate) fn is_pattern(path: &str) -> bool {
    path.contains('*') || path.ends_with('$')
}

/// Compiles an (already unescaped) robots path pattern into a regex.
///
/// `*` matches any run of characters and a trailing `$` anchors the match to
/// the end of the path. Two encoded corners at the tail: `%24` stands for a
/// literal dollar rather than an anchor, and `%2524` stands for the literal
/// text `%24`. `%2A` anywhere stands for a literal asterisk.
pub(crate) fn compile(path: &str) -> Result<Regex, regex::Error> {
    let mut pattern = regex::escape(path);
    pattern = pattern.replace("\\*", "(?:.*)");

    pattern = replace_suffix(&pattern, "\\$", "$");
    pattern = replace_suffix(&pattern, "%24", "\\$");
    pattern = replace_suffix(&pattern, "%2524", "%24");

    pattern = pattern.replace("%2A", "\\*");

    Regex::new(&pattern)
}

/// Replaces `suffix` at the end of `s` with `replacement`, if present.
pub(crate) fn replace_suffix(s: &str, suffix: &str, replacement: &str) -> String {
    match s.strip_suffix(suffix) {
        Some(head) => format!("{}{}", head, replacement),
        None => s.to_string(),
    }
}

/// Percent-decodes a path, returning `None` on a malformed `%` escape.
///
/// Rule construction needs the failure signal (it reverts a protective
/// substitution when decoding fails), so the infallible decoders from the
/// URL ecosystem don't fit. A decode that is not valid UTF-8 also counts as
/// failure.
pub(crate) fn path_unescape(path: &str) -> Option<String> {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_digit(*bytes.get(i + 1)?)?;
            let lo = hex_digit(*bytes.get(i + 2)?)?;
            out.push(hi << 4 | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pattern() {
        assert!(is_pattern("/*.gif"));
        assert!(is_pattern("/fish*"));
        assert!(is_pattern("/fish$"));
        assert!(!is_pattern("/fish"));
        assert!(!is_pattern(""));
        assert!(!is_pattern("/a$b"));
    }

    #[test]
    fn test_wildcard_matches_any_run() {
        let re = compile("/private/*/secret").unwrap();
        assert!(re.is_match("/private/a/secret"));
        assert!(re.is_match("/private/a/b/c/secret"));
        assert!(re.is_match("/private//secret"));
        assert!(!re.is_match("/public/a/secret"));
    }

    #[test]
    fn test_trailing_dollar_anchors() {
        let re = compile("/*.gif$").unwrap();
        assert!(re.is_match("/a/b/test.gif"));
        assert!(!re.is_match("/a/b/test.gif?x=1"));
        assert!(!re.is_match("/a/b/test.gifs"));
    }

    #[test]
    fn test_no_trailing_dollar_means_prefix() {
        let re = compile("/*.gif").unwrap();
        assert!(re.is_match("/a/test.gif"));
        assert!(re.is_match("/a/test.gif?x=1"));
    }

    #[test]
    fn test_encoded_trailing_dollar_is_literal() {
        // Rule construction leaves a protected `%24` at the tail when the
        // source directive ended in an encoded dollar.
        let re = compile("/price*%24").unwrap();
        assert!(re.is_match("/price-in-us-$"));
        assert!(re.is_match("/price-in-us-$-and-more"));
        assert!(!re.is_match("/price-in-us-"));
    }

    #[test]
    fn test_encoded_wildcard_is_literal() {
        let re = compile("/a%2Ab*").unwrap();
        assert!(re.is_match("/a*b-anything"));
        assert!(!re.is_match("/aXb-anything"));
    }

    #[test]
    fn test_regex_metacharacters_are_escaped() {
        let re = compile("/a.b(c)*").unwrap();
        assert!(re.is_match("/a.b(c)-tail"));
        assert!(!re.is_match("/aXb(c)-tail"));
    }

    #[test]
    fn test_replace_suffix() {
        assert_eq!(replace_suffix("/path%24", "%24", "%2524"), "/path%2524");
        assert_eq!(replace_suffix("/path", "%24", "%2524"), "/path");
        assert_eq!(replace_suffix("%24/path", "%24", "%2524"), "%24/path");
    }

    #[test]
    fn test_path_unescape_decodes() {
        assert_eq!(path_unescape("/a%20b"), Some("/a b".to_string()));
        assert_eq!(path_unescape("/a%2Fb"), Some("/a/b".to_string()));
        assert_eq!(path_unescape("/plain"), Some("/plain".to_string()));
    }

    #[test]
    fn test_path_unescape_rejects_malformed() {
        assert_eq!(path_unescape("/a%2"), None);
        assert_eq!(path_unescape("/a%zz"), None);
        assert_eq!(path_unescape("/a%"), None);
    }

    #[test]
    fn test_path_unescape_rejects_invalid_utf8() {
        assert_eq!(path_unescape("/%ff%fe"), None);
    }
}
