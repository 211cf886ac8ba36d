//! Version extraction.
//!
//! A category either has a dedicated pattern in the browser version lookup,
//! or falls back to the generic `category/version` / `category version` form.

use crate::error::Result;
use crate::rule::compile_pattern;
use regex::Regex;

/// Characters a version token is made of. ASCII only: fullwidth or
/// non-Latin digits never form a version.
pub(crate) const VERSION_TOKEN: &str = r"[0-9A-Za-z_.\-]+";

/// Builds the generic version pattern for a category.
pub fn synthesize(category: &str) -> Result<Regex> {
    let source = format!("{}[/ ]({VERSION_TOKEN})", regex::escape(category));
    compile_pattern(category, &source)
}

/// Returns capture group 1 of `pattern` in `input`, or an empty string.
pub fn capture_version(pattern: &Regex, input: &str) -> String {
    pattern
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_and_space_separators() {
        let webkit = synthesize("webkit").unwrap();
        assert_eq!(
            capture_version(&webkit, "AppleWebKit/537.75.14 (KHTML, like Gecko)"),
            "537.75.14"
        );

        let opera = synthesize("opera").unwrap();
        assert_eq!(capture_version(&opera, "Opera 9.80 (Windows NT 6.1)"), "9.80");
    }

    #[test]
    fn test_version_token_allows_letters_and_hyphens() {
        let firefox = synthesize("firefox").unwrap();
        assert_eq!(capture_version(&firefox, "Firefox/31.0a1-pre"), "31.0a1-pre");
    }

    #[test]
    fn test_unknown_category_yields_empty() {
        let unknown = synthesize("unknown").unwrap();
        assert_eq!(capture_version(&unknown, "Go-http-client/1.1"), "");
    }

    #[test]
    fn test_non_ascii_digits_are_not_versions() {
        let chrome = synthesize("chrome").unwrap();
        assert_eq!(capture_version(&chrome, "Chrome/\u{ff13}\u{ff16}.\u{0660}"), "");
        assert_eq!(capture_version(&chrome, "Chrome/36.\u{0660}"), "36.");
    }

    #[test]
    fn test_category_is_escaped() {
        let odd = synthesize("a.b").unwrap();
        assert_eq!(capture_version(&odd, "axb/1.0"), "");
        assert_eq!(capture_version(&odd, "a.b/1.0"), "1.0");
    }
}
