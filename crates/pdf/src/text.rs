use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Clean up text decoded from a single span.
///
/// Applies NFC normalization, ligature expansion, replacement character
/// removal, and collapses runs of whitespace to one space.
pub fn clean_span_text(text: &str) -> String {
    let mut result: String = text.nfc().collect();

    let ligatures = [
        ("\u{FB00}", "ff"),
        ("\u{FB01}", "fi"),
        ("\u{FB02}", "fl"),
        ("\u{FB03}", "ffi"),
        ("\u{FB04}", "ffl"),
    ];
    for (lig, replacement) in &ligatures {
        result = result.replace(lig, replacement);
    }

    result = result.replace('\u{FFFD}', "");

    static RE_SPACES: OnceLock<Regex> = OnceLock::new();
    let re_spaces = RE_SPACES.get_or_init(|| Regex::new(r"\s+").unwrap());
    re_spaces.replace_all(&result, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough() {
        assert_eq!(clean_span_text("Project Goals"), "Project Goals");
    }

    #[test]
    fn test_ligature_fix() {
        assert_eq!(clean_span_text("\u{FB01}nd"), "find");
        assert_eq!(clean_span_text("a\u{FB04}e"), "affle");
    }

    #[test]
    fn test_replacement_char_removed() {
        assert_eq!(clean_span_text("Hello\u{FFFD}World"), "HelloWorld");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(clean_span_text("  a \t\n  b  "), "a b");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_span_text(""), "");
    }

    #[test]
    fn test_nfc_normalization() {
        assert_eq!(clean_span_text("caf\u{0065}\u{0301}"), "caf\u{00E9}");
    }
}
