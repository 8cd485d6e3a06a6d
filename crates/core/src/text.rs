//! Text predicates and fuzzy comparison shared by the pipeline stages.

use std::sync::OnceLock;

use regex::Regex;

/// Normalize text for comparison: drop every character that is neither a
/// word character nor whitespace, lower-case, and collapse whitespace runs.
pub fn normalize_text(text: &str) -> String {
    static RE_PUNCT: OnceLock<Regex> = OnceLock::new();
    let re_punct = RE_PUNCT.get_or_init(|| Regex::new(r"[^\w\s]").unwrap());
    let stripped = re_punct.replace_all(text, "").to_lowercase();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Edit-distance similarity of the normalized forms of `a` and `b`, in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&normalize_text(a), &normalize_text(b))
}

/// `true` when the similarity of `a` and `b` exceeds `threshold`.
pub fn fuzzy_match(a: &str, b: &str, threshold: f64) -> bool {
    similarity(a, b) > threshold
}

/// Has at least one cased character and no lower-case ones.
pub fn is_upper(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Title-case: upper-case characters only follow uncased ones, lower-case
/// characters only follow cased ones, and there is at least one cased
/// character. `"Annual Report 2024"` qualifies, `"Annual report"` does not.
pub fn is_title(s: &str) -> bool {
    let mut prev_cased = false;
    let mut cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            cased = true;
        } else {
            prev_cased = false;
        }
    }
    cased
}

/// Starts with a section number: digits, an optional `.` or `)`, whitespace,
/// then a word (`"1. Overview"`, `"2) Scope"`, `"10 Results"`).
pub fn is_numbered(s: &str) -> bool {
    static RE_NUMBERED: OnceLock<Regex> = OnceLock::new();
    let re = RE_NUMBERED.get_or_init(|| Regex::new(r"^\d+[.)]?\s+\w+").unwrap());
    re.is_match(s)
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split text on every line terminator: `\n`, `\r`, `\r\n`, vertical tab,
/// form feed, the file/group/record separators, NEL, and the Unicode line
/// and paragraph separators. A `\r\n` pair yields an extra empty piece.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_line_break)
}

/// Lexical heading test applied to a single trimmed line.
pub fn is_heading_like(line: &str, max_chars: usize) -> bool {
    line.chars().count() < max_chars && (is_upper(line) || is_title(line) || is_numbered(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize_text("1. Overview!"), "1 overview");
        assert_eq!(normalize_text("  INTRODUCTION  "), "introduction");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_text("Annual \t Report\n 2024"), "annual report 2024");
    }

    #[test]
    fn test_normalize_keeps_unicode_letters() {
        assert_eq!(normalize_text("Café — Menü"), "café menü");
    }

    #[test]
    fn test_similarity_identical_after_normalization() {
        assert_eq!(similarity("Overview.", "overview"), 1.0);
    }

    #[test]
    fn test_fuzzy_match_symmetric() {
        let pairs = [
            ("Introduction", "Introductoin"),
            ("Chapter 1", "Chapter 12"),
            ("Results", "Discussion"),
            ("", "Summary"),
        ];
        for (a, b) in pairs {
            assert_eq!(fuzzy_match(a, b, 0.75), fuzzy_match(b, a, 0.75), "{a} / {b}");
            assert_eq!(similarity(a, b), similarity(b, a));
        }
    }

    #[test]
    fn test_fuzzy_match_threshold_is_exclusive() {
        // "abcd" vs "abce": one substitution over four characters = 0.75.
        assert_eq!(similarity("abcd", "abce"), 0.75);
        assert!(!fuzzy_match("abcd", "abce", 0.75));
        assert!(fuzzy_match("abcd", "abce", 0.7));
    }

    #[test]
    fn test_fuzzy_match_rejects_unrelated() {
        assert!(!fuzzy_match("Table of Contents", "Acknowledgements", 0.75));
    }

    #[test]
    fn test_is_upper() {
        assert!(is_upper("INTRODUCTION"));
        assert!(is_upper("PART 2: SCOPE"));
        assert!(!is_upper("Introduction"));
        assert!(!is_upper("2024"));
    }

    #[test]
    fn test_is_title() {
        assert!(is_title("Annual Report"));
        assert!(is_title("Annual Report 2024"));
        assert!(is_title("The Body-Of-Work"));
        assert!(!is_title("Annual report"));
        assert!(!is_title("ANNUAL"));
        assert!(!is_title("1st Place"));
        assert!(!is_title("123"));
    }

    #[test]
    fn test_split_lines_on_every_terminator() {
        let text = "A\rB\r\nC\x0cD\u{2028}E\u{2029}F\x0bG\u{85}H";
        let lines: Vec<_> = split_lines(text).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["A", "B", "C", "D", "E", "F", "G", "H"]);
    }

    #[test]
    fn test_is_numbered() {
        assert!(is_numbered("1. Overview"));
        assert!(is_numbered("2) Scope"));
        assert!(is_numbered("10 Results"));
        assert!(!is_numbered("1.Overview"));
        assert!(!is_numbered("Overview 1"));
    }

    #[test]
    fn test_is_heading_like_length_limit() {
        let long = format!("{} End", "WORD ".repeat(40));
        assert!(!is_heading_like(long.trim(), 150));
        assert!(is_heading_like("SUMMARY", 150));
        assert!(!is_heading_like("this is a sentence in body text.", 150));
    }
}
