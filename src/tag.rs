//! Bracketed tag matching
//!
//! TRA values can carry a trailing bracketed token (e.g. `[REF1]`) that
//! rides along with the text without being part of it, and the translation
//! pipeline wraps translatable cores in a leading and trailing marker pair.
//! All three patterns are small anchored matches, kept here as pure
//! functions so they are testable without any stream machinery.

use regex::Regex;
use std::sync::LazyLock;

/// Encode-side trailing tag: `[` + uppercase alphanumerics + `]` immediately
/// before end of value. Deliberately stricter than the decode-side pattern;
/// encode input has already had decode-time escaping resolved.
static TRAILING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[A-Z0-9]+\]$").expect("trailing tag pattern"));

/// Decode-side closing tag: a single bracketed token, optionally surrounded
/// by whitespace, and nothing else after a value's final tilde.
static CLOSING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\[[^\[\]]+\])\s*$").expect("closing tag pattern"));

/// Translation marker pair: `[start]` + core text + `[end]`, anchored to the
/// whole string. `(?s)` lets the core span embedded newlines.
static MARKED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(\[[^\[\]]*\])(.*)(\[[^\[\]]*\])$").expect("marker pattern"));

/// A string split around its translation marker pair.
///
/// When the input carries no marker pair, the whole string is the core and
/// both tags are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedText<'a> {
    pub start_tag: Option<&'a str>,
    pub core: &'a str,
    pub end_tag: Option<&'a str>,
}

/// Split a trailing `[TAG]` suffix off a value, returning the body and the
/// tag (brackets included) if one was present.
pub fn split_trailing_tag(value: &str) -> (&str, Option<&str>) {
    match TRAILING_TAG.find(value) {
        Some(m) => (&value[..m.start()], Some(m.as_str())),
        None => (value, None),
    }
}

/// Match the text after a value's closing tilde against the optional tag
/// pattern. Returns the bracketed token to reattach, or `None` when the tail
/// is blank or not a lone tag.
pub fn closing_tag(tail: &str) -> Option<&str> {
    CLOSING_TAG.captures(tail).map(|caps| {
        let (_, [tag]) = caps.extract();
        tag
    })
}

/// Split a translatable string into its marker pair and core text.
pub fn split_marked(text: &str) -> MarkedText<'_> {
    match MARKED.captures(text) {
        Some(caps) => {
            let (_, [start, core, end]) = caps.extract();
            MarkedText {
                start_tag: Some(start),
                core,
                end_tag: Some(end),
            }
        }
        None => MarkedText {
            start_tag: None,
            core: text,
            end_tag: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trailing_tag_present() {
        let (body, tag) = split_trailing_tag("Hello there[REF1]");
        assert_eq!(body, "Hello there");
        assert_eq!(tag, Some("[REF1]"));
    }

    #[test]
    fn test_split_trailing_tag_absent() {
        assert_eq!(split_trailing_tag("Hello there"), ("Hello there", None));
        // lowercase is not a tag at encode time
        assert_eq!(split_trailing_tag("Hello[ref1]"), ("Hello[ref1]", None));
        // tag not at end of string
        assert_eq!(split_trailing_tag("[REF1] Hello"), ("[REF1] Hello", None));
    }

    #[test]
    fn test_split_trailing_tag_takes_last_bracket_group() {
        let (body, tag) = split_trailing_tag("a[B1][C2]");
        assert_eq!(body, "a[B1]");
        assert_eq!(tag, Some("[C2]"));
    }

    #[test]
    fn test_closing_tag_tolerates_whitespace() {
        assert_eq!(closing_tag(" [REF1]"), Some("[REF1]"));
        assert_eq!(closing_tag("[REF1]  "), Some("[REF1]"));
        assert_eq!(closing_tag("\t[snd_x]\t"), Some("[snd_x]"));
    }

    #[test]
    fn test_closing_tag_rejects_non_tags() {
        assert_eq!(closing_tag(""), None);
        assert_eq!(closing_tag("   "), None);
        assert_eq!(closing_tag("trailing words"), None);
        assert_eq!(closing_tag("[A] extra"), None);
        assert_eq!(closing_tag("[A][B]"), None);
        assert_eq!(closing_tag("[]"), None);
    }

    #[test]
    fn test_split_marked_full_pair() {
        let marked = split_marked("[GREETING]Hello, traveller[GREETING_END]");
        assert_eq!(marked.start_tag, Some("[GREETING]"));
        assert_eq!(marked.core, "Hello, traveller");
        assert_eq!(marked.end_tag, Some("[GREETING_END]"));
    }

    #[test]
    fn test_split_marked_empty_core() {
        let marked = split_marked("[A][B]");
        assert_eq!(marked.start_tag, Some("[A]"));
        assert_eq!(marked.core, "");
        assert_eq!(marked.end_tag, Some("[B]"));
    }

    #[test]
    fn test_split_marked_core_spans_newlines() {
        let marked = split_marked("[S]line one\nline two[E]");
        assert_eq!(marked.core, "line one\nline two");
    }

    #[test]
    fn test_split_marked_no_markers() {
        let marked = split_marked("just plain text");
        assert_eq!(marked.start_tag, None);
        assert_eq!(marked.core, "just plain text");
        assert_eq!(marked.end_tag, None);
    }

    #[test]
    fn test_split_marked_single_bracket_is_not_a_pair() {
        let marked = split_marked("[ONLY] trailing text");
        assert_eq!(marked.start_tag, None);
        assert_eq!(marked.core, "[ONLY] trailing text");
        assert_eq!(marked.end_tag, None);
    }

    #[test]
    fn test_same_input_same_output() {
        let a = split_marked("[X]core[Y]");
        let b = split_marked("[X]core[Y]");
        assert_eq!(a, b);
    }
}
