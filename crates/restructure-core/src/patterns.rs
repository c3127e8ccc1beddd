//! The structural grammar: tagged regex patterns over paragraph text.
//!
//! These patterns are the system's real parser — heading and subsection
//! detection works purely on lexical shape, never on language semantics.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Chapter heading: `BAB <roman> <title>`, applied to trimmed,
    /// upper-cased text. Numerals are restricted to the I/V/X subset.
    pub static ref CHAPTER_HEADING: Regex =
        Regex::new(r"^BAB\s+([IVX]+)\s+(.+)$").unwrap();

    /// Loose chapter prefix used when walking spans.
    pub static ref CHAPTER_PREFIX: Regex = Regex::new(r"^BAB\s+[IVX]+").unwrap();

    /// Strict heading format the validator reports on: single spaces,
    /// numeral then a title.
    pub static ref HEADING_FORMAT: Regex = Regex::new(r"^BAB [IVX]+ ").unwrap();

    /// Subsection heading: `1.2`, `1.2.3`, `A.` or `3.` followed by a title.
    /// Longest numeric alternative first so `1.2.3` is not split as `1.2`.
    pub static ref SUBSECTION: Regex =
        Regex::new(r"^(\d+\.\d+\.\d+|\d+\.\d+|[A-Z]\.|\d+\.)\s+(.+)$").unwrap();

    /// Two-component subsection number, for renumbering after a reorder.
    pub static ref SUBSECTION_NUMBER: Regex = Regex::new(r"^(\d+)\.(\d+)\s+(.+)$").unwrap();

    /// `BAB <roman> ` prefix stripped off required-section titles before
    /// substring matching.
    pub static ref REQUIRED_SECTION_PREFIX: Regex = Regex::new(r"^BAB\s+[IVX]+\s+").unwrap();

    /// Any dot-decimal in running text; detection is broad, correction is
    /// bounded (see [`fix_decimal_separators`]).
    pub static ref DECIMAL_NUMBER: Regex = Regex::new(r"\d+\.\d+").unwrap();

    /// Bounded decimal for rewriting: 1-3 fractional digits on a word
    /// boundary. The negative lookahead of the documented boundary
    /// (`(?!\d)` plus no trailing `.digit`) is applied manually because the
    /// regex engine is lookahead-free.
    static ref DECIMAL_BOUNDED: Regex = Regex::new(r"\b(\d+)\.(\d{1,3})\b").unwrap();

    /// A digit opening a sentence.
    pub static ref SENTENCE_STARTS_WITH_DIGIT: Regex = Regex::new(r"^\d+").unwrap();
}

/// Rewrite dot decimals to the comma convention: `50.5` becomes `50,5`.
///
/// Version-like sequences (`2.0.1`) and long fractional parts
/// (`1000.123456`) are left untouched.
pub fn fix_decimal_separators(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for caps in DECIMAL_BOUNDED.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        // Reject matches followed by another numeric component, e.g. the
        // "2.0" in "2.0.1" or a fraction continuing past three digits.
        let tail = &text[whole.end()..];
        let mut tail_chars = tail.chars();
        match tail_chars.next() {
            Some('.') if tail_chars.next().is_some_and(|c| c.is_ascii_digit()) => continue,
            Some(c) if c.is_ascii_digit() => continue,
            _ => {}
        }

        result.push_str(&text[last_end..whole.start()]);
        result.push_str(&caps[1]);
        result.push(',');
        result.push_str(&caps[2]);
        last_end = whole.end();
    }

    result.push_str(&text[last_end..]);
    result
}
