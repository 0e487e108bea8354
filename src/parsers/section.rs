use regex::Regex;
use std::sync::LazyLock;

/// Number of consecutive dashes separating two run sections
pub const DELIMITER_LEN: usize = 48;

static DELIMITER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("-{{{}}}", DELIMITER_LEN)).expect("Invalid regex pattern"));

/// Text of one run section, borrowed from the log contents
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawSection<'a> {
    /// Zero-based position among non-empty sections
    pub index: usize,
    pub text: &'a str,
}

/// Split log text into run sections.
///
/// Whitespace-only spans (leading/trailing text, or the newline between two
/// delimiter lines) are skipped and do not consume an index.
pub fn split_sections(contents: &str) -> impl Iterator<Item = RawSection<'_>> {
    DELIMITER_REGEX
        .split(contents)
        .filter(|span| !span.trim().is_empty())
        .enumerate()
        .map(|(index, text)| RawSection { index, text })
}

/// Number of non-empty sections in the log
pub fn count_sections(contents: &str) -> usize {
    split_sections(contents).count()
}
