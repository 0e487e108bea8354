//! Log text normalization applied before section splitting.
//!
//! The harness highlights throughput and counters with ANSI SGR colour codes
//! (`ESC[32m507.54ESC[0m`) when its output is tee'd from a terminal, which
//! would otherwise break the numeric field patterns.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// SGR escape sequences such as `\x1b[1;32m` and `\x1b[0m`
static ANSI_SGR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("Invalid regex pattern"));

/// Remove ANSI colour codes, borrowing when there are none
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_SGR_REGEX.replace_all(text, "")
}

/// Check whether text carries any colour codes
pub fn has_ansi(text: &str) -> bool {
    ANSI_SGR_REGEX.is_match(text)
}

/// Prepare raw log text for parsing
pub fn normalize_log_text(text: &str, strip_colours: bool) -> Cow<'_, str> {
    if strip_colours {
        strip_ansi(text)
    } else {
        Cow::Borrowed(text)
    }
}
