//! Property-based test generators using proptest.
//!
//! Generated lines never contain a NUL byte, so generated files are never
//! mistaken for UTF-16/UTF-32. Every generated line is terminated: an
//! unterminated last line sorted into the middle of a file runs into the
//! line after it, which breaks line-level comparisons.

use proptest::prelude::*;

/// Strategy for a single `\n`-terminated line of printable text.
pub fn line_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ,.;_-]{0,24}")
        .expect("Invalid regex")
        .prop_map(|body| body + "\n")
}

/// Strategy for a line that may use CRLF, mixed case or non-ASCII text.
pub fn mixed_line_strategy() -> impl Strategy<Value = String> {
    (
        prop::string::string_regex("[a-zA-Zäöüßé0-9 ]{0,16}").expect("Invalid regex"),
        prop::bool::ANY,
    )
        .prop_map(|(body, crlf)| if crlf { body + "\r\n" } else { body + "\n" })
}

/// Strategy for a whole file's worth of lines.
pub fn lines_strategy(max_lines: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(line_strategy(), 0..=max_lines)
}

/// Strategy for a whole file of mixed lines, every one terminated.
pub fn mixed_lines_strategy(max_lines: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(mixed_line_strategy(), 0..=max_lines)
}
