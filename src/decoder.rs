//! TRA decoder
//!
//! A line-driven state machine over the record grammar:
//!
//! ```text
//! record      := "@" digits "=" "~" value-lines "~" tag? newline
//! value-lines := any text, "~~" = literal "~", newlines allowed
//! tag         := whitespace* "[" non-bracket-chars "]"
//! comment     := line starting with "//" (ignored)
//! blank       := whitespace-only line (ignored)
//! ```

use crate::table::{StringTable, COMMENT_PREFIX, ESCAPED_QUOTE, QUOTE};
use crate::tag;
use anyhow::{bail, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Record header: `@` + digits + `=` + the opening tilde, whitespace
/// flexible around `=`. Applied to the trimmed line; the value starts right
/// after the matched tilde.
static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(\d+)\s*=\s*~").expect("header pattern"));

/// Decoder state between physical lines.
enum State {
    /// Scanning for the next record header
    Idle,
    /// Accumulating value lines for `key` until the closing tilde
    Recording { key: String, lines: Vec<String> },
}

/// What one line contributed to the value being recorded.
enum LineScan<'a> {
    /// No tilde; the line is one more value line
    Open(&'a str),
    /// Closing tilde found: the final value line, plus an optional tag
    /// sitting after the tilde
    Closed { text: &'a str, tag: Option<&'a str> },
}

/// Decodes TRA text into a [`StringTable`]
pub struct Decoder {
    /// Treat an unterminated trailing record as an error
    strict: bool,
}

impl Decoder {
    /// Create a decoder with default (lenient) behavior
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Fail on a record left open at end of input instead of dropping it
    /// silently. Off by default for compatibility with existing tables.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Decode TRA text into an ordered string table.
    ///
    /// Duplicate keys are not an error: the last occurrence wins, keeping
    /// the position of the first. Malformed header lines are skipped.
    pub fn decode(&self, input: &str) -> Result<StringTable> {
        let mut table = StringTable::new();
        let mut state = State::Idle;

        for line in input.lines() {
            let (next, finished) = step(state, line);
            state = next;
            if let Some((key, text)) = finished {
                table.insert(key, text);
            }
        }

        if let State::Recording { key, .. } = state {
            if self.strict {
                bail!("record @{key} is missing its closing tilde at end of input");
            }
            // Compatibility: the dangling record is dropped without error.
        }

        Ok(table)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold one physical line into the decoder state.
///
/// Pure: the only outputs are the next state and, when a record closes on
/// this line, the finished `(key, text)` pair.
fn step(state: State, line: &str) -> (State, Option<(String, String)>) {
    let trimmed = line.trim();

    // Blank and comment lines are ignored in either state.
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
        return (state, None);
    }

    match state {
        State::Idle => match HEADER.captures(trimmed) {
            Some(caps) => {
                let (header, [digits]) = caps.extract();
                // The opened record's value starts right after the tilde,
                // on this same line.
                let rest = trimmed[header.len()..].trim_start();
                record(digits.to_string(), Vec::new(), rest)
            }
            // Anything else in Idle, including a header missing its `=` or
            // opening tilde, is skipped without error.
            None => (State::Idle, None),
        },
        State::Recording { key, lines } => record(key, lines, line),
    }
}

/// Feed one value segment to the record being accumulated.
fn record(key: String, mut lines: Vec<String>, segment: &str) -> (State, Option<(String, String)>) {
    match scan_value_line(segment) {
        LineScan::Open(text) => {
            lines.push(text.to_string());
            (State::Recording { key, lines }, None)
        }
        LineScan::Closed { text, tag } => {
            lines.push(text.to_string());
            let mut value = lines.join("\n").replace(ESCAPED_QUOTE, "~");
            if let Some(tag) = tag {
                value.push_str(tag);
            }
            (State::Idle, Some((key, value)))
        }
    }
}

/// Scan a value line for its closing tilde.
///
/// The scan looks for the *last* tilde on the line, not the first: literal
/// tildes inside the value arrive escaped as `~~`, so the final delimiter
/// before an optional tag is the only reliable anchor.
fn scan_value_line(segment: &str) -> LineScan<'_> {
    match segment.rfind(QUOTE) {
        None => LineScan::Open(segment.trim_end()),
        Some(pos) => LineScan::Closed {
            text: segment[..pos].trim_end(),
            tag: tag::closing_tag(&segment[pos + 1..]),
        },
    }
}
