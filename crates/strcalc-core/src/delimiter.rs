//! Delimiter headers and tokenization.
//!
//! Comma and newline always separate numbers. An input that starts with
//! `//` declares one more delimiter before its first newline:
//!
//! - `//;\n1;2` declares the single character `;`
//! - `//[***]\n1***2` declares `***`; brackets allow any non-empty length
//!
//! Delimiters are matched as literal text, never as patterns.

use aho_corasick::{AhoCorasick, MatchKind};

use crate::error::{CalcError, CalcResult};

/// Marker that opens a delimiter header.
pub const HEADER_MARKER: &str = "//";

/// Separators that are active for every input.
pub const DEFAULT_DELIMITERS: [&str; 2] = [",", "\n"];

/// The delimiters active for one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delimiters {
    custom: Option<String>,
}

impl Delimiters {
    /// Default delimiters plus `custom`.
    pub fn with_custom(custom: impl Into<String>) -> Self {
        Self {
            custom: Some(custom.into()),
        }
    }

    /// The delimiter declared by a header, if any.
    pub fn custom(&self) -> Option<&str> {
        self.custom.as_deref()
    }

    /// All literal patterns that separate tokens.
    pub fn patterns(&self) -> Vec<&str> {
        let mut patterns = DEFAULT_DELIMITERS.to_vec();
        if let Some(custom) = self.custom() {
            patterns.push(custom);
        }
        patterns
    }

    /// Split `text` on every active delimiter, preserving order.
    ///
    /// The longest delimiter wins where several match at the same position,
    /// so `//[,,]\n1,,2` yields `["1", "2"]`. Adjacent delimiters produce
    /// empty tokens; rejecting those is left to the caller.
    pub fn split<'a>(&self, text: &'a str) -> CalcResult<Vec<&'a str>> {
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(self.patterns())?;

        let mut tokens = Vec::new();
        let mut start = 0;
        for found in matcher.find_iter(text) {
            tokens.push(&text[start..found.start()]);
            start = found.end();
        }
        tokens.push(&text[start..]);
        Ok(tokens)
    }
}

impl std::fmt::Display for Delimiters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.custom() {
            Some(custom) => write!(f, "comma, newline, {custom:?}"),
            None => f.write_str("comma, newline"),
        }
    }
}

/// Separate an optional delimiter header from the numeric text.
///
/// Returns the active delimiters and the slice of `text` holding numbers.
/// Input without the `//` marker is returned whole with the defaults.
pub fn split_header(text: &str) -> CalcResult<(Delimiters, &str)> {
    let Some(rest) = text.strip_prefix(HEADER_MARKER) else {
        return Ok((Delimiters::default(), text));
    };

    let Some((body, numbers)) = rest.split_once('\n') else {
        return Err(invalid(rest, "missing newline after header"));
    };

    let custom = parse_header_body(body)?;
    Ok((Delimiters::with_custom(custom), numbers))
}

fn parse_header_body(body: &str) -> CalcResult<&str> {
    if let Some(inner) = body.strip_prefix('[').and_then(|b| b.strip_suffix(']')) {
        if inner.is_empty() {
            return Err(invalid(body, "bracketed delimiter is empty"));
        }
        return Ok(inner);
    }

    let mut chars = body.chars();
    match (chars.next(), chars.next()) {
        (Some(_), None) => Ok(body),
        (None, _) => Err(invalid(body, "no delimiter declared")),
        (Some(_), Some(_)) => Err(invalid(
            body,
            "bare delimiters must be a single character; use [..] for longer ones",
        )),
    }
}

fn invalid(header: &str, reason: &'static str) -> CalcError {
    CalcError::InvalidHeader {
        header: header.to_string(),
        reason,
    }
}
