//! Highlighter — splits display text into plain and highlighted segments.
//!
//! The keyword is matched literally (escaped with [`regex::escape`]) and
//! case-insensitively. Concatenating the segments always reproduces the input.

use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// A run of text, highlighted or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub highlight: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlight: false,
        }
    }

    pub fn marked(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlight: true,
        }
    }
}

/// A keyword compiled once and applied to many fields.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new(keyword: &str) -> Self {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Self { pattern: None };
        }
        let pattern = RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build();
        match pattern {
            Ok(re) => Self { pattern: Some(re) },
            Err(err) => {
                tracing::warn!(%err, "keyword too large to highlight");
                Self { pattern: None }
            }
        }
    }

    pub fn highlight(&self, text: &str) -> Vec<Segment> {
        let Some(re) = &self.pattern else {
            return vec![Segment::plain(text)];
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for m in re.find_iter(text) {
            if m.start() > last {
                segments.push(Segment::plain(&text[last..m.start()]));
            }
            segments.push(Segment::marked(m.as_str()));
            last = m.end();
        }
        if segments.is_empty() {
            return vec![Segment::plain(text)];
        }
        if last < text.len() {
            segments.push(Segment::plain(&text[last..]));
        }
        segments
    }
}

/// One-shot form of [`Highlighter::highlight`].
pub fn highlight(text: &str, keyword: &str) -> Vec<Segment> {
    Highlighter::new(keyword).highlight(text)
}

/// Concatenate segment texts.
pub fn join(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
