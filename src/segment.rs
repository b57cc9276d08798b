//! Note content segmentation
//!
//! Splits raw note text into prose and fenced code blocks. A fence opens
//! with three backticks, an optional language identifier made of word
//! characters and a line break, and closes at the next three backticks.
//!
//! An opening fence with no closing fence is not an error: everything
//! from the orphan fence to the end of the input stays in the trailing
//! prose segment, untouched.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fence delimiter
pub const FENCE: &str = "```";

/// Header label for code blocks without a language identifier
pub const UNSPECIFIED_LABEL: &str = "TEXT";

static FENCE_REGEX: OnceLock<Regex> = OnceLock::new();

fn fence_regex() -> &'static Regex {
    FENCE_REGEX.get_or_init(|| {
        Regex::new(r"(?s)```([A-Za-z0-9_]*)\n(.*?)```").expect("fence pattern must compile")
    })
}

/// One unit of a decomposed note body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Text outside any fence, verbatim
    Prose { text: String },
    /// A fenced region. `body` excludes the delimiter lines.
    CodeBlock { language: String, body: String },
}

impl Segment {
    pub fn prose(text: impl Into<String>) -> Self {
        Segment::Prose { text: text.into() }
    }

    pub fn code(language: impl Into<String>, body: impl Into<String>) -> Self {
        Segment::CodeBlock {
            language: language.into(),
            body: body.into(),
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Segment::CodeBlock { .. })
    }

    /// Header label for a code block, `None` for prose
    pub fn label(&self) -> Option<String> {
        match self {
            Segment::CodeBlock { language, .. } => Some(language_label(language)),
            Segment::Prose { .. } => None,
        }
    }

    /// The source text of this segment with fence markers reinserted
    pub fn to_source(&self) -> String {
        match self {
            Segment::Prose { text } => text.clone(),
            Segment::CodeBlock { language, body } => {
                format!("{FENCE}{language}\n{body}{FENCE}")
            }
        }
    }
}

/// Upper-cased language identifier, or `TEXT` when none was given
pub fn language_label(language: &str) -> String {
    if language.is_empty() {
        UNSPECIFIED_LABEL.to_string()
    } else {
        language.to_uppercase()
    }
}

fn push_prose(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::prose(text));
    }
}

/// Split raw note content into ordered segments
///
/// Empty prose between adjacent fences is omitted. Never fails.
pub fn segment(raw: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in fence_regex().captures_iter(raw) {
        let Some(whole) = caps.get(0) else { continue };
        push_prose(&mut segments, &raw[last..whole.start()]);
        segments.push(Segment::code(
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map_or("", |m| m.as_str()),
        ));
        last = whole.end();
    }

    let rest = &raw[last..];
    if let Some(offset) = rest.find(FENCE) {
        log::warn!(
            "Unmatched code fence at byte {}, keeping remainder as prose",
            last + offset
        );
    }
    push_prose(&mut segments, rest);

    segments
}

/// Rebuild note source from segments
///
/// `reassemble(&segment(s)) == s` for every input.
pub fn reassemble(segments: &[Segment]) -> String {
    segments.iter().map(Segment::to_source).collect()
}
