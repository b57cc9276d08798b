//! Style types for highlighted code
//!
//! Style tags are opaque strings (usually CSS colors such as `#569CD6`).
//! The highlighter only attaches them to spans; renderers decide what
//! they mean.

use serde::{Deserialize, Serialize};

use super::tokens::TokenType;

/// Style tags attached to each token type of a language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub keyword: String,
    pub string: String,
    pub comment: String,
    pub number: String,
}

impl Palette {
    /// Dark editor palette used by the notes portal
    pub fn dark() -> Self {
        Self {
            keyword: "#569CD6".to_string(),
            string: "#CE9178".to_string(),
            comment: "#6A9955".to_string(),
            number: "#B5CEA8".to_string(),
        }
    }

    /// Builder: replace the keyword tag
    pub fn with_keyword(mut self, tag: &str) -> Self {
        self.keyword = tag.to_string();
        self
    }

    /// Style tag for a token type, `None` for plain text
    pub fn tag_for(&self, token_type: TokenType) -> Option<&str> {
        match token_type {
            TokenType::Keyword => Some(&self.keyword),
            TokenType::String => Some(&self.string),
            TokenType::Comment => Some(&self.comment),
            TokenType::Number => Some(&self.number),
            TokenType::Default => None,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

/// A classified byte range of a code body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Token type covering the whole range
    pub token_type: TokenType,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, token_type: TokenType) -> Self {
        Self { start, end, token_type }
    }
}

/// A run of code text with at most one style tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    pub text: String,
    /// `None` means default, unstyled text
    pub style_tag: Option<String>,
}

impl StyledSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_tag: None,
        }
    }

    pub fn styled(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_tag: Some(tag.into()),
        }
    }
}

/// An RGB color decoded from a `#RRGGBB` or `#RGB` style tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Decode a hex style tag. Anything else yields `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let hex = tag.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => Some(Self {
                r: u8::from_str_radix(&hex[0..2], 16).ok()?,
                g: u8::from_str_radix(&hex[2..4], 16).ok()?,
                b: u8::from_str_radix(&hex[4..6], 16).ok()?,
            }),
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
                Some(Self {
                    r: digit(0)?,
                    g: digit(1)?,
                    b: digit(2)?,
                })
            }
            _ => None,
        }
    }
}
