//! Pattern rules for code block highlighting
//!
//! Rules only find candidate matches in the unmodified code body. The
//! tokenizer in `language.rs` decides which candidates become tokens.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use super::style::Span;
use super::tokens::TokenType;
use crate::error::Result;

/// Quoted regions up to the next matching quote character. Single and
/// double quotes stay on one line; backticks may span lines.
const STRING_PATTERN: &str = r#""[^"\n]*"|'[^'\n]*'|`[^`]*`"#;

/// `//` to end of line, or `/*` to the next `*/` or end of input
const COMMENT_PATTERN: &str = r"//[^\n]*|(?s:/\*.*?(?:\*/|\z))";

/// Digits with an optional decimal part, bounded by non-word characters
const NUMBER_PATTERN: &str = r"\b[0-9]+(?:\.[0-9]+)?\b";

static STRING_RULE: OnceLock<PatternRule> = OnceLock::new();
static COMMENT_RULE: OnceLock<PatternRule> = OnceLock::new();
static NUMBER_RULE: OnceLock<PatternRule> = OnceLock::new();

/// A regex rule that assigns one token type to each match
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Token type to assign to matches
    pub token_type: TokenType,
}

impl PatternRule {
    /// Create a new pattern rule
    pub fn new(pattern: &str, token_type: TokenType) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            token_type,
        })
    }

    /// Build a whole-word keyword rule. Returns `None` for an empty list.
    pub fn keywords<S: AsRef<str>>(words: &[S], case_insensitive: bool) -> Result<Option<Self>> {
        let alternatives: Vec<String> = words
            .iter()
            .map(|w| w.as_ref().trim())
            .filter(|w| !w.is_empty())
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return Ok(None);
        }

        let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternatives.join("|")))
            .case_insensitive(case_insensitive)
            .build()?;

        Ok(Some(Self {
            pattern,
            token_type: TokenType::Keyword,
        }))
    }

    /// First non-empty match at or after `start`, as a span
    ///
    /// Word boundaries look at the text before `start`, so a scan that
    /// resumes mid-line still sees whole words only.
    pub fn find_at(&self, text: &str, start: usize) -> Option<Span> {
        if start >= text.len() {
            return None;
        }
        self.pattern
            .find_at(text, start)
            .filter(|m| !m.is_empty())
            .map(|m| Span::new(m.start(), m.end(), self.token_type))
    }
}

fn shared_rule(cell: &'static OnceLock<PatternRule>, pattern: &str, token_type: TokenType) -> &'static PatternRule {
    cell.get_or_init(|| PatternRule::new(pattern, token_type).expect("built-in highlight pattern must compile"))
}

/// Rule for quoted string literals, shared by every language
pub fn string_rule() -> &'static PatternRule {
    shared_rule(&STRING_RULE, STRING_PATTERN, TokenType::String)
}

/// Rule for line and block comments, shared by every language
pub fn comment_rule() -> &'static PatternRule {
    shared_rule(&COMMENT_RULE, COMMENT_PATTERN, TokenType::Comment)
}

/// Rule for numeric literals, shared by every language
pub fn number_rule() -> &'static PatternRule {
    shared_rule(&NUMBER_RULE, NUMBER_PATTERN, TokenType::Number)
}
