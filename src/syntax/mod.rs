//! Code block highlighting
//!
//! Turns the body of a fenced code block into a flat list of styled
//! spans using per-language keyword rules and shared lexical rules for
//! strings, comments and numbers.

mod builtin;
mod language;
mod registry;
mod rules;
mod style;
mod tokens;

pub use builtin::FALLBACK_LANGUAGE;
pub use language::LanguageRuleSet;
pub use registry::LanguageRegistry;
pub use rules::PatternRule;
pub use style::{Palette, Rgb, Span, StyledSpan};
pub use tokens::TokenType;

/// Highlight `body` with the built-in rule set for `language`
///
/// Unknown or empty identifiers use the JavaScript rule set. The
/// returned spans cover every character of `body` exactly once.
pub fn highlight(body: &str, language: &str) -> Vec<StyledSpan> {
    LanguageRegistry::builtin().highlight(body, language)
}
