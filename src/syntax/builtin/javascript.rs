//! JavaScript and JSX rule sets
//!
//! The `mjs` alias is new; the portal only knew `javascript` and `jsx`.

use super::install_keywords;
use crate::syntax::language::LanguageRuleSet;

/// Rule set used for empty and unknown language identifiers
pub const FALLBACK_LANGUAGE: &str = "javascript";

const KEYWORDS: &[&str] = &[
    "const", "let", "var", "function", "return", "if", "else", "for", "while", "class", "import",
    "export", "default", "async", "await", "new", "this", "true", "false", "null", "undefined",
];

/// Create JavaScript rule set
pub fn javascript_language() -> LanguageRuleSet {
    let mut lang = LanguageRuleSet::new(FALLBACK_LANGUAGE);
    lang.add_alias("js");
    lang.add_alias("mjs");
    install_keywords(&mut lang, KEYWORDS, false);
    lang
}

/// Create JSX rule set (same keywords as JavaScript)
pub fn jsx_language() -> LanguageRuleSet {
    let mut lang = LanguageRuleSet::new("jsx");
    install_keywords(&mut lang, KEYWORDS, false);
    lang
}
