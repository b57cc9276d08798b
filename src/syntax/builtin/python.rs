//! Python rule set
//!
//! Unlike the portal, `py` maps here instead of falling back to JavaScript.

use super::install_keywords;
use crate::syntax::language::LanguageRuleSet;

const KEYWORDS: &[&str] = &[
    "def", "class", "if", "else", "elif", "for", "while", "return", "import", "from", "as", "True",
    "False", "None", "and", "or", "not", "in", "is", "lambda", "try", "except", "finally", "with",
];

/// Create Python rule set
pub fn python_language() -> LanguageRuleSet {
    let mut lang = LanguageRuleSet::new("python");
    lang.add_alias("py");
    install_keywords(&mut lang, KEYWORDS, false);
    lang
}
