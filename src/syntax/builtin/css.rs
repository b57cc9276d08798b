//! CSS rule set (property names as keywords)

use super::install_keywords;
use crate::syntax::language::LanguageRuleSet;

const PROPERTIES: &[&str] = &[
    "color", "background", "margin", "padding", "border", "width", "height", "display", "flex",
    "grid", "font", "text", "position", "absolute", "relative",
];

/// Create CSS rule set
pub fn css_language() -> LanguageRuleSet {
    let mut lang = LanguageRuleSet::new("css");
    install_keywords(&mut lang, PROPERTIES, false);
    lang
}
