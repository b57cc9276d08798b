//! HTML rule set
//!
//! Tag names stand in for keywords and get their own color. The `htm`
//! alias is new; the portal sent it to the JavaScript rules.

use super::install_keywords;
use crate::syntax::language::LanguageRuleSet;
use crate::syntax::style::Palette;

const TAG_NAMES: &[&str] = &[
    "html", "head", "body", "div", "span", "p", "a", "img", "script", "style", "meta", "link",
    "title",
];

/// Create HTML rule set
pub fn html_language() -> LanguageRuleSet {
    let mut lang = LanguageRuleSet::new("html");
    lang.add_alias("htm");
    lang.palette = Palette::dark().with_keyword("#D7BA7D");
    install_keywords(&mut lang, TAG_NAMES, false);
    lang
}
