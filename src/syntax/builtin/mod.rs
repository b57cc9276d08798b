//! Built-in language rule sets
//!
//! Keyword lists and colors match the notes portal's editor theme.

mod css;
mod html;
mod javascript;
mod python;
mod sql;

use super::language::LanguageRuleSet;

pub use javascript::FALLBACK_LANGUAGE;

/// Get all built-in language rule sets
pub fn all_languages() -> Vec<LanguageRuleSet> {
    vec![
        javascript::javascript_language(),
        javascript::jsx_language(),
        python::python_language(),
        html::html_language(),
        css::css_language(),
        sql::sql_language(),
    ]
}

/// Install keywords on a built-in rule set, logging instead of failing
fn install_keywords(lang: &mut LanguageRuleSet, keywords: &[&str], case_insensitive: bool) {
    if let Err(e) = lang.set_keywords(keywords, case_insensitive) {
        log::warn!("Built-in keywords for {} rejected: {}", lang.name, e);
    }
}
