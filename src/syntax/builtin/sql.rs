//! SQL rule set
//!
//! Keywords match as upper-case literals only; `select` stays plain.
//! The `postgres` and `sqlite` aliases are new; the portal sent those
//! identifiers to the JavaScript rules.

use super::install_keywords;
use crate::syntax::language::LanguageRuleSet;

const KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER", "TABLE",
    "DATABASE", "JOIN", "LEFT", "RIGHT", "INNER", "OUTER", "ON", "AS", "AND", "OR", "NOT", "IN",
    "LIKE",
];

/// Create SQL rule set
pub fn sql_language() -> LanguageRuleSet {
    let mut lang = LanguageRuleSet::new("sql");
    lang.add_alias("postgres");
    lang.add_alias("sqlite");
    install_keywords(&mut lang, KEYWORDS, false);
    lang
}
