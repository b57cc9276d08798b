//! Language registry
//!
//! Maps case-folded language identifiers (and aliases) to rule sets.
//! The built-in registry is created once per process and only read
//! afterwards; a registry extended from a rule-set file is built once at
//! startup and then shared by reference.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use super::builtin::{self, FALLBACK_LANGUAGE};
use super::language::LanguageRuleSet;
use super::style::{Palette, StyledSpan};
use crate::error::{NotesError, Result};

static BUILTIN_REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

/// Rule-set file layout:
///
/// ```toml
/// [languages.rust]
/// keywords = ["fn", "let", "mut"]
/// aliases = ["rs"]
/// keyword = "#C586C0"
/// case_insensitive = false
/// ```
#[derive(Debug, Deserialize)]
struct RuleSetFile {
    #[serde(default)]
    languages: BTreeMap<String, RuleSetEntry>,
}

#[derive(Debug, Deserialize)]
struct RuleSetEntry {
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    case_insensitive: bool,
    keyword: Option<String>,
    string: Option<String>,
    comment: Option<String>,
    number: Option<String>,
}

impl RuleSetEntry {
    fn into_rule_set(self, key: &str) -> Result<LanguageRuleSet> {
        let invalid = |reason: String| NotesError::InvalidRuleSet {
            language: key.to_string(),
            reason,
        };

        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("language key must be made of word characters".to_string()));
        }

        let mut palette = Palette::default();
        for (slot, value) in [
            (&mut palette.keyword, self.keyword),
            (&mut palette.string, self.string),
            (&mut palette.comment, self.comment),
            (&mut palette.number, self.number),
        ] {
            if let Some(tag) = value {
                if tag.trim().is_empty() {
                    return Err(invalid("style tags must not be empty".to_string()));
                }
                *slot = tag;
            }
        }

        let mut lang = LanguageRuleSet::new(key);
        lang.palette = palette;
        for alias in &self.aliases {
            lang.add_alias(alias);
        }
        lang.set_keywords(&self.keywords, self.case_insensitive)
            .map_err(|e| invalid(e.to_string()))?;
        Ok(lang)
    }
}

/// Lookup table from language identifier to rule set
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    /// Rule sets by lowercase name
    languages: HashMap<String, LanguageRuleSet>,
    /// Alias to language name mapping
    alias_map: HashMap<String, String>,
    /// Rule set for empty and unknown identifiers
    fallback: LanguageRuleSet,
}

impl LanguageRegistry {
    /// Create a registry with the built-in languages
    pub fn new() -> Self {
        let mut registry = Self {
            languages: HashMap::new(),
            alias_map: HashMap::new(),
            fallback: LanguageRuleSet::new(FALLBACK_LANGUAGE),
        };

        for lang in builtin::all_languages() {
            registry.add_language(lang);
        }

        registry
    }

    /// Process-wide built-in registry
    pub fn builtin() -> &'static LanguageRegistry {
        BUILTIN_REGISTRY.get_or_init(LanguageRegistry::new)
    }

    /// Add or replace a rule set
    pub fn add_language(&mut self, lang: LanguageRuleSet) {
        let name = lang.name.clone();
        for alias in &lang.aliases {
            self.alias_map.insert(alias.clone(), name.clone());
        }
        if name == FALLBACK_LANGUAGE {
            self.fallback = lang.clone();
        }
        self.languages.insert(name, lang);
    }

    /// Get a rule set by name or alias, ignoring case
    pub fn get(&self, language: &str) -> Option<&LanguageRuleSet> {
        let key = language.trim().to_lowercase();
        self.languages.get(&key).or_else(|| {
            self.alias_map
                .get(&key)
                .and_then(|name| self.languages.get(name))
        })
    }

    /// Get a rule set, falling back to JavaScript. Never fails.
    pub fn resolve(&self, language: &str) -> &LanguageRuleSet {
        match self.get(language) {
            Some(lang) => lang,
            None => {
                if !language.trim().is_empty() {
                    log::debug!("Unknown language '{}', using {}", language, FALLBACK_LANGUAGE);
                }
                &self.fallback
            }
        }
    }

    /// Highlight a code body with the rule set for `language`
    pub fn highlight(&self, body: &str, language: &str) -> Vec<StyledSpan> {
        self.resolve(language).highlight(body)
    }

    /// List available language names
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Load extra rule sets from TOML text. Returns how many were added.
    ///
    /// Entries replace built-ins with the same name.
    pub fn load_str(&mut self, contents: &str) -> Result<usize> {
        let file: RuleSetFile = toml::from_str(contents)?;
        let mut added = 0;
        for (key, entry) in file.languages {
            let lang = entry.into_rule_set(&key.to_lowercase())?;
            log::debug!("Loaded rule set '{}' ({} keywords)", lang.name, lang.keywords().len());
            self.add_language(lang);
            added += 1;
        }
        Ok(added)
    }

    /// Load extra rule sets from a TOML file
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let contents = fs::read_to_string(path)?;
        let added = self.load_str(&contents)?;
        log::info!("Loaded {} rule set(s) from {}", added, path.display());
        Ok(added)
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
