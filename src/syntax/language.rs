//! Language rule sets for code block highlighting
//!
//! A `LanguageRuleSet` combines a keyword list with the palette used to
//! tag keywords, strings, comments and numbers. Strings, comments and
//! numbers use the same lexical rules for every language.

use std::cmp::Reverse;

use super::rules::{comment_rule, number_rule, string_rule, PatternRule};
use super::style::{Palette, Span, StyledSpan};
use super::tokens::TokenType;
use crate::error::Result;

/// Keyword list and style tags for one language
#[derive(Debug, Clone)]
pub struct LanguageRuleSet {
    /// Lowercase lookup key (e.g., "javascript", "python")
    pub name: String,
    /// Additional lookup keys (e.g., ["js"])
    pub aliases: Vec<String>,
    /// Style tags per token type
    pub palette: Palette,
    keywords: Vec<String>,
    case_insensitive: bool,
    keyword_rule: Option<PatternRule>,
}

impl LanguageRuleSet {
    /// Create a rule set with no keywords and the default palette
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            aliases: Vec::new(),
            palette: Palette::default(),
            keywords: Vec::new(),
            case_insensitive: false,
            keyword_rule: None,
        }
    }

    /// Add a lookup alias
    pub fn add_alias(&mut self, alias: &str) {
        self.aliases.push(alias.to_lowercase());
    }

    /// Replace the keyword list, recompiling the keyword rule
    pub fn set_keywords<S: AsRef<str>>(&mut self, keywords: &[S], case_insensitive: bool) -> Result<()> {
        self.keyword_rule = PatternRule::keywords(keywords, case_insensitive)?;
        self.keywords = keywords.iter().map(|k| k.as_ref().to_string()).collect();
        self.case_insensitive = case_insensitive;
        Ok(())
    }

    /// Keywords in declaration order
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whether keyword matching ignores case
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Tokenize `body` in one left-to-right pass into contiguous runs.
    ///
    /// The runs partition `body` exactly. At each position the earliest
    /// candidate match wins, ties going to the higher priority token
    /// type. Comments and strings are consumed whole, so nothing inside
    /// them can start another token.
    pub fn classify(&self, body: &str) -> Vec<Span> {
        let rules: Vec<&PatternRule> = [comment_rule(), string_rule()]
            .into_iter()
            .chain(self.keyword_rule.as_ref())
            .chain([number_rule()])
            .collect();

        // Next candidate per rule, refreshed once the scan passes its start
        let mut candidates: Vec<Option<Span>> = rules.iter().map(|rule| rule.find_at(body, 0)).collect();
        let mut spans = Vec::new();
        let mut pos = 0;

        while pos < body.len() {
            for (rule, candidate) in rules.iter().zip(candidates.iter_mut()) {
                if matches!(candidate, Some(span) if span.start < pos) {
                    *candidate = rule.find_at(body, pos);
                }
            }

            let next = candidates
                .iter()
                .flatten()
                .min_by_key(|span| (span.start, Reverse(span.token_type.priority())));
            let Some(&token) = next else { break };

            push_run(&mut spans, Span::new(pos, token.start, TokenType::Default));
            push_run(&mut spans, token);
            pos = token.end;
        }

        push_run(&mut spans, Span::new(pos, body.len(), TokenType::Default));
        spans
    }

    /// Highlight a code body into styled spans
    pub fn highlight(&self, body: &str) -> Vec<StyledSpan> {
        self.classify(body)
            .into_iter()
            .map(|span| StyledSpan {
                text: body[span.start..span.end].to_string(),
                style_tag: self.palette.tag_for(span.token_type).map(str::to_string),
            })
            .collect()
    }
}

/// Append a run, merging it into the previous run of the same type
fn push_run(spans: &mut Vec<Span>, run: Span) {
    if run.start >= run.end {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.token_type == run.token_type && last.end == run.start => last.end = run.end,
        _ => spans.push(run),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_language() -> LanguageRuleSet {
        let mut lang = LanguageRuleSet::new("Test");
        lang.add_alias("TST");
        lang.set_keywords(&["let", "const"], false).unwrap();
        lang
    }

    fn kinds(lang: &LanguageRuleSet, body: &str) -> Vec<(TokenType, String)> {
        lang.classify(body)
            .into_iter()
            .map(|s| (s.token_type, body[s.start..s.end].to_string()))
            .collect()
    }

    #[test]
    fn test_names_lowercased() {
        let lang = create_test_language();
        assert_eq!(lang.name, "test");
        assert_eq!(lang.aliases, vec!["tst".to_string()]);
        assert_eq!(lang.keywords(), &["let".to_string(), "const".to_string()]);
    }

    #[test]
    fn test_simple_highlighting() {
        let lang = create_test_language();
        assert_eq!(
            kinds(&lang, "let x = 42;"),
            vec![
                (TokenType::Keyword, "let".to_string()),
                (TokenType::Default, " x = ".to_string()),
                (TokenType::Number, "42".to_string()),
                (TokenType::Default, ";".to_string()),
            ]
        );
    }

    #[test]
    fn test_string_beats_keyword() {
        let lang = create_test_language();
        assert_eq!(kinds(&lang, r#""const""#), vec![(TokenType::String, r#""const""#.to_string())]);
    }

    #[test]
    fn test_comment_beats_string_and_keyword() {
        let lang = create_test_language();
        assert_eq!(
            kinds(&lang, "x // let 'a' 1\ny"),
            vec![
                (TokenType::Default, "x ".to_string()),
                (TokenType::Comment, "// let 'a' 1".to_string()),
                (TokenType::Default, "\ny".to_string()),
            ]
        );
    }

    #[test]
    fn test_quote_inside_block_comment_stays_in_comment() {
        let lang = create_test_language();
        assert_eq!(
            kinds(&lang, "/* 'a */ b' c"),
            vec![
                (TokenType::Comment, "/* 'a */".to_string()),
                (TokenType::Default, " b' c".to_string()),
            ]
        );
    }

    #[test]
    fn test_apostrophe_in_line_comment_before_string() {
        let lang = create_test_language();
        assert_eq!(
            kinds(&lang, "// don't touch\nlet x = 'a';\n"),
            vec![
                (TokenType::Comment, "// don't touch".to_string()),
                (TokenType::Default, "\n".to_string()),
                (TokenType::Keyword, "let".to_string()),
                (TokenType::Default, " x = ".to_string()),
                (TokenType::String, "'a'".to_string()),
                (TokenType::Default, ";\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_comment_marker_inside_string_stays_in_string() {
        let lang = create_test_language();
        assert_eq!(
            kinds(&lang, "let u = \"http://x\"; // 1"),
            vec![
                (TokenType::Keyword, "let".to_string()),
                (TokenType::Default, " u = ".to_string()),
                (TokenType::String, "\"http://x\"".to_string()),
                (TokenType::Default, "; ".to_string()),
                (TokenType::Comment, "// 1".to_string()),
            ]
        );
    }

    #[test]
    fn test_adjacent_strings_merge_into_one_run() {
        let lang = create_test_language();
        assert_eq!(kinds(&lang, "'a''b'"), vec![(TokenType::String, "'a''b'".to_string())]);
    }

    #[test]
    fn test_multibyte_text_partitions_on_char_boundaries() {
        let lang = create_test_language();
        let body = "let é = \"ü\"; // ✓";
        let spans = lang.highlight(body);
        let joined: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, body);
    }

    #[test]
    fn test_highlight_tags_and_empty_body() {
        let lang = create_test_language();
        assert!(lang.highlight("").is_empty());

        let spans = lang.highlight("const 7");
        assert_eq!(
            spans,
            vec![
                StyledSpan::styled("const", "#569CD6"),
                StyledSpan::plain(" "),
                StyledSpan::styled("7", "#B5CEA8"),
            ]
        );
    }

    #[test]
    fn test_no_keywords() {
        let lang = LanguageRuleSet::new("plain");
        assert_eq!(kinds(&lang, "let"), vec![(TokenType::Default, "let".to_string())]);
    }
}
