//! End-to-end checks of segmentation, highlighting and rendering

use course_notes::render::{to_html, to_ansi, TerminalOptions};
use course_notes::syntax::{LanguageRegistry, Palette};
use course_notes::{highlight, reassemble, render, render_checked, segment, Block, NotesError, Segment, StyledSpan};

fn joined(spans: &[StyledSpan]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

#[test]
fn test_segmentation_round_trip() {
    let inputs = [
        "",
        "just prose",
        "before\n```js\nconst x = 1;\n```\nafter",
        "```\nno language\n```",
        "a```py\nprint(1)\n```b```sql\nSELECT 1\n```",
        "```rust\n```\n\n```css\na { color: red; }\n```\ntrailing",
    ];
    for raw in inputs {
        assert_eq!(reassemble(&segment(raw)), raw, "round trip of {:?}", raw);
    }
}

#[test]
fn test_no_fence_identity() {
    assert_eq!(segment("plain text"), vec![Segment::prose("plain text")]);
}

#[test]
fn test_basic_fence_extraction() {
    let segments = segment("before\n```js\nconst x = 1;\n```\nafter");
    assert_eq!(
        segments,
        vec![
            Segment::prose("before\n"),
            Segment::code("js", "const x = 1;\n"),
            Segment::prose("\nafter"),
        ]
    );
}

#[test]
fn test_unterminated_fence_keeps_text() {
    let raw = "text ```js\nno closing";
    let segments = segment(raw);
    let total: usize = segments.iter().map(|s| s.to_source().chars().count()).sum();
    assert_eq!(total, raw.chars().count());
    assert!(segments.iter().all(|s| !s.is_code()));
}

#[test]
fn test_highlight_total_coverage() {
    let cases = [
        ("", "javascript"),
        ("const x = 1;", "javascript"),
        ("def f():\n    return 'é' # ünïcode\n", "python"),
        ("/* open comment", "css"),
        ("'unclosed \"mixed` quotes", "sql"),
        ("SELECT * FROM t WHERE id = 42", "sql"),
        ("<div class=\"a\">日本語</div>", "html"),
        ("x = 1.5 // tail", "brainfuck"),
    ];
    for (body, language) in cases {
        assert_eq!(joined(&highlight(body, language)), body, "coverage of {:?}", body);
    }
}

#[test]
fn test_string_beats_keyword() {
    let spans = highlight("\"const\"", "javascript");
    assert_eq!(spans, vec![StyledSpan::styled("\"const\"", Palette::dark().string)]);
}

#[test]
fn test_comment_beats_everything() {
    let spans = highlight("// const x", "javascript");
    assert_eq!(spans, vec![StyledSpan::styled("// const x", Palette::dark().comment)]);
}

#[test]
fn test_apostrophe_in_comment_does_not_leak() {
    let palette = Palette::dark();
    let spans = highlight("// don't touch\nlet x = 'a';\n", "javascript");
    assert_eq!(
        spans,
        vec![
            StyledSpan::styled("// don't touch", palette.comment),
            StyledSpan::plain("\n"),
            StyledSpan::styled("let", palette.keyword),
            StyledSpan::plain(" x = "),
            StyledSpan::styled("'a'", palette.string),
            StyledSpan::plain(";\n"),
        ]
    );
}

#[test]
fn test_unknown_language_fallback() {
    let body = "const x = 1;";
    assert_eq!(highlight(body, "brainfuck"), highlight(body, "javascript"));
    assert_eq!(highlight(body, ""), highlight(body, "javascript"));
}

#[test]
fn test_number_word_boundary() {
    let number = Palette::dark().number;
    let spans = highlight("x1 = 23", "javascript");
    let numbers: Vec<&str> = spans
        .iter()
        .filter(|s| s.style_tag.as_deref() == Some(number.as_str()))
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(numbers, vec!["23"]);
    assert_eq!(joined(&spans), "x1 = 23");
}

#[test]
fn test_render_document() {
    let registry = LanguageRegistry::new();
    let doc = render("Intro\n```PY\nx = None\n```\n", &registry);
    assert_eq!(doc.code_block_count(), 1);
    match &doc.blocks[1] {
        Block::Code { language, label, code, spans } => {
            assert_eq!(language, "PY");
            assert_eq!(label, "PY");
            assert_eq!(code, "x = None\n");
            assert!(spans.iter().any(|s| s.text == "None" && s.style_tag.is_some()));
        }
        other => panic!("expected a code block, got {:?}", other),
    }
}

#[test]
fn test_html_output_is_escaped() {
    let registry = LanguageRegistry::new();
    let doc = render("<b>hi</b>\n```html\n<script>alert('x')</script>\n```", &registry);
    let html = to_html(&doc);
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<b>"));
    assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
    assert!(html.contains("<span class=\"code-language\">HTML</span>"));
}

#[test]
fn test_plain_terminal_output() {
    let registry = LanguageRegistry::new();
    let doc = render("Notes\n```\nlet a = 1;\n```\n", &registry);
    let options = TerminalOptions {
        color: false,
        ..TerminalOptions::default()
    };
    let text = to_ansi(&doc, &options).unwrap();
    assert!(text.contains("Notes"));
    assert!(text.contains("TEXT"));
    assert!(text.contains("let a = 1;"));
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn test_size_guard() {
    let registry = LanguageRegistry::new();
    let raw = "x".repeat(2048);
    assert!(matches!(
        render_checked(&raw, &registry, 1024),
        Err(NotesError::InputTooLarge { size: 2048, limit: 1024 })
    ));
    assert!(render_checked(&raw, &registry, 4096).is_ok());
}

#[test]
fn test_user_rule_set_overrides() {
    let mut registry = LanguageRegistry::new();
    registry
        .load_str("[languages.lua]\nkeywords = [\"local\", \"end\"]\naliases = [\"luau\"]\n")
        .unwrap();
    let spans = registry.highlight("local x = 1", "LUAU");
    assert_eq!(spans[0], StyledSpan::styled("local", Palette::dark().keyword));
    assert!(registry.list_languages().contains(&"lua"));
}
