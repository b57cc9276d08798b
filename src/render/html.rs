//! HTML output
//!
//! Every piece of note text and every attribute value is escaped, so
//! note authors cannot inject markup through prose, code or fence
//! identifiers.

use super::{Block, Document};

/// Escape HTML-special characters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a document as an HTML fragment
pub fn to_html(doc: &Document) -> String {
    let mut out = String::new();

    for block in &doc.blocks {
        match block {
            Block::Prose { text } => {
                out.push_str("<p class=\"note-paragraph\">");
                out.push_str(&escape_html(text));
                out.push_str("</p>\n");
            }
            Block::Code { language, label, spans, .. } => {
                let class = if language.is_empty() { "text" } else { language.as_str() };
                out.push_str("<div class=\"code-block\">");
                out.push_str("<div class=\"code-header\"><span class=\"code-language\">");
                out.push_str(&escape_html(label));
                out.push_str("</span></div>");
                out.push_str("<pre><code class=\"language-");
                out.push_str(&escape_html(class));
                out.push_str("\">");
                for span in spans {
                    match &span.style_tag {
                        Some(tag) => {
                            out.push_str("<span style=\"color: ");
                            out.push_str(&escape_html(tag));
                            out.push_str("\">");
                            out.push_str(&escape_html(&span.text));
                            out.push_str("</span>");
                        }
                        None => out.push_str(&escape_html(&span.text)),
                    }
                }
                out.push_str("</code></pre></div>\n");
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::syntax::{LanguageRegistry, StyledSpan};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain ✓"), "plain ✓");
    }

    #[test]
    fn test_prose_is_escaped() {
        let doc = render("<script>alert(1)</script>", &LanguageRegistry::new());
        assert_eq!(
            to_html(&doc),
            "<p class=\"note-paragraph\">&lt;script&gt;alert(1)&lt;/script&gt;</p>\n"
        );
    }

    #[test]
    fn test_code_block_markup() {
        let doc = render("```js\nif (a < 2) {}\n```", &LanguageRegistry::new());
        let html = to_html(&doc);
        assert_eq!(
            html,
            "<div class=\"code-block\"><div class=\"code-header\">\
             <span class=\"code-language\">JS</span></div>\
             <pre><code class=\"language-js\">\
             <span style=\"color: #569CD6\">if</span> (a &lt; \
             <span style=\"color: #B5CEA8\">2</span>) {}\n</code></pre></div>\n"
        );
    }

    #[test]
    fn test_string_with_markup_is_escaped_once() {
        let doc = render("```html\n<p class=\"a\">x</p>\n```", &LanguageRegistry::new());
        let html = to_html(&doc);
        assert!(html.contains("<span style=\"color: #CE9178\">&quot;a&quot;</span>"));
        assert!(!html.contains("&amp;quot;"));
        assert!(html.contains("<code class=\"language-html\">"));
    }

    #[test]
    fn test_hostile_style_tag_is_escaped() {
        let doc = Document {
            blocks: vec![Block::Code {
                language: String::new(),
                label: "TEXT".to_string(),
                code: "x".to_string(),
                spans: vec![StyledSpan::styled("x", "red\"><script>")],
            }],
        };
        let html = to_html(&doc);
        assert!(html.contains("language-text"));
        assert!(html.contains("color: red&quot;&gt;&lt;script&gt;"));
    }
}
