//! Terminal output using crossterm
//!
//! Hex style tags become 24-bit foreground colors. Tags that are not
//! hex colors are written unstyled.

use std::io::Write;

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{Block, Document};
use crate::error::Result;
use crate::syntax::Rgb;

/// Narrowest code block frame, in columns
const MIN_FRAME_WIDTH: usize = 24;

/// Terminal rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalOptions {
    /// Emit color escape sequences
    pub color: bool,
    /// Columns per tab stop
    pub tab_width: usize,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            color: true,
            tab_width: 4,
        }
    }
}

/// Expand tabs to spaces, tracking the display column across calls
fn expand_tabs(text: &str, tab_width: usize, col: &mut usize) -> String {
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\t' => {
                let pad = tab_width - (*col % tab_width);
                out.extend(std::iter::repeat(' ').take(pad));
                *col += pad;
            }
            '\n' => {
                out.push('\n');
                *col = 0;
            }
            _ => {
                out.push(ch);
                *col += UnicodeWidthChar::width(ch).unwrap_or(1);
            }
        }
    }
    out
}

/// Widest line of `code` in display columns, after tab expansion
fn display_width(code: &str, tab_width: usize) -> usize {
    let mut col = 0;
    expand_tabs(code, tab_width, &mut col)
        .lines()
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0)
}

fn write_header<W: Write>(out: &mut W, label: &str, width: usize) -> Result<()> {
    let used = 4 + UnicodeWidthStr::width(label);
    let fill = "─".repeat(width.saturating_sub(used));
    queue!(out, Print(format!("── {label} {fill}\n")))?;
    Ok(())
}

/// Write a document to a terminal-like writer
pub fn write_ansi<W: Write>(out: &mut W, doc: &Document, options: &TerminalOptions) -> Result<()> {
    let mut at_line_start = true;

    for block in &doc.blocks {
        match block {
            Block::Prose { text } => {
                let mut col = 0;
                queue!(out, Print(expand_tabs(text, options.tab_width, &mut col)))?;
                at_line_start = text.ends_with('\n');
            }
            Block::Code { label, code, spans, .. } => {
                let width = display_width(code, options.tab_width)
                    .max(UnicodeWidthStr::width(label.as_str()) + 8)
                    .max(MIN_FRAME_WIDTH);

                if !at_line_start {
                    queue!(out, Print("\n"))?;
                }
                write_header(out, label, width)?;

                let mut col = 0;
                for span in spans {
                    let text = expand_tabs(&span.text, options.tab_width, &mut col);
                    let rgb = span.style_tag.as_deref().and_then(Rgb::from_tag);
                    match rgb {
                        Some(Rgb { r, g, b }) if options.color => {
                            queue!(
                                out,
                                SetForegroundColor(Color::Rgb { r, g, b }),
                                Print(text),
                                ResetColor
                            )?;
                        }
                        _ => queue!(out, Print(text))?,
                    }
                }

                if !code.ends_with('\n') {
                    queue!(out, Print("\n"))?;
                }
                queue!(out, Print(format!("{}\n", "─".repeat(width))))?;
                at_line_start = true;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Render a document to a string with ANSI escapes
pub fn to_ansi(doc: &Document, options: &TerminalOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_ansi(&mut buf, doc, options)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::syntax::{LanguageRegistry, StyledSpan};

    fn plain() -> TerminalOptions {
        TerminalOptions {
            color: false,
            tab_width: 4,
        }
    }

    #[test]
    fn test_expand_tabs() {
        let mut col = 0;
        assert_eq!(expand_tabs("a\tb", 4, &mut col), "a   b");
        assert_eq!(col, 5);
        assert_eq!(expand_tabs("\tc\n\td", 4, &mut col), "   c\n    d");
        assert_eq!(col, 5);
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("ab\nabcd\n", 4), 4);
        assert_eq!(display_width("\tx", 8), 9);
        assert_eq!(display_width("漢字", 4), 4);
        assert_eq!(display_width("", 4), 0);
    }

    #[test]
    fn test_plain_output() {
        let doc = render("Intro\n```py\nx = 1\n```\nbye", &LanguageRegistry::new());
        let text = to_ansi(&doc, &plain()).unwrap();
        let rule = "─".repeat(24);
        let header = format!("── PY {}", "─".repeat(18));
        assert_eq!(text, format!("Intro\n{header}\nx = 1\n{rule}\n\nbye"));
    }

    #[test]
    fn test_code_after_inline_prose_starts_new_line() {
        let doc = render("see ```js\nx\n```", &LanguageRegistry::new());
        let text = to_ansi(&doc, &plain()).unwrap();
        assert!(text.starts_with("see \n── JS "));
    }

    #[test]
    fn test_colored_output() {
        let doc = Document {
            blocks: vec![Block::Code {
                language: "js".to_string(),
                label: "JS".to_string(),
                code: "let\n".to_string(),
                spans: vec![
                    StyledSpan::styled("let", "#569CD6"),
                    StyledSpan::styled("\n", "not-a-color"),
                ],
            }],
        };
        let text = to_ansi(&doc, &TerminalOptions::default()).unwrap();
        assert!(text.contains("\x1b[38;2;86;156;214mlet"));
        assert!(text.contains("\x1b[0m"));
    }
}
