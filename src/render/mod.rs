//! Note rendering
//!
//! Runs the segmenter over raw note content, highlights every code block
//! and produces a `Document` that the HTML and terminal writers turn
//! into output in a single pass over the spans.

mod html;
mod terminal;

use serde::{Deserialize, Serialize};

pub use html::{escape_html, to_html};
pub use terminal::{to_ansi, write_ansi, TerminalOptions};

use crate::error::{NotesError, Result};
use crate::segment::{language_label, segment, Segment};
use crate::syntax::{LanguageRegistry, StyledSpan};

/// One renderable block of a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Prose {
        text: String,
    },
    Code {
        /// Identifier as written on the fence (may be empty)
        language: String,
        /// Header label, upper-cased or `TEXT`
        label: String,
        /// Unmodified body, for copy actions
        code: String,
        spans: Vec<StyledSpan>,
    },
}

/// A rendered note: prose and highlighted code blocks in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of code blocks in the document
    pub fn code_block_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Code { .. }))
            .count()
    }
}

/// Render raw note content with the given registry
pub fn render(raw: &str, registry: &LanguageRegistry) -> Document {
    let blocks = segment(raw)
        .into_iter()
        .map(|seg| match seg {
            Segment::Prose { text } => Block::Prose { text },
            Segment::CodeBlock { language, body } => Block::Code {
                label: language_label(&language),
                spans: registry.highlight(&body, &language),
                language,
                code: body,
            },
        })
        .collect();

    Document { blocks }
}

/// Render, rejecting input larger than `max_bytes` up front
pub fn render_checked(raw: &str, registry: &LanguageRegistry, max_bytes: usize) -> Result<Document> {
    if raw.len() > max_bytes {
        return Err(NotesError::InputTooLarge {
            size: raw.len(),
            limit: max_bytes,
        });
    }
    Ok(render(raw, registry))
}
