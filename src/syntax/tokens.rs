//! Token types for code block highlighting
//!
//! Each token type carries a fixed priority used to resolve
//! overlapping candidate matches: comment > string > keyword > number.

/// Semantic token types recognised inside code blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// `// line` and `/* block */` comments
    Comment,
    /// Single, double or back-quoted literals
    String,
    /// Words from the language's keyword set
    Keyword,
    /// Integer and decimal literals
    Number,
    /// Plain text (no style tag)
    Default,
}

impl TokenType {
    /// Priority when two candidate matches cover the same character
    pub fn priority(&self) -> u8 {
        match self {
            TokenType::Comment => 4,
            TokenType::String => 3,
            TokenType::Keyword => 2,
            TokenType::Number => 1,
            TokenType::Default => 0,
        }
    }

}
