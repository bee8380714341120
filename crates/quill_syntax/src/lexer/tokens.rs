//! Token types for the Quill lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words (including word operators)
//! - `Operator(OperatorId)` for symbol operators
//! - `Punctuation(PunctuationId)` for delimiters, separators, and arrows
//!
//! ## Notes
//! - ID-bearing tokens avoid stringly-typed checks in the parser.
//! - Both `;` and a run of newlines lex as a single [`TokenKind::LineEnd`]
//!   token; the parser treats them as the end-of-statement marker and drops
//!   newline-spelled ones from the tree.
//! - There is no end-of-file token; the parser works with token indices and
//!   treats `index == tokens.len()` as end of input.

use quill_core::lang::keywords::{self, KeywordId};
use quill_core::lang::operators::OperatorId;
use quill_core::lang::punctuation::PunctuationId;

/// A half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and literals ==========
    Identifier,
    Number,
    Character,
    String,

    // ========== Layout ==========
    /// End-of-statement marker: a `;` or a run of newlines.
    LineEnd,

    // ========== Special ==========
    /// A span the lexer could not classify. The lexer never fails; invalid
    /// input surfaces as tokens of this kind for the parser to report.
    Invalid,
}

impl TokenKind {
    /// Human-readable description used in parser failure messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(id) => format!("`{}`", keywords::as_str(*id)),
            TokenKind::Operator(id) => {
                format!("`{}`", quill_core::lang::operators::info_for(*id).spelling)
            }
            TokenKind::Punctuation(id) => {
                format!("`{}`", quill_core::lang::punctuation::as_str(*id))
            }
            TokenKind::Identifier => "an identifier".to_string(),
            TokenKind::Number => "a number".to_string(),
            TokenKind::Character => "a character literal".to_string(),
            TokenKind::String => "a string literal".to_string(),
            TokenKind::LineEnd => "end of statement".to_string(),
            TokenKind::Invalid => "invalid input".to_string(),
        }
    }
}

/// A token with its kind, the exact source text it covers, and its span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Return `true` for newline-spelled end-of-statement markers, which are
    /// consumed without contributing a tree leaf.
    pub fn is_newline_marker(&self) -> bool {
        matches!(self.kind, TokenKind::LineEnd) && self.text.starts_with('\n')
    }

    /// Human-readable description used in parser failure messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::LineEnd if self.is_newline_marker() => "a new line".to_string(),
            _ => format!("`{}`", self.text),
        }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
