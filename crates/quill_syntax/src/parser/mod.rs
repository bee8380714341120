//! Parser for the Quill language.
//!
//! Converts a token stream into a concrete syntax tree. Parsing never aborts:
//! malformed input produces diagnostic leaves at the points of recovery and
//! the parse continues at the next statement boundary, so a single pass can
//! report every error in a file.
//!
//! ## Module structure
//! - `combinators` - the grammar primitives (token matching, sequencing,
//!   alternation, repetition, forward declaration, recovery)
//! - `expression` - generic precedence-climbing expression parsing
//! - `grammar` - the full Quill rule set
//!
//! ## Examples
//! ```rust
//! use quill_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("package demo; fun main() { }");
//! let result = parser::parse(&tokens);
//! assert!(result.diagnostics.is_empty());
//! ```

pub mod combinators;
pub mod expression;
mod grammar;


use crate::diagnostics::Diagnostic;
use crate::lexer::tokens::Token;
use crate::tree::{Child, NodeKind, SyntaxNode};

/// The outcome of a parse: a tree plus every diagnostic recorded in it.
///
/// "Parsed cleanly" is exactly `diagnostics.is_empty()`; there is no other
/// error channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Root of the syntax tree, always of kind [`NodeKind::Program`].
    pub tree: SyntaxNode,
    /// The tree's diagnostic leaves, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a token stream into a [`ParseResult`].
///
/// This is the main public entrypoint for parsing. It always returns a tree;
/// callers distinguish clean from erroneous parses by checking
/// [`ParseResult::diagnostics`].
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> ParseResult {
    let tree = match grammar::program().parse(tokens, 0) {
        Ok((_, children)) => match children.into_iter().next() {
            Some(Child::Node(node)) => node,
            // The program rule always yields exactly one node; an empty
            // outcome would indicate a grammar bug, so degrade gracefully.
            _ => SyntaxNode::new(NodeKind::Program, Vec::new()),
        },
        Err(fatal) => SyntaxNode::new(NodeKind::Program, vec![Child::Diagnostic(fatal)]),
    };

    let mut diagnostics = Vec::new();
    tree.collect_diagnostics(&mut diagnostics);
    if !diagnostics.is_empty() {
        tracing::debug!(count = diagnostics.len(), "parse finished with diagnostics");
    }
    ParseResult { tree, diagnostics }
}
