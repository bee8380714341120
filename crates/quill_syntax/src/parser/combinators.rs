//! Grammar combinators.
//!
//! A [`Parser`] is a value: a boxed function from `(tokens, position)` to
//! either `(new position, children)` or a fatal failure. Primitives compose
//! into larger parsers; the grammar in [`crate::parser::grammar`] is built
//! entirely out of them.
//!
//! ## Failure semantics
//! Failure is fatal-but-local: an `Err` unwinds to the nearest [`choice`],
//! [`maybe`], or repetition combinator that can absorb it. Because children
//! travel in the `Ok` value, a failed alternative's partial children are
//! dropped with it and the caller's position is untouched — backtracking
//! cannot leave partial tree mutations or consumed tokens behind.
//!
//! Whether a failure becomes a tree diagnostic is decided by the wrapping
//! rule: `choice`/`maybe` discard it silently, while a rule with an explicit
//! [`error`] alternative or a [`recover`] step converts it into a recorded
//! [`Diagnostic`] leaf and resumes parsing.

use std::cell::OnceCell;
use std::rc::Rc;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::lexer::tokens::{Token, TokenKind};
use crate::tree::{Child, NodeKind, SyntaxNode};

use quill_core::lang::keywords::KeywordId;
use quill_core::lang::operators::OperatorId;
use quill_core::lang::punctuation::PunctuationId;

/// Result of running a parser: the new position plus the children produced,
/// or a fatal (but always locally absorbable) failure.
pub type ParseOutcome = Result<(usize, Vec<Child>), Diagnostic>;

/// A composable parser over a token stream.
///
/// Cloning is cheap (reference-counted); rules that appear in several places
/// in the grammar are cloned freely.
#[derive(Clone)]
pub struct Parser {
    run: Rc<dyn Fn(&[Token], usize) -> ParseOutcome>,
}

impl Parser {
    /// Wrap a bare parsing function.
    pub fn from_fn(f: impl Fn(&[Token], usize) -> ParseOutcome + 'static) -> Self {
        Self { run: Rc::new(f) }
    }

    /// Run this parser at `position`.
    pub fn parse(&self, tokens: &[Token], position: usize) -> ParseOutcome {
        (self.run)(tokens, position)
    }
}

// ============================================================================
// Primitive parsers
// ============================================================================

/// Parse a single token of the given kind. Fails without advancing if it is
/// not present.
///
/// Newline-spelled end-of-statement tokens are consumed without contributing
/// a child, so tree text reconstruction skips them.
pub fn token(kind: TokenKind) -> Parser {
    Parser::from_fn(move |tokens, position| match tokens.get(position) {
        None => Err(Diagnostic::out_of_tokens(&kind.describe(), position)),
        Some(tok) if tok.kind == kind => {
            let children = if tok.is_newline_marker() {
                Vec::new()
            } else {
                vec![Child::Token(tok.clone())]
            };
            Ok((position + 1, children))
        }
        Some(tok) => Err(Diagnostic::expected(&kind.describe(), &tok.describe(), position)),
    })
}

/// Parse a keyword token.
pub fn keyword(id: KeywordId) -> Parser {
    token(TokenKind::Keyword(id))
}

/// Parse an operator token.
pub fn operator(id: OperatorId) -> Parser {
    token(TokenKind::Operator(id))
}

/// Parse a punctuation token.
pub fn punct(id: PunctuationId) -> Parser {
    token(TokenKind::Punctuation(id))
}

/// Parse each sub-parser in order, accumulating children. Fails on the first
/// failure, discarding the partial children.
pub fn sequence(parsers: Vec<Parser>) -> Parser {
    Parser::from_fn(move |tokens, position| {
        let mut pos = position;
        let mut children = Vec::new();
        for parser in &parsers {
            let (next, mut produced) = parser.parse(tokens, pos)?;
            pos = next;
            children.append(&mut produced);
        }
        Ok((pos, children))
    })
}

/// Try each alternative at the same starting position and return the first
/// success. If all alternatives fail, the **last** alternative's failure is
/// returned — grammars put the most specific candidate last.
pub fn choice(parsers: Vec<Parser>) -> Parser {
    assert!(!parsers.is_empty(), "choice requires at least one alternative");
    Parser::from_fn(move |tokens, position| {
        let mut failure = None;
        for parser in &parsers {
            match parser.parse(tokens, position) {
                Ok(success) => return Ok(success),
                Err(e) => failure = Some(e),
            }
        }
        Err(failure.unwrap_or_else(|| Diagnostic::new(DiagnosticKind::SyntaxError, position)))
    })
}

/// Try the given parser; on failure, rewind and succeed with no children.
pub fn maybe(parser: Parser) -> Parser {
    Parser::from_fn(move |tokens, position| {
        Ok(parser.parse(tokens, position).unwrap_or((position, Vec::new())))
    })
}

/// Parse zero or more occurrences, keeping successful iterations and
/// rewinding only the failed attempt.
///
/// An iteration that succeeds without advancing ends the loop; without this
/// guard a zero-width inner parser would repeat forever.
pub fn zero_or_more(parser: Parser) -> Parser {
    Parser::from_fn(move |tokens, position| {
        let mut pos = position;
        let mut children = Vec::new();
        while let Ok((next, mut produced)) = parser.parse(tokens, pos) {
            if next == pos {
                break;
            }
            pos = next;
            children.append(&mut produced);
        }
        Ok((pos, children))
    })
}

/// Parse one or more occurrences; the first must succeed.
pub fn one_or_more(parser: Parser) -> Parser {
    sequence(vec![parser.clone(), zero_or_more(parser)])
}

/// Parse a sequence and package the accumulated children into a node of the
/// given kind. Propagates failure unchanged.
pub fn node(kind: NodeKind, parsers: Vec<Parser>) -> Parser {
    let inner = sequence(parsers);
    Parser::from_fn(move |tokens, position| {
        let (pos, children) = inner.parse(tokens, position)?;
        Ok((pos, vec![Child::Node(SyntaxNode::new(kind, children))]))
    })
}

/// Succeed without consuming input, emitting a diagnostic leaf at the current
/// position. Used as the last alternative of a `choice` to downgrade a fatal
/// failure into a recorded error.
pub fn error(kind: DiagnosticKind) -> Parser {
    Parser::from_fn(move |_tokens, position| {
        Ok((position, vec![Child::Diagnostic(Diagnostic::new(kind, position))]))
    })
}

/// Consume tokens until one of the sync kinds (left unconsumed) or end of
/// stream. Never fails; skipped tokens produce no children.
pub fn recover(sync: Vec<TokenKind>) -> Parser {
    Parser::from_fn(move |tokens, position| {
        let mut pos = position;
        while let Some(tok) = tokens.get(pos) {
            if sync.contains(&tok.kind) {
                break;
            }
            pos += 1;
        }
        Ok((pos, Vec::new()))
    })
}

// ============================================================================
// Forward declaration
// ============================================================================

/// A parsing rule yet to be defined, enabling mutually and self-recursive
/// rules. Access always goes through the indirection cell, never through a
/// direct self-reference.
pub struct ForwardDeclaration {
    cell: Rc<OnceCell<Parser>>,
}

impl ForwardDeclaration {
    pub fn new() -> Self {
        Self {
            cell: Rc::new(OnceCell::new()),
        }
    }

    /// A parser that delegates to the rule installed by [`define`](Self::define).
    pub fn parser(&self) -> Parser {
        let cell = Rc::clone(&self.cell);
        Parser::from_fn(move |tokens, position| {
            cell.get()
                .expect("forward-declared rule used before define()")
                .parse(tokens, position)
        })
    }

    /// Install the rule. May be called once.
    pub fn define(&self, parser: Parser) {
        assert!(
            self.cell.set(parser).is_ok(),
            "forward declaration defined twice"
        );
    }
}

impl Default for ForwardDeclaration {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn identifier() -> Parser {
        token(TokenKind::Identifier)
    }

    #[test]
    fn token_matches_and_advances() {
        let tokens = lex("abc");
        let (pos, children) = identifier().parse(&tokens, 0).unwrap();
        assert_eq!(pos, 1);
        assert!(matches!(&children[0], Child::Token(t) if t.text == "abc"));
    }

    #[test]
    fn token_failure_does_not_advance() {
        let tokens = lex("123");
        let err = identifier().parse(&tokens, 0).unwrap_err();
        assert_eq!(err.token_index, 0);
        assert_eq!(err.message, "Expected an identifier, but got `123`.");
    }

    #[test]
    fn token_failure_at_end_of_stream() {
        let err = identifier().parse(&[], 0).unwrap_err();
        assert_eq!(err.message, "Expected an identifier, but ran out of tokens.");
    }

    #[test]
    fn sequence_accumulates_children_in_order() {
        let tokens = lex("a b");
        let parser = sequence(vec![identifier(), identifier()]);
        let (pos, children) = parser.parse(&tokens, 0).unwrap();
        assert_eq!(pos, 2);
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn sequence_failure_restores_position() {
        let tokens = lex("a 1");
        let parser = sequence(vec![identifier(), identifier()]);
        assert!(parser.parse(&tokens, 0).is_err());
        // The caller's position is untouched; a fresh parse from 0 still works.
        let (pos, _) = identifier().parse(&tokens, 0).unwrap();
        assert_eq!(pos, 1);
    }

    #[test]
    fn choice_is_first_match_wins() {
        let tokens = lex("a");
        let first = node(NodeKind::BasicExpression, vec![identifier()]);
        let second = node(NodeKind::NumberLiteral, vec![identifier()]);
        let (_, children) = choice(vec![first, second]).parse(&tokens, 0).unwrap();
        assert!(matches!(&children[0], Child::Node(n) if n.kind == NodeKind::BasicExpression));
    }

    #[test]
    fn choice_reports_the_last_alternatives_failure() {
        let tokens = lex("+");
        let parser = choice(vec![identifier(), token(TokenKind::Number)]);
        let err = parser.parse(&tokens, 0).unwrap_err();
        assert_eq!(err.message, "Expected a number, but got `+`.");
    }

    #[test]
    fn maybe_absorbs_failure_without_consuming() {
        let tokens = lex("123");
        let (pos, children) = maybe(identifier()).parse(&tokens, 0).unwrap();
        assert_eq!(pos, 0);
        assert!(children.is_empty());
    }

    #[test]
    fn zero_or_more_keeps_successes_and_rewinds_the_failure() {
        let tokens = lex("a b 1");
        let (pos, children) = zero_or_more(identifier()).parse(&tokens, 0).unwrap();
        assert_eq!(pos, 2);
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn zero_or_more_guards_against_zero_width_matches() {
        let tokens = lex("a");
        // `maybe` of a non-matching parser succeeds without consuming; the
        // repetition must notice the lack of progress and return zero matches.
        let parser = zero_or_more(maybe(token(TokenKind::Number)));
        let (pos, children) = parser.parse(&tokens, 0).unwrap();
        assert_eq!(pos, 0);
        assert!(children.is_empty());
    }

    #[test]
    fn one_or_more_requires_the_first_match() {
        let tokens = lex("1");
        assert!(one_or_more(identifier()).parse(&tokens, 0).is_err());
        let tokens = lex("a b");
        let (pos, _) = one_or_more(identifier()).parse(&tokens, 0).unwrap();
        assert_eq!(pos, 2);
    }

    #[test]
    fn node_wraps_children() {
        let tokens = lex("a");
        let parser = node(NodeKind::PackageName, vec![identifier()]);
        let (_, children) = parser.parse(&tokens, 0).unwrap();
        match &children[0] {
            Child::Node(n) => {
                assert_eq!(n.kind, NodeKind::PackageName);
                assert_eq!(n.children.len(), 1);
            }
            other => panic!("expected a node, got {other:?}"),
        }
    }

    #[test]
    fn error_emits_a_diagnostic_without_consuming() {
        let tokens = lex("a");
        let (pos, children) = error(DiagnosticKind::MissingExpression).parse(&tokens, 0).unwrap();
        assert_eq!(pos, 0);
        assert!(matches!(
            &children[0],
            Child::Diagnostic(d) if d.message == "Expected an expression."
        ));
    }

    #[test]
    fn recover_skips_to_a_sync_kind_without_consuming_it() {
        let tokens = lex("a b { c");
        let parser = recover(vec![TokenKind::Punctuation(
            quill_core::lang::punctuation::PunctuationId::LBrace,
        )]);
        let (pos, children) = parser.parse(&tokens, 0).unwrap();
        assert_eq!(pos, 2);
        assert!(children.is_empty());
    }

    #[test]
    fn recover_stops_at_end_of_stream() {
        let tokens = lex("a b");
        let parser = recover(vec![TokenKind::LineEnd]);
        let (pos, _) = parser.parse(&tokens, 0).unwrap();
        assert_eq!(pos, 2);
    }

    #[test]
    fn forward_declaration_enables_recursion() {
        // A toy recursive rule: nested = "(" nested ")" | identifier
        let nested = ForwardDeclaration::new();
        let lparen = punct(quill_core::lang::punctuation::PunctuationId::LParen);
        let rparen = punct(quill_core::lang::punctuation::PunctuationId::RParen);
        nested.define(choice(vec![
            sequence(vec![lparen, nested.parser(), rparen]),
            identifier(),
        ]));

        let tokens = lex("((x))");
        let (pos, _) = nested.parser().parse(&tokens, 0).unwrap();
        assert_eq!(pos, 5);
    }

    #[test]
    fn newline_markers_are_consumed_but_leave_no_child() {
        let tokens = lex("\n");
        let (pos, children) = token(TokenKind::LineEnd).parse(&tokens, 0).unwrap();
        assert_eq!(pos, 1);
        assert!(children.is_empty());
    }

    #[test]
    fn semicolon_markers_stay_in_the_tree() {
        let tokens = lex(";");
        let (_, children) = token(TokenKind::LineEnd).parse(&tokens, 0).unwrap();
        assert!(matches!(&children[0], Child::Token(t) if t.text == ";"));
    }
}
