//! Precedence-climbing expression parsing.
//!
//! [`expression`] turns a basic-expression parser into a full expression
//! parser driven by the infix precedence table and prefix operator set from
//! `quill_core::lang::operators`. Higher precedence binds tighter; ties are
//! broken by left associativity, except that operators sharing a tier (`or` /
//! `xor`) chain flat at the same level.
//!
//! The produced trees interleave operands and operator tokens in source
//! order: `1 + 2 * 3` becomes `infixExpression(1, +, infixExpression(2, *, 3))`
//! while a left-associated chain like `1 - 2 - 3` stays a single flat
//! `infixExpression(1, -, 2, -, 3)`. A bare operand is returned unchanged
//! with no wrapper node.

use quill_core::lang::keywords::KeywordId;
use quill_core::lang::operators::{self, OperatorId};

use crate::diagnostics::Diagnostic;
use crate::lexer::tokens::{Token, TokenKind};
use crate::tree::{Child, NodeKind, SyntaxNode};

use super::combinators::Parser;

/// Build a full expression parser around a basic-expression parser.
pub fn expression(basic: Parser) -> Parser {
    Parser::from_fn(move |tokens, position| {
        let (pos, lhs) = parse_prefix(&basic, tokens, position)?;
        parse_infix(&basic, tokens, pos, 0, lhs)
    })
}

/// Map a word-operator keyword to its operator identity.
fn keyword_operator(id: KeywordId) -> Option<OperatorId> {
    match id {
        KeywordId::As => Some(OperatorId::As),
        KeywordId::Is => Some(OperatorId::Is),
        KeywordId::And => Some(OperatorId::And),
        KeywordId::Or => Some(OperatorId::Or),
        KeywordId::Xor => Some(OperatorId::Xor),
        KeywordId::Not => Some(OperatorId::Not),
        _ => None,
    }
}

/// The operator identity of a token, if it has one.
fn operator_id(token: &Token) -> Option<OperatorId> {
    match token.kind {
        TokenKind::Operator(id) => Some(id),
        TokenKind::Keyword(id) => keyword_operator(id),
        _ => None,
    }
}

/// Infix binding strength of a token, if it is an infix operator.
fn infix_precedence(token: &Token) -> Option<u8> {
    operator_id(token).and_then(operators::infix_precedence)
}

/// Return `true` if the token may open a prefix expression.
fn is_prefix_operator(token: &Token) -> bool {
    operator_id(token).is_some_and(operators::is_prefix)
}

/// Parse zero or more prefix operators followed by one basic expression.
///
/// The result is wrapped in a `prefixExpression` node only when at least one
/// prefix operator matched.
fn parse_prefix(
    basic: &Parser,
    tokens: &[Token],
    position: usize,
) -> Result<(usize, Vec<Child>), Diagnostic> {
    let mut pos = position;
    let mut prefix: Vec<Child> = Vec::new();
    while let Some(tok) = tokens.get(pos) {
        if !is_prefix_operator(tok) {
            break;
        }
        prefix.push(Child::Token(tok.clone()));
        pos += 1;
    }

    let (pos, operand) = basic.parse(tokens, pos)?;
    if prefix.is_empty() {
        Ok((pos, operand))
    } else {
        prefix.extend(operand);
        Ok((pos, vec![Child::Node(SyntaxNode::new(NodeKind::PrefixExpression, prefix))]))
    }
}

/// Parse infix operators left to right above `min_precedence`, climbing for
/// tighter-binding operators and handing looser ones back to the caller.
fn parse_infix(
    basic: &Parser,
    tokens: &[Token],
    position: usize,
    min_precedence: u8,
    lhs: Vec<Child>,
) -> Result<(usize, Vec<Child>), Diagnostic> {
    let operand_len = lhs.len();
    let mut children = lhs;
    let mut pos = position;

    while let Some(op_token) = tokens.get(pos) {
        let Some(precedence) = infix_precedence(op_token) else {
            break;
        };

        if precedence > min_precedence {
            // Tighter operator: its right-hand side climbs one level up.
            let (next, rhs) = parse_prefix(basic, tokens, pos + 1)?;
            let (next, result) = parse_infix(basic, tokens, next, precedence + 1, rhs)?;
            children.push(Child::Token(op_token.clone()));
            children.extend(result);
            pos = next;
        } else if precedence < min_precedence {
            // Looser operator: leave it for the caller to consume.
            break;
        } else {
            // Equal tier: chain at the same level.
            let (next, rhs) = parse_prefix(basic, tokens, pos + 1)?;
            children.push(Child::Token(op_token.clone()));
            children.extend(rhs);
            pos = next;
        }
    }

    if children.len() > operand_len {
        Ok((pos, vec![Child::Node(SyntaxNode::new(NodeKind::InfixExpression, children))]))
    } else {
        Ok((pos, children))
    }
}
