//! The Quill syntax tree.
//!
//! A parse produces a single [`SyntaxNode`] tree whose leaves are tokens or
//! diagnostics and whose interior nodes are named by grammar rule. The tree is
//! deliberately concrete: children preserve source order, and concatenating a
//! node's token text left to right reconstructs the span it covers (newline
//! markers and recovery-skipped tokens excepted).

use std::fmt;

use crate::diagnostics::Diagnostic;
use crate::lexer::tokens::Token;

/// Grammar rule that produced a node.
///
/// Closed enumeration: tree consumers match exhaustively instead of comparing
/// rule names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,

    // Modules
    PackageStatement,
    ImportStatement,
    PackageName,

    // Definitions
    StructDefinition,
    StructBody,
    StructCases,
    StructCase,
    FunctionDefinition,
    FunctionSignature,
    FunctionParameters,
    FunctionParameter,
    FunctionBody,
    VariableDefinition,

    // Statements
    Block,
    IfStatement,
    WhileLoop,
    ForLoop,
    Assignment,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    PassStatement,

    // Expressions
    PrefixExpression,
    InfixExpression,
    BasicExpression,
    MemberAccess,
    ElementAccess,
    FunctionCall,
    Arrow,
    NumberLiteral,
    StringLiteral,
    CharacterLiteral,
    BooleanLiteral,
    ArrayLiteral,
    TupleLiteral,

    // Types
    BasicType,
    TupleType,
    ArrayType,
    PointerType,
    MutType,
    ConstType,
}

impl NodeKind {
    /// Rule name as rendered by the pretty-printer.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Program => "program",
            NodeKind::PackageStatement => "packageStatement",
            NodeKind::ImportStatement => "importStatement",
            NodeKind::PackageName => "packageName",
            NodeKind::StructDefinition => "structDefinition",
            NodeKind::StructBody => "structBody",
            NodeKind::StructCases => "structCases",
            NodeKind::StructCase => "structCase",
            NodeKind::FunctionDefinition => "functionDefinition",
            NodeKind::FunctionSignature => "functionSignature",
            NodeKind::FunctionParameters => "functionParameters",
            NodeKind::FunctionParameter => "functionParameter",
            NodeKind::FunctionBody => "functionBody",
            NodeKind::VariableDefinition => "variableDefinition",
            NodeKind::Block => "block",
            NodeKind::IfStatement => "ifStatement",
            NodeKind::WhileLoop => "whileLoop",
            NodeKind::ForLoop => "forLoop",
            NodeKind::Assignment => "assignment",
            NodeKind::ReturnStatement => "returnStatement",
            NodeKind::BreakStatement => "breakStatement",
            NodeKind::ContinueStatement => "continueStatement",
            NodeKind::PassStatement => "passStatement",
            NodeKind::PrefixExpression => "prefixExpression",
            NodeKind::InfixExpression => "infixExpression",
            NodeKind::BasicExpression => "basicExpression",
            NodeKind::MemberAccess => "memberAccess",
            NodeKind::ElementAccess => "elementAccess",
            NodeKind::FunctionCall => "functionCall",
            NodeKind::Arrow => "arrow",
            NodeKind::NumberLiteral => "numberLiteral",
            NodeKind::StringLiteral => "stringLiteral",
            NodeKind::CharacterLiteral => "characterLiteral",
            NodeKind::BooleanLiteral => "booleanLiteral",
            NodeKind::ArrayLiteral => "arrayLiteral",
            NodeKind::TupleLiteral => "tupleLiteral",
            NodeKind::BasicType => "basicType",
            NodeKind::TupleType => "tupleType",
            NodeKind::ArrayType => "arrayType",
            NodeKind::PointerType => "pointerType",
            NodeKind::MutType => "mutType",
            NodeKind::ConstType => "constType",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A child of a syntax node.
///
/// The three-way union forces consumers to handle the diagnostic case
/// explicitly rather than assuming well-formed leaves.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Token(Token),
    Node(SyntaxNode),
    Diagnostic(Diagnostic),
}

/// A node in the syntax tree. Can have zero or more children.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub children: Vec<Child>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, children: Vec<Child>) -> Self {
        Self { kind, children }
    }

    /// The source text covered by this node, token leaves concatenated left to
    /// right. Diagnostic leaves contribute nothing.
    pub fn text(&self) -> String {
        let mut result = String::new();
        for child in &self.children {
            match child {
                Child::Token(token) => result.push_str(&token.text),
                Child::Node(node) => result.push_str(&node.text()),
                Child::Diagnostic(_) => {}
            }
        }
        result
    }

    /// Iterate the direct child nodes, skipping token and diagnostic leaves.
    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(|child| match child {
            Child::Node(node) => Some(node),
            _ => None,
        })
    }

    /// First direct child node of the given kind, if any.
    pub fn child_of_kind(&self, kind: NodeKind) -> Option<&SyntaxNode> {
        self.child_nodes().find(|node| node.kind == kind)
    }

    /// Append every diagnostic leaf in the subtree to `out`, in source order.
    pub fn collect_diagnostics(&self, out: &mut Vec<Diagnostic>) {
        for child in &self.children {
            match child {
                Child::Token(_) => {}
                Child::Node(node) => node.collect_diagnostics(out),
                Child::Diagnostic(diagnostic) => out.push(diagnostic.clone()),
            }
        }
    }

    /// Multi-line indented rendering of the subtree.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.pretty_into(&mut out, 0);
        out
    }

    fn pretty_into(&self, out: &mut String, indentation: usize) {
        const TAB: &str = "|  ";
        out.push_str(&TAB.repeat(indentation));
        out.push_str(self.kind.as_str());
        out.push('\n');
        for child in &self.children {
            match child {
                Child::Node(node) => node.pretty_into(out, indentation + 1),
                Child::Token(token) => {
                    out.push_str(&TAB.repeat(indentation + 1));
                    out.push_str(&token.text);
                    out.push('\n');
                }
                Child::Diagnostic(diagnostic) => {
                    out.push_str(&TAB.repeat(indentation + 1));
                    out.push_str(&diagnostic.to_string());
                    out.push('\n');
                }
            }
        }
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match child {
                Child::Token(token) => write!(f, "{}", token.text)?,
                Child::Node(node) => write!(f, "{node}")?,
                Child::Diagnostic(diagnostic) => write!(f, "{diagnostic}")?,
            }
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokens::{Span, TokenKind};

    fn ident(text: &str) -> Child {
        Child::Token(Token::new(TokenKind::Identifier, text, Span::new(0, text.len())))
    }

    #[test]
    fn text_concatenates_token_leaves_in_order() {
        let inner = SyntaxNode::new(NodeKind::PackageName, vec![ident("a"), ident("b")]);
        let node = SyntaxNode::new(
            NodeKind::PackageStatement,
            vec![ident("package"), Child::Node(inner)],
        );
        assert_eq!(node.text(), "packageab");
    }

    #[test]
    fn diagnostics_contribute_no_text() {
        use crate::diagnostics::{Diagnostic, DiagnosticKind};
        let node = SyntaxNode::new(
            NodeKind::ReturnStatement,
            vec![
                ident("return"),
                Child::Diagnostic(Diagnostic::new(DiagnosticKind::MissingExpression, 1)),
            ],
        );
        assert_eq!(node.text(), "return");
    }

    #[test]
    fn pretty_indents_nested_nodes() {
        let inner = SyntaxNode::new(NodeKind::PackageName, vec![ident("p")]);
        let node = SyntaxNode::new(NodeKind::PackageStatement, vec![Child::Node(inner)]);
        assert_eq!(node.pretty(), "packageStatement\n|  packageName\n|  |  p\n");
    }
}
