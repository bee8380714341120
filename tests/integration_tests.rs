//! End-to-end tests across the lexer and parser.

use quill::lexer;
use quill::parser;
use quill::tree::NodeKind;

fn parse_source(source: &str) -> parser::ParseResult {
    parser::parse(&lexer::lex(source))
}

#[test]
fn empty_input_yields_an_empty_clean_program() {
    let result = parse_source("");
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.tree.kind, NodeKind::Program);
    assert!(result.tree.children.is_empty());
}

#[test]
fn comments_and_blank_lines_yield_an_empty_program() {
    let result = parse_source("# a file of nothing\n\n   # more nothing\n");
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.tree.child_nodes().count(), 0);
}

#[test]
fn every_statement_form_parses_in_one_file() {
    let source = "\
pub package app.main;

from std.collections import map, set;
import std.io.*;

pub struct Node {
    embed base.Entity;
    var value int;
    fun weight() int;
} cases {
    default case Leaf;
    case Branch = 2;
    struct Special {
        var tag string;
    };
}

priv var registry []&Node;

fun visit(root &Node, depth int = 0) int {
    var seen = 0;
    pass;
    for child in root.children() {
        seen += visit(child, depth + 1);
    }
    while seen > 0 {
        seen -= 1;
    }
    do while seen < 10 {
        seen += 2;
    }
    if seen == 0 {
        return 1;
    } else if not seen {
        continue;
    } else {
        break;
    }
    {
        var scoped = 'x';
    }
    registry[0] = root;
    root->describe;
    return seen;
}
";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "unexpected: {:?}", result.diagnostics);

    let kinds: Vec<NodeKind> = result.tree.child_nodes().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::PackageStatement,
            NodeKind::ImportStatement,
            NodeKind::ImportStatement,
            NodeKind::StructDefinition,
            NodeKind::VariableDefinition,
            NodeKind::FunctionDefinition,
        ]
    );
}

#[test]
fn a_file_with_several_errors_reports_each_once() {
    let source = "\
var x int return 1;
var = 2;
fun () { }
return 3;
";
    let result = parse_source(source);

    // A terminator error where `return` crowds the first definition, a
    // missing-name error (plus terminator recovery) on the second line, and a
    // missing-name error on the third.
    assert!(
        result
            .diagnostics
            .iter()
            .any(|d| d.message == "Expected end of statement."),
        "unexpected: {:?}",
        result.diagnostics
    );
    assert!(
        result
            .diagnostics
            .iter()
            .any(|d| d.message == "Expected a variable name.")
    );
    assert!(
        result
            .diagnostics
            .iter()
            .any(|d| d.message == "Expected a function name.")
    );

    // Recovery kept the final, well-formed statement.
    assert!(
        result
            .tree
            .child_nodes()
            .any(|n| n.kind == NodeKind::ReturnStatement)
    );
}

#[test]
fn clean_parses_reconstruct_their_token_text() {
    let source = "package p;\nvar total = price * (1 + rate);\n";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty());

    let compact: String = source.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(result.tree.text(), compact);
}

#[test]
fn parsing_is_deterministic() {
    let source = "var x int return 0; fun f() { }";
    let first = parse_source(source);
    let second = parse_source(source);
    assert_eq!(first, second);
}

#[test]
fn pretty_tree_snapshot_for_a_small_function() {
    let result = parse_source("fun id(x int) int { return x; }");
    assert!(result.diagnostics.is_empty(), "unexpected: {:?}", result.diagnostics);
    insta::assert_snapshot!(result.tree.pretty(), @r"
    program
    |  functionDefinition
    |  |  fun
    |  |  id
    |  |  functionParameters
    |  |  |  (
    |  |  |  functionParameter
    |  |  |  |  x
    |  |  |  |  basicType
    |  |  |  |  |  int
    |  |  |  )
    |  |  basicType
    |  |  |  int
    |  |  functionBody
    |  |  |  {
    |  |  |  returnStatement
    |  |  |  |  return
    |  |  |  |  basicExpression
    |  |  |  |  |  x
    |  |  |  |  ;
    |  |  |  }
    ");
}
