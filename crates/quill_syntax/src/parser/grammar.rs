//! The Quill grammar.
//!
//! The complete rule set for the language, composed declaratively from the
//! combinators in [`super::combinators`] and the expression parser in
//! [`super::expression`]. Rules mirror the language reference: package and
//! import statements, struct definitions with sum-type `cases`, function and
//! variable definitions, blocks, control flow, assignment, and
//! expression statements.
//!
//! ## Recovery points
//! - [`line_end`] never fails: a missing terminator records a diagnostic and
//!   resynchronizes at the next statement boundary.
//! - Compound statements substitute a missing-expression diagnostic and skip
//!   to `{` when their condition or iterable is absent, so the body still
//!   parses.
//! - Unparseable top-level input is consumed by [`unexpected_input`], one
//!   generic syntax error per skipped span.

use quill_core::lang::keywords::KeywordId;
use quill_core::lang::operators::OperatorId;
use quill_core::lang::punctuation::PunctuationId;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::lexer::tokens::{Token, TokenKind};
use crate::tree::{Child, NodeKind};

use super::combinators::{
    ForwardDeclaration, Parser, choice, error, keyword, maybe, node, operator, punct, recover,
    sequence, token, zero_or_more,
};
use super::expression::expression;

/// Build the grammar and return its root rule.
///
/// The rule graph is a small web of reference-counted closures; constructing
/// it per parse keeps concurrent parses fully independent.
pub(crate) fn program() -> Parser {
    // Forward declarations for the mutually recursive rules: a type may
    // contain types, a struct case may be a nested struct definition, and
    // blocks contain statements that contain blocks.
    let struct_definition = ForwardDeclaration::new();
    let ty = ForwardDeclaration::new();
    let program_statement = ForwardDeclaration::new();
    let basic_expression = ForwardDeclaration::new();

    let expr = expression(basic_expression.parser());

    // ========================================================================
    // Postfix forms
    // ========================================================================

    let arrow = node(NodeKind::Arrow, vec![
        punct(PunctuationId::Arrow),
        choice(vec![identifier(), error(DiagnosticKind::MissingIdentifier)]),
    ]);

    let function_call = node(NodeKind::FunctionCall, vec![
        punct(PunctuationId::LParen),
        zero_or_more(sequence(vec![expr.clone(), punct(PunctuationId::Comma)])),
        maybe(expr.clone()),
        choice(vec![
            punct(PunctuationId::RParen),
            error(DiagnosticKind::MissingCloseParenthesis),
        ]),
    ]);

    let element_access = node(NodeKind::ElementAccess, vec![
        punct(PunctuationId::LBracket),
        zero_or_more(sequence(vec![expr.clone(), punct(PunctuationId::Comma)])),
        maybe(expr.clone()),
        choice(vec![
            punct(PunctuationId::RBracket),
            error(DiagnosticKind::MissingCloseBracket),
        ]),
    ]);

    let member_access = node(NodeKind::MemberAccess, vec![
        punct(PunctuationId::Dot),
        choice(vec![identifier(), error(DiagnosticKind::MissingMember)]),
    ]);

    // ========================================================================
    // Literals
    // ========================================================================

    let boolean_literal = node(NodeKind::BooleanLiteral, vec![choice(vec![
        keyword(KeywordId::True),
        keyword(KeywordId::False),
    ])]);

    // The lexer emits bare digit runs; decimals are assembled here.
    let number_literal = node(NodeKind::NumberLiteral, vec![
        maybe(choice(vec![operator(OperatorId::Plus), operator(OperatorId::Minus)])),
        choice(vec![
            sequence(vec![
                token(TokenKind::Number),
                maybe(sequence(vec![
                    punct(PunctuationId::Dot),
                    maybe(token(TokenKind::Number)),
                ])),
            ]),
            sequence(vec![
                punct(PunctuationId::Dot),
                choice(vec![
                    token(TokenKind::Number),
                    error(DiagnosticKind::MissingDecimalDigits),
                ]),
            ]),
        ]),
    ]);

    let string_literal = node(NodeKind::StringLiteral, vec![token(TokenKind::String)]);
    let character_literal = node(NodeKind::CharacterLiteral, vec![token(TokenKind::Character)]);

    let array_literal = node(NodeKind::ArrayLiteral, vec![
        punct(PunctuationId::LBracket),
        zero_or_more(sequence(vec![expr.clone(), punct(PunctuationId::Comma)])),
        maybe(expr.clone()),
        choice(vec![
            punct(PunctuationId::RBracket),
            error(DiagnosticKind::MissingCloseBracket),
        ]),
    ]);

    let tuple_literal = node(NodeKind::TupleLiteral, vec![
        punct(PunctuationId::LParen),
        zero_or_more(sequence(vec![expr.clone(), punct(PunctuationId::Comma)])),
        maybe(expr.clone()),
        choice(vec![
            punct(PunctuationId::RParen),
            error(DiagnosticKind::MissingCloseParenthesis),
        ]),
    ]);

    let literal = choice(vec![
        tuple_literal,
        array_literal,
        character_literal,
        string_literal,
        number_literal,
        boolean_literal,
        identifier(),
    ]);

    basic_expression.define(node(NodeKind::BasicExpression, vec![
        literal,
        zero_or_more(choice(vec![member_access, element_access, arrow, function_call])),
    ]));

    // ========================================================================
    // Types
    // ========================================================================

    let basic_type = node(NodeKind::BasicType, vec![
        identifier(),
        zero_or_more(sequence(vec![
            punct(PunctuationId::Dot),
            choice(vec![identifier(), error(DiagnosticKind::MissingIdentifier)]),
        ])),
    ]);

    let tuple_type = node(NodeKind::TupleType, vec![
        punct(PunctuationId::LParen),
        zero_or_more(sequence(vec![ty.parser(), punct(PunctuationId::Comma)])),
        maybe(ty.parser()),
        choice(vec![
            punct(PunctuationId::RParen),
            error(DiagnosticKind::MissingCloseParenthesis),
        ]),
    ]);

    let array_type = node(NodeKind::ArrayType, vec![
        punct(PunctuationId::LBracket),
        maybe(expr.clone()),
        choice(vec![
            punct(PunctuationId::RBracket),
            error(DiagnosticKind::MissingCloseBracket),
        ]),
        choice(vec![ty.parser(), error(DiagnosticKind::MissingType)]),
    ]);

    let pointer_type = node(NodeKind::PointerType, vec![
        operator(OperatorId::Amp),
        choice(vec![ty.parser(), error(DiagnosticKind::MissingType)]),
    ]);

    let mut_type = node(NodeKind::MutType, vec![
        keyword(KeywordId::Mut),
        choice(vec![ty.parser(), error(DiagnosticKind::MissingType)]),
    ]);

    let const_type = node(NodeKind::ConstType, vec![
        keyword(KeywordId::Const),
        choice(vec![ty.parser(), error(DiagnosticKind::MissingType)]),
    ]);

    ty.define(choice(vec![
        const_type,
        mut_type,
        pointer_type,
        array_type,
        tuple_type,
        basic_type,
    ]));

    // ========================================================================
    // Shared statement pieces
    // ========================================================================

    let access_modifier = maybe(choice(vec![keyword(KeywordId::Pub), keyword(KeywordId::Priv)]));

    let open_brace = sequence(vec![
        punct(PunctuationId::LBrace),
        zero_or_more(line_end_token()),
    ]);
    let close_brace = sequence(vec![
        zero_or_more(line_end_token()),
        punct(PunctuationId::RBrace),
    ]);

    // `= <expression>` with a diagnostic when the value is missing.
    let initializer = sequence(vec![
        operator(OperatorId::Eq),
        choice(vec![expr.clone(), error(DiagnosticKind::MissingExpression)]),
    ]);

    // Condition/iterable of a compound statement: on a missing expression,
    // record it and skip to `{` so the body still parses.
    let condition = choice(vec![
        sequence(vec![expr.clone(), maybe(line_end_token())]),
        sequence(vec![
            error(DiagnosticKind::MissingExpression),
            recover(vec![TokenKind::Punctuation(PunctuationId::LBrace)]),
        ]),
    ]);

    // ========================================================================
    // Statements
    // ========================================================================

    let assignment_operator = choice(vec![
        operator(OperatorId::Eq),
        operator(OperatorId::PlusEq),
        operator(OperatorId::MinusEq),
        operator(OperatorId::StarEq),
        operator(OperatorId::SlashEq),
        operator(OperatorId::PercentEq),
        operator(OperatorId::TildeEq),
        operator(OperatorId::ShlEq),
        operator(OperatorId::ShrEq),
        operator(OperatorId::AmpEq),
        operator(OperatorId::PipeEq),
        operator(OperatorId::CaretEq),
    ]);

    let assignment = node(NodeKind::Assignment, vec![
        expr.clone(),
        assignment_operator,
        choice(vec![expr.clone(), error(DiagnosticKind::MissingExpression)]),
        line_end(),
    ]);

    // Statements of a block. Stray terminators (a newline after a bare block,
    // doubled semicolons) are absorbed between statements instead of ending
    // the list early.
    let statement_list = zero_or_more(choice(vec![
        program_statement.parser(),
        line_end_token(),
    ]));

    let block = node(NodeKind::Block, vec![
        open_brace.clone(),
        statement_list.clone(),
        close_brace.clone(),
    ]);

    let for_loop = node(NodeKind::ForLoop, vec![
        keyword(KeywordId::For),
        choice(vec![expr.clone(), error(DiagnosticKind::MissingExpression)]),
        choice(vec![keyword(KeywordId::In), error(DiagnosticKind::MissingIn)]),
        condition.clone(),
        block.clone(),
        line_end(),
    ]);

    let while_loop = node(NodeKind::WhileLoop, vec![
        choice(vec![
            sequence(vec![
                keyword(KeywordId::Do),
                choice(vec![
                    keyword(KeywordId::While),
                    sequence(vec![
                        error(DiagnosticKind::MissingWhile),
                        recover(vec![TokenKind::Punctuation(PunctuationId::LBrace)]),
                    ]),
                ]),
            ]),
            keyword(KeywordId::While),
        ]),
        condition.clone(),
        block.clone(),
        line_end(),
    ]);

    let if_statement = node(NodeKind::IfStatement, vec![
        keyword(KeywordId::If),
        condition.clone(),
        block.clone(),
        zero_or_more(sequence(vec![
            keyword(KeywordId::Else),
            keyword(KeywordId::If),
            condition.clone(),
            block.clone(),
        ])),
        maybe(sequence(vec![keyword(KeywordId::Else), block.clone()])),
        line_end(),
    ]);

    let continue_statement = node(NodeKind::ContinueStatement, vec![
        keyword(KeywordId::Continue),
        line_end(),
    ]);

    let break_statement = node(NodeKind::BreakStatement, vec![
        keyword(KeywordId::Break),
        line_end(),
    ]);

    let return_statement = node(NodeKind::ReturnStatement, vec![
        keyword(KeywordId::Return),
        choice(vec![expr.clone(), error(DiagnosticKind::MissingExpression)]),
        line_end(),
    ]);

    let pass_statement = node(NodeKind::PassStatement, vec![
        keyword(KeywordId::Pass),
        line_end(),
    ]);

    let variable_definition = node(NodeKind::VariableDefinition, vec![
        access_modifier.clone(),
        keyword(KeywordId::Var),
        choice(vec![
            sequence(vec![
                identifier(),
                choice(vec![
                    sequence(vec![ty.parser(), maybe(initializer.clone())]),
                    initializer.clone(),
                ]),
            ]),
            error(DiagnosticKind::MissingVariableName),
        ]),
        line_end(),
    ]);

    // ========================================================================
    // Functions
    // ========================================================================

    let function_parameter = node(NodeKind::FunctionParameter, vec![
        identifier(),
        choice(vec![
            sequence(vec![ty.parser(), maybe(initializer.clone())]),
            initializer.clone(),
            error(DiagnosticKind::MissingTypeOrDefaultValue),
        ]),
    ]);

    let function_parameters = node(NodeKind::FunctionParameters, vec![
        punct(PunctuationId::LParen),
        zero_or_more(sequence(vec![
            function_parameter.clone(),
            punct(PunctuationId::Comma),
        ])),
        maybe(function_parameter),
        punct(PunctuationId::RParen),
    ]);

    let function_body = node(NodeKind::FunctionBody, vec![
        open_brace.clone(),
        statement_list,
        close_brace.clone(),
    ]);

    // A body-less declaration, permitted inside struct bodies.
    let function_signature = node(NodeKind::FunctionSignature, vec![
        access_modifier.clone(),
        keyword(KeywordId::Fun),
        choice(vec![
            sequence(vec![
                identifier(),
                choice(vec![
                    function_parameters.clone(),
                    error(DiagnosticKind::MissingFunctionParameters),
                ]),
                maybe(ty.parser()),
            ]),
            error(DiagnosticKind::MissingFunctionName),
        ]),
        line_end(),
    ]);

    let function_definition = node(NodeKind::FunctionDefinition, vec![
        access_modifier.clone(),
        keyword(KeywordId::Fun),
        choice(vec![
            sequence(vec![
                identifier(),
                choice(vec![
                    sequence(vec![
                        function_parameters,
                        maybe(ty.parser()),
                        choice(vec![
                            function_body.clone(),
                            error(DiagnosticKind::MissingFunctionBody),
                        ]),
                    ]),
                    sequence(vec![
                        error(DiagnosticKind::MissingFunctionParameters),
                        recover(vec![TokenKind::Punctuation(PunctuationId::LBrace)]),
                        choice(vec![
                            function_body,
                            sequence(vec![
                                error(DiagnosticKind::MissingFunctionBody),
                                recover(vec![TokenKind::Punctuation(PunctuationId::RBrace)]),
                            ]),
                        ]),
                    ]),
                ]),
            ]),
            error(DiagnosticKind::MissingFunctionName),
        ]),
        line_end(),
    ]);

    // ========================================================================
    // Structs
    // ========================================================================

    // A case is either `case name [= value]` or a nested struct definition,
    // which makes struct cases a recursive sum-type declaration.
    let struct_case = node(NodeKind::StructCase, vec![choice(vec![
        sequence(vec![
            keyword(KeywordId::Case),
            choice(vec![
                sequence(vec![identifier(), maybe(initializer.clone())]),
                error(DiagnosticKind::MissingCaseName),
            ]),
            line_end(),
        ]),
        struct_definition.parser(),
    ])]);

    let struct_cases = node(NodeKind::StructCases, vec![
        keyword(KeywordId::Cases),
        open_brace.clone(),
        maybe(sequence(vec![
            keyword(KeywordId::Default),
            choice(vec![
                struct_case.clone(),
                sequence(vec![error(DiagnosticKind::MissingStructCase), line_end()]),
            ]),
        ])),
        zero_or_more(struct_case),
        choice(vec![close_brace.clone(), error(DiagnosticKind::MissingCloseBrace)]),
    ]);

    let struct_member = choice(vec![
        sequence(vec![
            keyword(KeywordId::Embed),
            choice(vec![ty.parser(), error(DiagnosticKind::MissingType)]),
            line_end(),
        ]),
        function_signature,
        variable_definition.clone(),
    ]);

    let struct_body = node(NodeKind::StructBody, vec![
        open_brace.clone(),
        zero_or_more(struct_member),
        choice(vec![close_brace.clone(), error(DiagnosticKind::MissingCloseBrace)]),
    ]);

    struct_definition.define(node(NodeKind::StructDefinition, vec![
        access_modifier.clone(),
        keyword(KeywordId::Struct),
        choice(vec![identifier(), error(DiagnosticKind::MissingStructName)]),
        maybe(struct_body),
        maybe(struct_cases),
        line_end(),
    ]));

    // ========================================================================
    // Packages and imports
    // ========================================================================

    let package_name = node(NodeKind::PackageName, vec![
        identifier(),
        zero_or_more(sequence(vec![punct(PunctuationId::Dot), identifier()])),
        maybe(sequence(vec![
            punct(PunctuationId::Dot),
            choice(vec![
                operator(OperatorId::Star),
                error(DiagnosticKind::InvalidPackageName),
            ]),
        ])),
    ]);

    let package_name_list = sequence(vec![
        package_name.clone(),
        zero_or_more(sequence(vec![
            punct(PunctuationId::Comma),
            maybe(line_end_token()),
            package_name.clone(),
        ])),
        maybe(punct(PunctuationId::Comma)),
    ]);

    let import_statement = node(NodeKind::ImportStatement, vec![choice(vec![
        sequence(vec![
            keyword(KeywordId::From),
            choice(vec![
                package_name.clone(),
                error(DiagnosticKind::MissingPackageName),
            ]),
            choice(vec![
                sequence(vec![
                    keyword(KeywordId::Import),
                    choice(vec![
                        operator(OperatorId::Star),
                        package_name_list,
                        error(DiagnosticKind::MissingPackageNameList),
                    ]),
                ]),
                error(DiagnosticKind::MissingImportStatement),
            ]),
            line_end(),
        ]),
        sequence(vec![
            keyword(KeywordId::Import),
            choice(vec![
                package_name.clone(),
                error(DiagnosticKind::MissingPackageName),
            ]),
            line_end(),
        ]),
    ])]);

    let package_statement = node(NodeKind::PackageStatement, vec![
        maybe(keyword(KeywordId::Pub)),
        keyword(KeywordId::Package),
        choice(vec![package_name, error(DiagnosticKind::MissingPackageName)]),
        line_end(),
    ]);

    // ========================================================================
    // Program
    // ========================================================================

    let expression_statement = sequence(vec![expr.clone(), line_end()]);

    program_statement.define(choice(vec![
        import_statement,
        struct_definition.parser(),
        function_definition,
        variable_definition,
        pass_statement,
        return_statement,
        break_statement,
        continue_statement,
        if_statement,
        while_loop,
        for_loop,
        block,
        assignment,
        expression_statement,
    ]));

    node(NodeKind::Program, vec![
        zero_or_more(line_end_token()),
        maybe(package_statement),
        zero_or_more(choice(vec![
            program_statement.parser(),
            line_end_token(),
            unexpected_input(),
        ])),
    ])
}

// ============================================================================
// Dedicated terminal rules
// ============================================================================

fn identifier() -> Parser {
    token(TokenKind::Identifier)
}

fn line_end_token() -> Parser {
    token(TokenKind::LineEnd)
}

/// Statement terminator. End of stream counts; otherwise a run of `;` /
/// newline tokens is consumed. On a missing terminator the rule records a
/// diagnostic and resynchronizes — it never fails the enclosing statement.
fn line_end() -> Parser {
    Parser::from_fn(|tokens, position| {
        if position >= tokens.len() {
            return Ok((position, Vec::new()));
        }
        if matches!(tokens[position].kind, TokenKind::LineEnd) {
            return Ok(terminator_run(tokens, position));
        }

        let diagnostic = Diagnostic::new(DiagnosticKind::ExpectedEndOfStatement, position);
        let mut pos = position;
        while let Some(tok) = tokens.get(pos) {
            if matches!(tok.kind, TokenKind::LineEnd) {
                let (next, mut children) = terminator_run(tokens, pos);
                children.insert(0, Child::Diagnostic(diagnostic));
                return Ok((next, children));
            }
            if starts_statement(&tok.kind) {
                break;
            }
            pos += 1;
        }
        Ok((pos, vec![Child::Diagnostic(diagnostic)]))
    })
}

/// Consume a run of terminator tokens. Semicolons stay in the tree; newline
/// markers are dropped.
fn terminator_run(tokens: &[Token], position: usize) -> (usize, Vec<Child>) {
    let mut pos = position;
    let mut children = Vec::new();
    while let Some(tok) = tokens.get(pos) {
        if !matches!(tok.kind, TokenKind::LineEnd) {
            break;
        }
        if !tok.is_newline_marker() {
            children.push(Child::Token(tok.clone()));
        }
        pos += 1;
    }
    (pos, children)
}

/// Top-level rule of last resort: consume an unparseable span, record one
/// generic syntax error, and resynchronize at the next statement boundary.
/// Fails at end of stream so the enclosing repetition terminates.
fn unexpected_input() -> Parser {
    Parser::from_fn(|tokens, position| {
        if position >= tokens.len() {
            return Err(Diagnostic::new(DiagnosticKind::SyntaxError, position));
        }
        let diagnostic = Diagnostic::new(DiagnosticKind::SyntaxError, position);
        let mut pos = position + 1;
        while let Some(tok) = tokens.get(pos) {
            if matches!(tok.kind, TokenKind::LineEnd) {
                pos += 1;
                break;
            }
            if starts_statement(&tok.kind) {
                break;
            }
            pos += 1;
        }
        Ok((pos, vec![Child::Diagnostic(diagnostic)]))
    })
}

/// Token kinds that can open a statement or close a block; the boundaries
/// resynchronization stops at.
fn starts_statement(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::Keyword(id) => matches!(
            id,
            KeywordId::Package
                | KeywordId::From
                | KeywordId::Import
                | KeywordId::Pub
                | KeywordId::Priv
                | KeywordId::Var
                | KeywordId::Fun
                | KeywordId::Struct
                | KeywordId::Cases
                | KeywordId::Embed
                | KeywordId::Case
                | KeywordId::Default
                | KeywordId::Pass
                | KeywordId::Return
                | KeywordId::Break
                | KeywordId::Continue
                | KeywordId::If
                | KeywordId::While
                | KeywordId::Do
                | KeywordId::For
        ),
        TokenKind::Punctuation(PunctuationId::LBrace | PunctuationId::RBrace) => true,
        _ => false,
    }
}
