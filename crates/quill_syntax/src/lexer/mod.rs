//! Lexer for the Quill language.
//!
//! Handles tokenization including:
//! - Keywords and identifiers (resolved through `quill_core::lang::keywords`)
//! - Numeric, string, and character literals
//! - Operators and punctuation (maximal munch, longest spelling first)
//! - End-of-statement markers: each `;` and each run of newlines becomes one
//!   [`TokenKind::LineEnd`] token
//! - `#` line comments
//!
//! ## Notes
//! - Lexing is **total**: it never fails. Input that cannot be classified
//!   becomes a token of kind [`TokenKind::Invalid`] for the parser to report.
//! - Digit runs lex as bare `Number` tokens; the grammar, not the lexer,
//!   assembles decimal literals from `number "." number`.
//!
//! ## Module structure
//! - `tokens` - Token types (TokenKind, Token, Span)

pub mod tokens;

pub use tokens::{Span, Token, TokenKind, keyword_id};

use quill_core::lang::operators;
use quill_core::lang::punctuation;

/// Longest-first operator and punctuation spellings for maximal munch.
const SYMBOL_LENGTHS: [usize; 3] = [3, 2, 1];

/// Lexer for Quill source code.
struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    tokens: Vec<Token>,
}

/// Tokenize the entire source text.
///
/// Never fails; the parser reports `Invalid` tokens as syntax errors.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn tokenize(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.scan_token();
        }
        self.tokens
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let text = &self.source[start..self.pos];
        self.tokens.push(Token::new(kind, text, Span::new(start, self.pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.pos;
        let Some(c) = self.advance() else { return };

        match c {
            ' ' | '\t' | '\r' => {}
            '\n' => self.newline_run(start),
            '#' => self.line_comment(),
            ';' => self.push(TokenKind::LineEnd, start),
            '"' => self.string_literal(start),
            '\'' => self.character_literal(start),
            c if c.is_ascii_digit() => self.number(start),
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier_or_keyword(start),
            _ => {
                // Rewind: symbol scanning works on source slices, not chars.
                self.pos = start;
                self.symbol(start);
            }
        }
    }

    /// Collapse a run of newlines (and blank-line whitespace between them)
    /// into a single end-of-statement token.
    fn newline_run(&mut self, start: usize) {
        loop {
            let checkpoint = self.pos;
            while matches!(self.peek(), Some(' ' | '\t' | '\r')) {
                self.advance();
            }
            if matches!(self.peek(), Some('\n')) {
                self.advance();
            } else {
                self.pos = checkpoint;
                break;
            }
        }
        self.push(TokenKind::LineEnd, start);
    }

    fn line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn number(&mut self, start: usize) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        self.push(TokenKind::Number, start);
    }

    fn identifier_or_keyword(&mut self, start: usize) {
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
        let kind = match keyword_id(&self.source[start..self.pos]) {
            Some(id) => TokenKind::Keyword(id),
            None => TokenKind::Identifier,
        };
        self.push(kind, start);
    }

    fn string_literal(&mut self, start: usize) {
        loop {
            match self.advance() {
                Some('"') => {
                    self.push(TokenKind::String, start);
                    return;
                }
                Some('\\') => {
                    // Escaped character; keep it regardless of what it is.
                    self.advance();
                }
                Some('\n') | None => {
                    // Unterminated string: surface the span as invalid input.
                    self.push(TokenKind::Invalid, start);
                    return;
                }
                Some(_) => {}
            }
        }
    }

    fn character_literal(&mut self, start: usize) {
        match self.advance() {
            Some('\\') => {
                self.advance();
            }
            Some('\'') | Some('\n') | None => {
                self.push(TokenKind::Invalid, start);
                return;
            }
            Some(_) => {}
        }
        if matches!(self.peek(), Some('\'')) {
            self.advance();
            self.push(TokenKind::Character, start);
        } else {
            self.push(TokenKind::Invalid, start);
        }
    }

    /// Scan an operator or punctuation token, longest spelling first.
    fn symbol(&mut self, start: usize) {
        for len in SYMBOL_LENGTHS {
            let end = start + len;
            if end > self.source.len() || !self.source.is_char_boundary(end) {
                continue;
            }
            let candidate = &self.source[start..end];
            if let Some(id) = operators::from_str(candidate) {
                self.pos = end;
                self.push(TokenKind::Operator(id), start);
                return;
            }
            if let Some(id) = punctuation::from_str(candidate) {
                self.pos = end;
                self.push(TokenKind::Punctuation(id), start);
                return;
            }
        }
        // Nothing matched: consume one character as invalid input.
        self.advance();
        self.push(TokenKind::Invalid, start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::lang::keywords::KeywordId;
    use quill_core::lang::operators::OperatorId;
    use quill_core::lang::punctuation::PunctuationId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("var answer"),
            vec![TokenKind::Keyword(KeywordId::Var), TokenKind::Identifier]
        );
    }

    #[test]
    fn maximal_munch_prefers_longer_operators() {
        assert_eq!(
            kinds("<<= << <= <"),
            vec![
                TokenKind::Operator(OperatorId::ShlEq),
                TokenKind::Operator(OperatorId::Shl),
                TokenKind::Operator(OperatorId::LtEq),
                TokenKind::Operator(OperatorId::Lt),
            ]
        );
    }

    #[test]
    fn arrows_lex_as_punctuation() {
        assert_eq!(
            kinds("-> => - ="),
            vec![
                TokenKind::Punctuation(PunctuationId::Arrow),
                TokenKind::Punctuation(PunctuationId::FatArrow),
                TokenKind::Operator(OperatorId::Minus),
                TokenKind::Operator(OperatorId::Eq),
            ]
        );
    }

    #[test]
    fn newline_runs_collapse_to_one_token() {
        let tokens = lex("a\n\n   \nb");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Identifier, TokenKind::LineEnd, TokenKind::Identifier]
        );
        assert!(tokens[1].is_newline_marker());
    }

    #[test]
    fn semicolon_is_its_own_line_end() {
        let tokens = lex("a;b");
        assert_eq!(tokens[1].kind, TokenKind::LineEnd);
        assert_eq!(tokens[1].text, ";");
        assert!(!tokens[1].is_newline_marker());
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("a # trailing comment\nb"),
            vec![TokenKind::Identifier, TokenKind::LineEnd, TokenKind::Identifier]
        );
    }

    #[test]
    fn digit_runs_only() {
        // The grammar assembles `12.5` from number `.` number.
        assert_eq!(
            kinds("12.5"),
            vec![
                TokenKind::Number,
                TokenKind::Punctuation(PunctuationId::Dot),
                TokenKind::Number,
            ]
        );
    }

    #[test]
    fn string_and_character_literals() {
        assert_eq!(
            kinds(r#""hi \"there\"" 'x' '\n'"#),
            vec![TokenKind::String, TokenKind::Character, TokenKind::Character]
        );
    }

    #[test]
    fn unterminated_string_is_invalid_not_fatal() {
        let tokens = lex("\"oops\nvar");
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Keyword(KeywordId::Var)));
    }

    #[test]
    fn unlexable_input_is_invalid_not_fatal() {
        let tokens = lex("a ? b");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Identifier, TokenKind::Invalid, TokenKind::Identifier]
        );
    }

    #[test]
    fn spans_cover_the_source() {
        let tokens = lex("var x");
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(4, 5));
    }

    #[test]
    fn word_operators_lex_as_keywords() {
        assert_eq!(
            kinds("a and b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Keyword(KeywordId::And),
                TokenKind::Identifier,
            ]
        );
    }
}
