//! miette-rendered syntax diagnostics.
//!
//! The parser keys diagnostics by token index; this module resolves them to
//! byte spans through the token stream so miette can render the offending
//! source line with a label.

use miette::{NamedSource, SourceSpan};
use quill_syntax::diagnostics::Diagnostic;
use quill_syntax::lexer::Token;
use thiserror::Error;

/// A single syntax error, ready for fancy terminal rendering.
#[derive(Debug, Error, miette::Diagnostic)]
#[error("{message}")]
#[diagnostic(code(quill::syntax_error))]
pub struct SyntaxReport {
    #[source_code]
    src: NamedSource<String>,
    #[label("{message}")]
    span: SourceSpan,
    message: String,
}

impl SyntaxReport {
    /// Resolve a parser diagnostic against the token stream it came from.
    ///
    /// A `token_index` equal to the token count means "at end of input" and
    /// maps to an empty span after the last byte of the source.
    pub fn resolve(
        diagnostic: &Diagnostic,
        tokens: &[Token],
        file_name: &str,
        source: &str,
    ) -> Self {
        let span = match tokens.get(diagnostic.token_index) {
            Some(token) => SourceSpan::new(
                token.span.start.into(),
                token.span.end.saturating_sub(token.span.start),
            ),
            None => SourceSpan::new(source.len().into(), 0),
        };
        Self {
            src: NamedSource::new(file_name, source.to_string()),
            span,
            message: diagnostic.message.clone(),
        }
    }
}
