//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use quill_syntax::{lexer, parser};

use super::report::SyntaxReport;
use super::{CliError, CliResult, ExitCode};

/// Parse a source file, print its syntax tree, and render any diagnostics.
///
/// Exits successfully only when the file parsed cleanly.
pub fn parse_file(path: &Path) -> CliResult<ExitCode> {
    let (file_name, source) = read_source(path)?;

    let tokens = lexer::lex(&source);
    let result = parser::parse(&tokens);

    print!("{}", result.tree.pretty());

    for diagnostic in &result.diagnostics {
        let report = SyntaxReport::resolve(diagnostic, &tokens, &file_name, &source);
        eprintln!("{:?}", miette::Report::new(report));
    }

    if result.diagnostics.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "{} error{} found",
            result.diagnostics.len(),
            if result.diagnostics.len() == 1 { "" } else { "s" }
        );
        Ok(ExitCode::FAILURE)
    }
}

/// Tokenize a source file and print one token per line.
pub fn lex_file(path: &Path) -> CliResult<ExitCode> {
    let (_, source) = read_source(path)?;

    for (index, token) in lexer::lex(&source).iter().enumerate() {
        println!(
            "{index:>4}  {:<12} {:?}",
            format!("{:?}", token.kind),
            token.text
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn read_source(path: &Path) -> CliResult<(String, String)> {
    let file_name = path.display().to_string();
    let source = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Cannot read {file_name}: {e}")))?;
    Ok((file_name, source))
}
