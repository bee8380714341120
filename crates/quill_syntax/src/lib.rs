//! Shared syntax frontend for the Quill language: lexer, parser, syntax tree,
//! diagnostics.
//!
//! This crate is dependency-light and intended for reuse across the compiler
//! driver, formatter, and future interactive tooling.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does not do name
//!   resolution, type checking, or lowering.
//! - Vocabulary identity (keywords/operators/punctuation) comes from the
//!   `quill_core::lang` registries.
//! - Parsing never aborts: malformed input produces a tree studded with
//!   diagnostic leaves, so callers can report many errors in one pass.
//!
//! ## Examples
//! ```rust
//! use quill_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("package demo;");
//! let result = parser::parse(&tokens);
//! assert!(result.diagnostics.is_empty());
//! ```
//!
//! ## See also
//! - `quill_core::lang` for registry-backed language vocabulary.

pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod tree;
