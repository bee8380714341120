#![forbid(unsafe_code)]
//! Quill language frontend
//!
//! Quill is a small general-purpose language with packages, typed variable
//! and function declarations, struct types with sum-type `cases`, and a full
//! expression grammar. This crate provides the frontend driver: a CLI over
//! the reusable `quill_syntax` crate (lexer, combinator parser, syntax tree,
//! diagnostics).
//!
//! Parsing is tolerant by construction: a parse never aborts, it records
//! diagnostics at the points of recovery and keeps going, so one pass can
//! report every syntax error in a file.

pub mod cli;

pub use quill_syntax::{diagnostics, lexer, parser, tree};
