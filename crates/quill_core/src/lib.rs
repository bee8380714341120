//! Shared language vocabulary for the Quill frontend.
//!
//! This crate is the single source of truth for the reserved words, operators,
//! and punctuation of the Quill language, exposed as closed ID enums plus
//! const metadata tables.
//!
//! ## Notes
//! - This crate is intentionally pure (no lexing, no AST, no IO); the lexer
//!   and parser resolve spellings through these registries instead of
//!   comparing strings at call sites.
//!
//! ## See also
//! - `quill_syntax` for the lexer and parser built on this vocabulary.

pub mod lang;
