//! Registry-backed language vocabulary.
//!
//! Submodules define one registry each:
//! - [`keywords`] — reserved words
//! - [`operators`] — symbol and word operators, with precedence metadata
//! - [`punctuation`] — delimiters, separators, and arrows

pub mod keywords;
pub mod operators;
pub mod punctuation;
