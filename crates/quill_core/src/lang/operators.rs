//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol operators like `+`
//! and word operators like `and`) along with precedence, associativity, and
//! fixity metadata. The parser's expression grammar is driven entirely by the
//! precedence values recorded here.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Word operators (`as`, `is`, `and`, `or`, `xor`, `not`) are spelled with
//!   reserved words; those entries have [`OperatorInfo::is_keyword_spelling`]
//!   set to `true` and also appear in [`crate::lang::keywords`].
//! - `or` and `xor` intentionally share a precedence tier: they chain with
//!   each other at the same level instead of nesting.
//!
//! ## Examples
//! ```rust
//! use quill_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("<<"), Some(OperatorId::Shl));
//! assert_eq!(operators::info_for(OperatorId::Star).precedence, 190);
//! assert!(operators::is_prefix(OperatorId::Tilde));
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Define the syntactic role of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    /// Binary operator inside expressions.
    Infix,
    /// Unary operator preceding its operand.
    Prefix,
    /// Statement-level assignment operator; never part of an expression.
    Assignment,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Bitwise
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    TildeEq,
    ShlEq,
    ShrEq,
    AmpEq,
    PipeEq,
    CaretEq,

    // Word operators
    As,
    Is,
    And,
    Or,
    Xor,
    Not,
}

/// Metadata for an operator.
///
/// ## Notes
/// - `precedence` is meaningful for [`Fixity::Infix`] entries only: higher
///   binds tighter, and the absolute values are part of the parser's
///   compatibility contract.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Infix, tightest to loosest
    op(OperatorId::Star, "*", 190, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Slash, "/", 180, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Percent, "%", 170, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Plus, "+", 160, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Minus, "-", 150, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Shl, "<<", 140, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Shr, ">>", 130, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Amp, "&", 120, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Pipe, "|", 110, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Caret, "^", 100, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::As, "as", 95, Associativity::Left, Fixity::Infix, true),
    op(OperatorId::Is, "is", 90, Associativity::Left, Fixity::Infix, true),
    op(OperatorId::EqEq, "==", 80, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::NotEq, "!=", 70, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Gt, ">", 60, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::GtEq, ">=", 50, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Lt, "<", 40, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::LtEq, "<=", 30, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::And, "and", 20, Associativity::Left, Fixity::Infix, true),
    // `or` and `xor` share a tier by design
    op(OperatorId::Or, "or", 10, Associativity::Left, Fixity::Infix, true),
    op(OperatorId::Xor, "xor", 10, Associativity::Left, Fixity::Infix, true),
    // Prefix-only
    op(OperatorId::Tilde, "~", 0, Associativity::None, Fixity::Prefix, false),
    op(OperatorId::Not, "not", 0, Associativity::None, Fixity::Prefix, true),
    // Assignment (statement level)
    op(OperatorId::Eq, "=", 0, Associativity::None, Fixity::Assignment, false),
    op(OperatorId::PlusEq, "+=", 0, Associativity::None, Fixity::Assignment, false),
    op(OperatorId::MinusEq, "-=", 0, Associativity::None, Fixity::Assignment, false),
    op(OperatorId::StarEq, "*=", 0, Associativity::None, Fixity::Assignment, false),
    op(OperatorId::SlashEq, "/=", 0, Associativity::None, Fixity::Assignment, false),
    op(OperatorId::PercentEq, "%=", 0, Associativity::None, Fixity::Assignment, false),
    op(OperatorId::TildeEq, "~=", 0, Associativity::None, Fixity::Assignment, false),
    op(OperatorId::ShlEq, "<<=", 0, Associativity::None, Fixity::Assignment, false),
    op(OperatorId::ShrEq, ">>=", 0, Associativity::None, Fixity::Assignment, false),
    op(OperatorId::AmpEq, "&=", 0, Associativity::None, Fixity::Assignment, false),
    op(OperatorId::PipeEq, "|=", 0, Associativity::None, Fixity::Assignment, false),
    op(OperatorId::CaretEq, "^=", 0, Associativity::None, Fixity::Assignment, false),
];

/// Operators that may appear in prefix position before a basic expression.
pub const PREFIX_OPERATORS: &[OperatorId] = &[
    OperatorId::Plus,
    OperatorId::Minus,
    OperatorId::Amp,
    OperatorId::Star,
    OperatorId::Tilde,
    OperatorId::Not,
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a
///   programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Resolve an operator spelling to its identifier.
///
/// ## Notes
/// - Matching is **case-sensitive** and includes word-operator spellings.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Return the infix precedence for an operator, if it has an infix role.
pub fn infix_precedence(id: OperatorId) -> Option<u8> {
    let info = info_for(id);
    matches!(info.fixity, Fixity::Infix).then_some(info.precedence)
}

/// Return `true` if the operator may appear in prefix position.
pub fn is_prefix(id: OperatorId) -> bool {
    PREFIX_OPERATORS.contains(&id)
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
    is_keyword_spelling: bool,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operator_round_trips_through_the_registry() {
        for info in OPERATORS {
            assert_eq!(from_str(info.spelling), Some(info.id));
            assert_eq!(info_for(info.id).spelling, info.spelling);
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert!(info_for(OperatorId::Star).precedence > info_for(OperatorId::Plus).precedence);
    }

    #[test]
    fn or_and_xor_share_a_tier() {
        assert_eq!(
            info_for(OperatorId::Or).precedence,
            info_for(OperatorId::Xor).precedence
        );
    }

    #[test]
    fn assignment_operators_have_no_infix_role() {
        assert_eq!(infix_precedence(OperatorId::Eq), None);
        assert_eq!(infix_precedence(OperatorId::PlusEq), None);
        assert_eq!(infix_precedence(OperatorId::Star), Some(190));
    }

    #[test]
    fn prefix_set_matches_the_contract() {
        for id in [
            OperatorId::Plus,
            OperatorId::Minus,
            OperatorId::Amp,
            OperatorId::Star,
            OperatorId::Tilde,
            OperatorId::Not,
        ] {
            assert!(is_prefix(id));
        }
        assert!(!is_prefix(OperatorId::Slash));
        assert!(!is_prefix(OperatorId::Eq));
    }
}
