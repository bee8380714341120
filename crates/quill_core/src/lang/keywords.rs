//! Define the reserved keyword vocabulary for the Quill language.
//!
//! This module is the single source of truth for reserved words: a stable
//! identifier ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that
//! records canonical spellings and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Some reserved words are also "word operators" (e.g. `and`, `as`). If you
//!   need operator semantics like precedence, use [`crate::lang::operators`].
//! - A number of words (`switch`, `fallthrough`, `until`, `thru`, `by`,
//!   `yield`, `impl`) are reserved ahead of any grammar that uses them.
//!
//! ## Examples
//! ```rust
//! use quill_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("fun"), Some(KeywordId::Fun));
//! assert_eq!(keywords::as_str(KeywordId::Fun), "fun");
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Modules / imports
    Package,
    From,
    Import,

    // Access modifiers
    Pub,
    Priv,

    // Definitions / declarations
    Var,
    Fun,
    Struct,
    Cases,
    Embed,
    Impl,

    // Type qualifiers
    Mut,
    Const,

    // Control flow / statements
    Pass,
    Return,
    Yield,
    Break,
    Continue,
    If,
    Else,
    Switch,
    Case,
    Default,
    Fallthrough,
    For,
    In,
    Until,
    Thru,
    By,
    Do,
    While,

    // Word operators
    As,
    Is,
    And,
    Or,
    Xor,
    Not,

    // Literals
    True,
    False,
}

/// High-level grouping for documentation and tooling.
///
/// Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Module,
    Definition,
    Modifier,
    ControlFlow,
    Operator,
    Literal,
}

/// Metadata for a reserved keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub spelling: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all reserved keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    kw(KeywordId::Package, "package", KeywordCategory::Module),
    kw(KeywordId::From, "from", KeywordCategory::Module),
    kw(KeywordId::Import, "import", KeywordCategory::Module),
    kw(KeywordId::Pub, "pub", KeywordCategory::Modifier),
    kw(KeywordId::Priv, "priv", KeywordCategory::Modifier),
    kw(KeywordId::Var, "var", KeywordCategory::Definition),
    kw(KeywordId::Fun, "fun", KeywordCategory::Definition),
    kw(KeywordId::Struct, "struct", KeywordCategory::Definition),
    kw(KeywordId::Cases, "cases", KeywordCategory::Definition),
    kw(KeywordId::Embed, "embed", KeywordCategory::Definition),
    kw(KeywordId::Impl, "impl", KeywordCategory::Definition),
    kw(KeywordId::Mut, "mut", KeywordCategory::Modifier),
    kw(KeywordId::Const, "const", KeywordCategory::Modifier),
    kw(KeywordId::Pass, "pass", KeywordCategory::ControlFlow),
    kw(KeywordId::Return, "return", KeywordCategory::ControlFlow),
    kw(KeywordId::Yield, "yield", KeywordCategory::ControlFlow),
    kw(KeywordId::Break, "break", KeywordCategory::ControlFlow),
    kw(KeywordId::Continue, "continue", KeywordCategory::ControlFlow),
    kw(KeywordId::If, "if", KeywordCategory::ControlFlow),
    kw(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    kw(KeywordId::Switch, "switch", KeywordCategory::ControlFlow),
    kw(KeywordId::Case, "case", KeywordCategory::ControlFlow),
    kw(KeywordId::Default, "default", KeywordCategory::ControlFlow),
    kw(KeywordId::Fallthrough, "fallthrough", KeywordCategory::ControlFlow),
    kw(KeywordId::For, "for", KeywordCategory::ControlFlow),
    kw(KeywordId::In, "in", KeywordCategory::ControlFlow),
    kw(KeywordId::Until, "until", KeywordCategory::ControlFlow),
    kw(KeywordId::Thru, "thru", KeywordCategory::ControlFlow),
    kw(KeywordId::By, "by", KeywordCategory::ControlFlow),
    kw(KeywordId::Do, "do", KeywordCategory::ControlFlow),
    kw(KeywordId::While, "while", KeywordCategory::ControlFlow),
    kw(KeywordId::As, "as", KeywordCategory::Operator),
    kw(KeywordId::Is, "is", KeywordCategory::Operator),
    kw(KeywordId::And, "and", KeywordCategory::Operator),
    kw(KeywordId::Or, "or", KeywordCategory::Operator),
    kw(KeywordId::Xor, "xor", KeywordCategory::Operator),
    kw(KeywordId::Not, "not", KeywordCategory::Operator),
    kw(KeywordId::True, "true", KeywordCategory::Literal),
    kw(KeywordId::False, "false", KeywordCategory::Literal),
];

/// Resolve a spelling to a keyword id, if reserved.
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(spelling: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.spelling == spelling).map(|k| k.id)
}

/// Return the canonical spelling for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a
///   programming error).
pub fn as_str(id: KeywordId) -> &'static str {
    KEYWORDS
        .iter()
        .find(|k| k.id == id)
        .expect("keyword info missing")
        .spelling
}

// --- helpers -----------------------------------------------------------------

const fn kw(id: KeywordId, spelling: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, spelling, category }
}
