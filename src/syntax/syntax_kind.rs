//! Syntax kinds for the rowan-based parse tree of BSL modules.
//!
//! Only the subset of the grammar the semantic layer inspects is named
//! here. Parsers may emit [`SyntaxKind::ERROR`] for anything else.

/// All syntax kinds (tokens and nodes) the semantic layer understands.
///
/// Tokens are leaves (identifiers, literals, keywords, punctuation).
/// Nodes are composite (expressions, argument lists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,

    // =========================================================================
    // LITERAL TOKENS
    // =========================================================================
    IDENT,  // Массив, Foo
    NUMBER, // 42, 3.14
    STRING, // "text"
    DATE,   // '20240101'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN, // (
    R_PAREN, // )
    COMMA,   // ,
    DOT,     // .
    PLUS,    // +
    MINUS,   // -
    STAR,    // *
    SLASH,   // /
    PERCENT, // %
    EQ,      // =
    NEQ,     // <>
    LT,      // <
    LT_EQ,   // <=
    GT,      // >
    GT_EQ,   // >=

    // =========================================================================
    // KEYWORDS (matched case-insensitively in both languages by the lexer)
    // =========================================================================
    NEW_KW,       // Новый / New
    TRUE_KW,      // Истина / True
    FALSE_KW,     // Ложь / False
    NULL_KW,      // NULL
    UNDEFINED_KW, // Неопределено / Undefined
    AND_KW,       // И / And
    OR_KW,        // ИЛИ / Or
    NOT_KW,       // НЕ / Not

    // =========================================================================
    // NODES
    // =========================================================================
    MODULE,
    LITERAL,
    NAME_REF,
    PAREN_EXPR,
    BIN_EXPR,
    PREFIX_EXPR,
    CALL_EXPR,
    NEW_EXPR,
    TYPE_NAME,
    ARG_LIST,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT)
    }

    /// Check if this token carries a literal value
    pub fn is_literal_token(self) -> bool {
        matches!(
            self,
            Self::NUMBER
                | Self::STRING
                | Self::DATE
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
                | Self::UNDEFINED_KW
        )
    }

    /// Check if this is a node kind rather than a token kind
    pub fn is_node(self) -> bool {
        (self as u16) >= (Self::MODULE as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16, "unknown syntax kind {}", raw.0);
        // Safety: SyntaxKind is repr(u16), contiguous from 0, and bounds-checked above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BslLanguage {}

impl rowan::Language for BslLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<BslLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<BslLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<BslLanguage>;
/// Position-only handle to a node; does not keep the tree alive.
pub type SyntaxNodePtr = rowan::ast::SyntaxNodePtr<BslLanguage>;
