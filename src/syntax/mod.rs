//! Parse-tree interface.
//!
//! The grammar-driven parser lives outside this crate. It hands over a
//! rowan green tree built from the [`SyntaxKind`]s defined here; the rest
//! of the crate only reads that tree.

mod syntax_kind;

pub use syntax_kind::{
    BslLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodePtr, SyntaxToken,
};

// Green trees are what documents store: they are immutable and thread-safe.
pub use rowan::{GreenNode, GreenNodeBuilder};
