//! High-level IR (HIR): the semantic model of BSL documents.
//!
//! ## Key Types
//!
//! - [`ServerContext`] - Store of live [`DocumentContext`]s, keyed by [`DocumentId`](crate::base::DocumentId)
//! - [`SymbolTable`] - Per-document arena of [`SourceDefinedSymbol`]s
//! - [`ReferenceIndex`] - Per-document usage sites, ordered by position
//! - [`ReferenceResolver`] - Position → [`Reference`] lookup
//! - [`Expression`] - Expression tree for call-like constructs
//!
//! ## Data Flow
//!
//! ```text
//! parse tree + symbols + occurrences   ← produced by the analysis pipeline
//!     │
//!     ▼
//! DocumentContext                      ← immutable snapshot
//!     │
//!     ▼
//! ServerContext                        ← live documents by id
//!     │
//!     ▼
//! ReferenceResolver::find_reference    ← position lookup
//! ```

mod document;
pub mod expr;
mod ids;
mod references;
mod resolve;
mod symbols;
mod workspace;

pub use document::{DocumentContext, DocumentContextBuilder};
pub use expr::{
    CallNode, ConstructorCallNode, Expression, ExpressionTreeBuilder, LiteralKind,
    MethodCallNode, NodeType, TerminalSymbolNode,
};
pub use ids::{DefId, LocalDefId};
pub use references::{Reference, ReferenceIndex, ReferenceOccurrence, SymbolRef};
pub use resolve::ReferenceResolver;
pub use symbols::{
    ExternalSymbol, ExternalSymbolKind, SourceDefinedSymbol, Symbol, SymbolKind, SymbolTable,
};
pub use workspace::ServerContext;
