//! # bsl-ls-base
//!
//! Core library of a BSL (1C:Enterprise) language server: reference
//! resolution, the expression tree and go-to-definition.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → IDE features (goto-definition)
//!   ↓
//! hir     → Semantic model: symbols, references, expression tree
//!   ↓
//! syntax  → Parse-tree interface (rowan green trees)
//!   ↓
//! config  → Language server configuration
//!   ↓
//! base    → Primitives (DocumentId, Position, Range, LineIndex)
//! ```
//!
//! Parsing and symbol collection happen outside this crate; they hand
//! finished [`hir::DocumentContext`]s to a [`hir::ServerContext`].

/// Foundation types: DocumentId, Position, Range
pub mod base;

/// Language server configuration and configuration-root discovery
pub mod config;

/// High-level IR: symbols, references, expressions
pub mod hir;

/// IDE features: goto-definition
pub mod ide;

/// Parse-tree kinds and rowan aliases
pub mod syntax;

// Re-export foundation types
pub use base::{DocumentId, LineIndex, Position, Range, TextRange, TextSize};

pub use config::LanguageServerConfiguration;
pub use hir::{DocumentContext, ReferenceResolver, ServerContext};
pub use ide::{DefinitionProvider, LocationLink};
