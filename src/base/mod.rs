//! Foundation types for the BSL language server core.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`DocumentId`] - Arena index of an open document
//! - [`Generation`], [`DocumentVersion`] - Analysis pass stamps
//! - [`Position`], [`Range`] - Zero-based line/column coordinates
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`TextRange`], [`TextSize`] - Byte offsets inside the parse tree
//!
//! This module has NO dependencies on other crate modules.

mod document_id;
mod span;

pub use document_id::{DocumentId, DocumentVersion, Generation};
pub use span::{LineIndex, Position, Range, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
