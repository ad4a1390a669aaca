//! IDE features: high-level APIs for editor-facing handlers.
//!
//! This module provides the interface between the semantic model (HIR)
//! and the protocol layer. Each provider corresponds to one request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take a document snapshot in, return data out
//! 2. **No protocol types**: Uses our own types, converted at the boundary
//! 3. **Composable**: Built on top of HIR lookups

mod goto;

pub use goto::{DefinitionProvider, LocationLink};
