//! Reference resolution: from a cursor position to the symbol under it.
//!
//! Resolution is a pure lookup over document snapshots:
//!
//! 1. Find the document context for the uri in the [`ServerContext`]
//! 2. Find the recorded occurrence whose range contains the position
//! 3. Materialize its target: external symbols are carried by value,
//!    source-defined ones are fetched from the owning document's table
//!
//! Any step that finds nothing yields `None`. A missing document or a
//! target whose owner was closed or re-analysed is a normal miss.

use std::sync::Arc;

use tracing::{debug, trace};

use super::ids::DefId;
use super::references::{Reference, SymbolRef};
use super::symbols::{SourceDefinedSymbol, Symbol};
use super::workspace::ServerContext;
use crate::base::Position;

/// Maps (document, position) to the reference at that position.
#[derive(Clone, Debug)]
pub struct ReferenceResolver {
    server: Arc<ServerContext>,
}

impl ReferenceResolver {
    pub fn new(server: Arc<ServerContext>) -> Self {
        Self { server }
    }

    /// The document store this resolver reads.
    pub fn server(&self) -> &Arc<ServerContext> {
        &self.server
    }

    /// Find the reference whose selection range contains `position`.
    pub fn find_reference(&self, uri: &str, position: Position) -> Option<Reference> {
        let Some(document) = self.server.document_by_uri(uri) else {
            trace!(uri, "no document context");
            return None;
        };

        let occurrence = document.references().at(position)?;
        trace!(uri, ?position, target = ?occurrence.target, "reference occurrence found");

        let target = match &occurrence.target {
            SymbolRef::External(symbol) => Symbol::External(symbol.clone()),
            SymbolRef::SourceDefined(def) => Symbol::SourceDefined(self.source_symbol(*def)?),
        };

        Some(Reference {
            document: document.id(),
            target,
            selection_range: occurrence.selection_range,
        })
    }

    /// Fetch a source-defined symbol from its owner's current symbol table.
    ///
    /// An id issued by an earlier analysis of the owner is not followed:
    /// its slot may now hold an unrelated symbol.
    pub fn source_symbol(&self, def: DefId) -> Option<SourceDefinedSymbol> {
        let Some(owner) = self.server.document(def.document) else {
            debug!(?def, "owner document is no longer open");
            return None;
        };

        if !def.is_current_for(owner.document_version()) {
            debug!(
                ?def,
                uri = owner.uri(),
                current = ?owner.document_version(),
                "owner was re-analysed since the reference was recorded"
            );
            return None;
        }

        owner.symbol_table().resolve(def).cloned()
    }
}
