//! Go-to-definition implementation.

use std::sync::Arc;

use tracing::trace;

use crate::base::{Position, Range};
use crate::hir::{DocumentContext, Reference, ReferenceResolver, SourceDefinedSymbol, Symbol};

/// A navigation record: where a definition lives and what to highlight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationLink {
    /// Uri of the document declaring the symbol.
    pub target_uri: Arc<str>,
    /// Full declaration span.
    pub target_range: Range,
    /// Span of the declared name.
    pub target_selection_range: Range,
    /// Span of the usage the request started from.
    pub origin_selection_range: Range,
}

/// Answers definition requests on top of a [`ReferenceResolver`].
#[derive(Clone, Debug)]
pub struct DefinitionProvider {
    resolver: ReferenceResolver,
}

impl DefinitionProvider {
    pub fn new(resolver: ReferenceResolver) -> Self {
        Self { resolver }
    }

    /// Find the definition of the symbol at `position`.
    ///
    /// Returns at most one link. Platform symbols resolve but have nowhere
    /// to navigate to, so they give an empty result like a miss does.
    pub fn get_definition(&self, document: &DocumentContext, position: Position) -> Vec<LocationLink> {
        self.resolver
            .find_reference(document.uri(), position)
            .and_then(|reference| self.to_location_link(&reference))
            .into_iter()
            .collect()
    }

    fn to_location_link(&self, reference: &Reference) -> Option<LocationLink> {
        let symbol: &SourceDefinedSymbol = match &reference.target {
            Symbol::SourceDefined(symbol) => symbol,
            Symbol::External(symbol) => {
                trace!(name = symbol.name(), "platform symbol has no source location");
                return None;
            }
        };

        // The owner may have been closed since the reference was resolved
        let owner = self.resolver.server().document(symbol.owner())?;

        Some(LocationLink {
            target_uri: Arc::from(owner.uri()),
            target_range: symbol.range(),
            target_selection_range: symbol.selection_range(),
            origin_selection_range: reference.selection_range,
        })
    }
}
