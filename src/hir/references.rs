//! References: usage sites recorded while analysing a document.
//!
//! Analysis records each usage as a [`ReferenceOccurrence`] whose target is
//! a [`SymbolRef`]. The [`ReferenceResolver`](super::ReferenceResolver)
//! turns an occurrence into a [`Reference`] by looking the target up.

use super::ids::DefId;
use super::symbols::{ExternalSymbol, Symbol};
use crate::base::{DocumentId, Position, Range};

/// What a recorded usage points at, before lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolRef {
    /// A symbol declared in some document's symbol table
    SourceDefined(DefId),
    /// A platform symbol; carried by value since it has no table
    External(ExternalSymbol),
}

/// A usage of a symbol in the analysed document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReferenceOccurrence {
    pub target: SymbolRef,
    /// Span of the identifier token at the usage site
    pub selection_range: Range,
}

impl ReferenceOccurrence {
    pub fn new(target: SymbolRef, selection_range: Range) -> Self {
        Self {
            target,
            selection_range,
        }
    }

    pub fn to_source(def: DefId, selection_range: Range) -> Self {
        Self::new(SymbolRef::SourceDefined(def), selection_range)
    }

    pub fn to_external(symbol: ExternalSymbol, selection_range: Range) -> Self {
        Self::new(SymbolRef::External(symbol), selection_range)
    }
}

/// A resolved reference: a usage site and the symbol it targets.
///
/// `document` is always the document where the usage occurs, even when
/// the target is declared elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reference {
    pub document: DocumentId,
    pub target: Symbol,
    pub selection_range: Range,
}

impl Reference {
    /// Whether the target has a source location to navigate to.
    pub fn is_source_defined_symbol_reference(&self) -> bool {
        self.target.is_source_defined()
    }
}

/// All reference occurrences of one document, ordered by position.
///
/// Occurrence ranges cover only the identifier token, so within one
/// analysis pass they never overlap. Lookup is therefore a binary search
/// for the single range containing a position.
#[derive(Clone, Debug, Default)]
pub struct ReferenceIndex {
    /// Sorted by `selection_range.start`, pairwise disjoint
    occurrences: Vec<ReferenceOccurrence>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from the occurrences collected for a document.
    ///
    /// # Panics
    /// Panics if two occurrence ranges overlap, which means the analysis
    /// pass recorded something wider than an identifier token.
    pub fn from_occurrences(mut occurrences: Vec<ReferenceOccurrence>) -> Self {
        occurrences.sort_by_key(|occurrence| occurrence.selection_range.start);

        for pair in occurrences.windows(2) {
            let (prev, next) = (pair[0].selection_range, pair[1].selection_range);
            assert!(
                !prev.intersects(next),
                "overlapping reference ranges {prev:?} and {next:?}"
            );
        }

        Self { occurrences }
    }

    /// Find the occurrence whose range contains `position`.
    pub fn at(&self, position: Position) -> Option<&ReferenceOccurrence> {
        // Last occurrence starting at or before the position is the only candidate
        let idx = self
            .occurrences
            .partition_point(|occurrence| occurrence.selection_range.start <= position);

        let candidate = self.occurrences.get(idx.checked_sub(1)?)?;
        candidate
            .selection_range
            .contains(position)
            .then_some(candidate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceOccurrence> {
        self.occurrences.iter()
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

impl FromIterator<ReferenceOccurrence> for ReferenceIndex {
    fn from_iter<I: IntoIterator<Item = ReferenceOccurrence>>(iter: I) -> Self {
        Self::from_occurrences(iter.into_iter().collect())
    }
}
