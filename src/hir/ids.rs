//! Ids of source-defined symbols.
//!
//! A [`DefId`] is a slot in one document's [`SymbolTable`](super::SymbolTable)
//! qualified by the analysis pass that filled the table. Once the document
//! is re-analysed the slot may hold another symbol, so a `DefId` is only
//! followed while its [`Generation`] is still the owner's current one.

use std::fmt;

use crate::base::{DocumentId, DocumentVersion, Generation};

/// Slot index inside one symbol table, in declaration order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LocalDefId(pub u32);

impl LocalDefId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LocalDefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Global id of a source-defined symbol.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct DefId {
    /// Declaring document
    pub document: DocumentId,
    /// Analysis pass that built the declaring symbol table
    pub generation: Generation,
    pub local: LocalDefId,
}

impl DefId {
    #[inline]
    pub const fn new(document: DocumentId, generation: Generation, local: LocalDefId) -> Self {
        Self {
            document,
            generation,
            local,
        }
    }

    /// The owner snapshot this id was issued against.
    #[inline]
    pub const fn owner_version(self) -> DocumentVersion {
        self.document.at(self.generation)
    }

    /// Whether this id still addresses the owner's current table.
    #[inline]
    pub fn is_current_for(self, owner: DocumentVersion) -> bool {
        self.owner_version() == owner
    }
}

impl fmt::Debug for DefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DefId({:?}{:?})", self.owner_version(), self.local)
    }
}
