//! Identity of open documents and of their analysis snapshots.

use std::fmt;

/// An arena index for a live document.
///
/// Ids are handed out by the [`ServerContext`](crate::hir::ServerContext)
/// when a uri is first seen and are forgotten when the document closes;
/// a reopened document gets a new one. Symbols name their owner by id, so
/// they never keep a closed document alive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DocumentId(pub u32);

impl DocumentId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// This document as seen by one particular analysis pass.
    #[inline]
    pub const fn at(self, generation: Generation) -> DocumentVersion {
        DocumentVersion {
            document: self,
            generation,
        }
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

/// Stamp of one analysis pass.
///
/// Issued from a single server-wide counter, so a later analysis of any
/// document always carries a larger stamp than an earlier one. Ids that
/// point into a symbol table carry the stamp of the pass that built it.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Generation(pub u64);

impl Generation {
    /// The stamp following this one.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// A document together with the analysis pass that produced its content.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct DocumentVersion {
    pub document: DocumentId,
    pub generation: Generation,
}

impl DocumentVersion {
    /// Whether `other` is a later analysis of the same document.
    pub fn is_superseded_by(&self, other: DocumentVersion) -> bool {
        self.document == other.document && self.generation < other.generation
    }
}

impl fmt::Debug for DocumentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.document, self.generation)
    }
}
