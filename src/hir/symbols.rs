//! Symbols: declarations that references can point at.
//!
//! A [`Symbol`] is either declared in a BSL document ([`SourceDefinedSymbol`])
//! or supplied by the platform ([`ExternalSymbol`]). Only the former has a
//! location to navigate to.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::ids::{DefId, LocalDefId};
use crate::base::{DocumentId, DocumentVersion, Generation, Range};

// ============================================================================
// SYMBOL KINDS
// ============================================================================

/// What a source-defined symbol declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// The module itself
    Module,
    /// A procedure or function
    Method,
    /// A module or local variable
    Variable,
    /// A method parameter
    Parameter,
    /// A `#Область` / `#Region` block
    Region,
}

/// What a platform symbol provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExternalSymbolKind {
    /// A global context method such as `СтрДлина`
    GlobalMethod,
    /// A global context property
    GlobalProperty,
    /// A platform type such as `Массив`
    Type,
}

// ============================================================================
// SYMBOLS
// ============================================================================

/// A symbol declared in source code.
///
/// The owner is a [`DocumentId`] rather than the document itself; callers
/// look the owner up in the [`ServerContext`](super::ServerContext) when
/// they need its uri.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceDefinedSymbol {
    name: SmolStr,
    kind: SymbolKind,
    owner: DocumentId,
    range: Range,
    selection_range: Range,
}

impl SourceDefinedSymbol {
    /// Create a symbol.
    ///
    /// # Panics
    /// Panics if `selection_range` is not contained in `range`: that means
    /// the symbol collector produced inconsistent spans.
    pub fn new(
        name: impl Into<SmolStr>,
        kind: SymbolKind,
        owner: DocumentId,
        range: Range,
        selection_range: Range,
    ) -> Self {
        let name = name.into();
        assert!(
            range.contains_range(selection_range),
            "selection range {selection_range:?} of `{name}` is outside its range {range:?}"
        );
        Self {
            name,
            kind,
            owner,
            range,
            selection_range,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// The document declaring this symbol.
    pub fn owner(&self) -> DocumentId {
        self.owner
    }

    /// Full declaration span.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Span of the declared name only.
    pub fn selection_range(&self) -> Range {
        self.selection_range
    }
}

/// A platform-provided symbol. It has no document and no location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExternalSymbol {
    name: SmolStr,
    kind: ExternalSymbolKind,
}

impl ExternalSymbol {
    pub fn new(name: impl Into<SmolStr>, kind: ExternalSymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ExternalSymbolKind {
        self.kind
    }
}

/// The target of a resolved reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    SourceDefined(SourceDefinedSymbol),
    External(ExternalSymbol),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::SourceDefined(symbol) => symbol.name(),
            Symbol::External(symbol) => symbol.name(),
        }
    }

    /// The source declaration, if this symbol has one.
    pub fn as_source_defined(&self) -> Option<&SourceDefinedSymbol> {
        match self {
            Symbol::SourceDefined(symbol) => Some(symbol),
            Symbol::External(_) => None,
        }
    }

    pub fn is_source_defined(&self) -> bool {
        matches!(self, Symbol::SourceDefined(_))
    }
}

impl From<SourceDefinedSymbol> for Symbol {
    fn from(symbol: SourceDefinedSymbol) -> Self {
        Symbol::SourceDefined(symbol)
    }
}

impl From<ExternalSymbol> for Symbol {
    fn from(symbol: ExternalSymbol) -> Self {
        Symbol::External(symbol)
    }
}

// ============================================================================
// SYMBOL TABLE
// ============================================================================

/// Per-document table of source-defined symbols.
///
/// Symbols are stored in a single vector and addressed by [`LocalDefId`].
/// Every id the table hands out carries the table's analysis pass.
/// Name lookup is case-insensitive, as BSL identifiers are.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    version: DocumentVersion,
    symbols: Vec<SourceDefinedSymbol>,
    /// Lowercased name -> symbol indices (declaration order)
    by_name: FxHashMap<SmolStr, Vec<LocalDefId>>,
}

impl SymbolTable {
    /// Create an empty table for one analysis pass of a document.
    ///
    /// Obtain `version` from
    /// [`ServerContext::begin_analysis`](super::ServerContext::begin_analysis).
    pub fn new(version: DocumentVersion) -> Self {
        Self {
            version,
            symbols: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    /// The document this table belongs to.
    pub fn document(&self) -> DocumentId {
        self.version.document
    }

    /// The analysis pass that fills this table.
    pub fn generation(&self) -> Generation {
        self.version.generation
    }

    pub fn version(&self) -> DocumentVersion {
        self.version
    }

    fn def_id(&self, local: LocalDefId) -> DefId {
        DefId::new(self.version.document, self.version.generation, local)
    }

    /// Add a symbol and return its id.
    ///
    /// # Panics
    /// Panics if the symbol is owned by a different document.
    pub fn insert(&mut self, symbol: SourceDefinedSymbol) -> DefId {
        assert_eq!(
            symbol.owner(),
            self.version.document,
            "symbol `{}` does not belong to this table",
            symbol.name()
        );

        let local = LocalDefId::new(self.symbols.len() as u32);
        self.by_name
            .entry(name_key(symbol.name()))
            .or_default()
            .push(local);
        self.symbols.push(symbol);

        self.def_id(local)
    }

    /// Get a symbol by its local index.
    pub fn get(&self, local: LocalDefId) -> Option<&SourceDefinedSymbol> {
        self.symbols.get(local.index() as usize)
    }

    /// Follow an id issued by this document's analysis.
    ///
    /// Returns `None` when the id was issued by another document or by
    /// an earlier pass over this one: the slot may hold something else now.
    pub fn resolve(&self, def: DefId) -> Option<&SourceDefinedSymbol> {
        if !def.is_current_for(self.version) {
            return None;
        }
        self.get(def.local)
    }

    /// Look up all symbols declared under `name`, ignoring case.
    pub fn lookup(&self, name: &str) -> Vec<DefId> {
        self.by_name
            .get(&name_key(name))
            .map(|locals| {
                locals
                    .iter()
                    .map(|&local| self.def_id(local))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Iterate over all symbols with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DefId, &SourceDefinedSymbol)> + '_ {
        self.symbols.iter().enumerate().map(|(i, symbol)| {
(self.def_id(LocalDefId::new(i as u32)), symbol)
        })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

fn name_key(name: &str) -> SmolStr {
    SmolStr::from(name.to_lowercase())
}
