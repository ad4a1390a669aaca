//! Document context: one analysed snapshot of an open document.

use std::sync::Arc;

use super::references::{ReferenceIndex, ReferenceOccurrence};
use super::symbols::SymbolTable;
use crate::base::{DocumentId, DocumentVersion, Generation, LineIndex, Range};
use crate::syntax::{GreenNode, SyntaxNode, SyntaxNodePtr};

/// An analysed document: its text, parse tree, symbols and references.
///
/// Built once by the analysis pipeline and never mutated afterwards. A
/// content change produces a new context that replaces this one in the
/// [`ServerContext`](super::ServerContext).
#[derive(Debug)]
pub struct DocumentContext {
    document_version: DocumentVersion,
    uri: Arc<str>,
    version: i32,
    text: Arc<str>,
    line_index: LineIndex,
    parse_tree: GreenNode,
    symbol_table: SymbolTable,
    references: ReferenceIndex,
}

impl DocumentContext {
    /// Start building the context of one analysis pass over `uri`.
    ///
    /// `document_version` comes from
    /// [`ServerContext::begin_analysis`](super::ServerContext::begin_analysis).
    pub fn builder(
        document_version: DocumentVersion,
        uri: impl Into<Arc<str>>,
        text: impl Into<Arc<str>>,
        parse_tree: GreenNode,
    ) -> DocumentContextBuilder {
        DocumentContextBuilder {
            document_version,
            uri: uri.into(),
            version: 0,
            text: text.into(),
            parse_tree,
            symbol_table: SymbolTable::new(document_version),
            occurrences: Vec::new(),
        }
    }

    pub fn id(&self) -> DocumentId {
        self.document_version.document
    }

    /// Analysis pass this context was built by.
    pub fn generation(&self) -> Generation {
        self.document_version.generation
    }

    pub fn document_version(&self) -> DocumentVersion {
        self.document_version
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Editor-supplied version of the content this context was built from.
    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// A fresh red-tree root over the stored green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.parse_tree.clone())
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    pub fn references(&self) -> &ReferenceIndex {
        &self.references
    }

    /// Line/column span of a parse-tree node.
    pub fn range_of(&self, ptr: &SyntaxNodePtr) -> Range {
        self.line_index.range(ptr.text_range())
    }
}

/// Assembles a [`DocumentContext`].
#[derive(Debug)]
pub struct DocumentContextBuilder {
    document_version: DocumentVersion,
    uri: Arc<str>,
    version: i32,
    text: Arc<str>,
    parse_tree: GreenNode,
    symbol_table: SymbolTable,
    occurrences: Vec<ReferenceOccurrence>,
}

impl DocumentContextBuilder {
    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Use a symbol table prepared by the symbol collector.
    ///
    /// # Panics
    /// Panics if the table was made for another document or pass.
    pub fn symbol_table(mut self, table: SymbolTable) -> Self {
        assert_eq!(
            table.version(),
            self.document_version,
            "symbol table of another document or analysis pass"
        );
        self.symbol_table = table;
        self
    }

    /// Record one reference occurrence.
    pub fn reference(mut self, occurrence: ReferenceOccurrence) -> Self {
        self.occurrences.push(occurrence);
        self
    }

    /// Record several reference occurrences.
    pub fn references(mut self, occurrences: impl IntoIterator<Item = ReferenceOccurrence>) -> Self {
        self.occurrences.extend(occurrences);
        self
    }

    /// Finish the context.
    ///
    /// # Panics
    /// Panics if reference ranges overlap (see [`ReferenceIndex::from_occurrences`]).
    pub fn build(self) -> DocumentContext {
        DocumentContext {
            document_version: self.document_version,
            uri: self.uri,
            version: self.version,
            line_index: LineIndex::new(&self.text),
            text: self.text,
            parse_tree: self.parse_tree,
            symbol_table: self.symbol_table,
            references: ReferenceIndex::from_occurrences(self.occurrences),
        }
    }
}
