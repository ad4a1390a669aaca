//! Live-document store.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use super::document::DocumentContext;
use crate::base::{DocumentId, DocumentVersion, Generation};

/// Owns the analysed context of every open document.
///
/// This is the lookup table behind every [`DocumentId`]: symbols and
/// references name documents by id and come here to reach them. Readers
/// get `Arc` snapshots, so a document replaced or closed mid-query stays
/// valid for whoever already holds it and simply disappears for the next
/// lookup.
#[derive(Debug, Default)]
pub struct ServerContext {
    inner: RwLock<ServerContextInner>,
}

#[derive(Debug, Default)]
struct ServerContextInner {
    /// Uri → DocumentId mapping
    uri_to_id: IndexMap<Arc<str>, DocumentId>,
    /// DocumentId → current analysed context
    documents: IndexMap<DocumentId, Arc<DocumentContext>>,
    /// Next DocumentId to assign
    next_id: u32,
    /// Last analysis stamp handed out, shared by all documents
    last_generation: Generation,
}

impl ServerContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or assign the id for a uri.
    ///
    /// The id stays the same while the uri is known.
    pub fn document_id(&self, uri: &str) -> DocumentId {
        // Fast path: read lock
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.uri_to_id.get(uri) {
                return id;
            }
        }

        // Slow path: write lock
        let mut inner = self.inner.write();

        // Double-check
        if let Some(&id) = inner.uri_to_id.get(uri) {
            return id;
        }

        let id = DocumentId::new(inner.next_id);
        inner.next_id += 1;
        inner.uri_to_id.insert(Arc::from(uri), id);
        id
    }

    /// Start an analysis pass over `uri`.
    ///
    /// Returns the document id with a fresh stamp, larger than any issued
    /// before. The pass builds its symbol table and [`DocumentContext`]
    /// under this version.
    pub fn begin_analysis(&self, uri: &str) -> DocumentVersion {
        let id = self.document_id(uri);
        let mut inner = self.inner.write();
        inner.last_generation = inner.last_generation.next();
        id.at(inner.last_generation)
    }

    /// Publish an analysed context, replacing any previous one for the document.
    ///
    /// The context is dropped and `None` returned when the document was
    /// closed while it was being analysed, or when a later pass over the
    /// same document has already been published.
    pub fn add_document(&self, context: DocumentContext) -> Option<Arc<DocumentContext>> {
        let mut inner = self.inner.write();

        if inner.uri_to_id.get(context.uri()).copied() != Some(context.id()) {
            debug!(
                uri = context.uri(),
                version = ?context.document_version(),
                "document closed during analysis, context dropped"
            );
            return None;
        }

        if let Some(current) = inner.documents.get(&context.id()) {
            if !current
                .document_version()
                .is_superseded_by(context.document_version())
            {
                debug!(
                    uri = context.uri(),
                    version = ?context.document_version(),
                    current = ?current.document_version(),
                    "newer analysis already published, context dropped"
                );
                return None;
            }
        }

        let context = Arc::new(context);
        let previous = inner.documents.insert(context.id(), Arc::clone(&context));
        debug!(
            uri = context.uri(),
            version = context.version(),
            generation = ?context.generation(),
            replaced = previous.is_some(),
            "document context published"
        );
        Some(context)
    }

    /// Close a document: drop its context and forget its id.
    pub fn remove_document(&self, uri: &str) -> Option<Arc<DocumentContext>> {
        let mut inner = self.inner.write();
        let id = inner.uri_to_id.swap_remove(uri)?;
        let removed = inner.documents.swap_remove(&id);
        debug!(uri, %id, "document closed");
        removed
    }

    /// Current context of a document, if it is open and analysed.
    pub fn document(&self, id: DocumentId) -> Option<Arc<DocumentContext>> {
        self.inner.read().documents.get(&id).cloned()
    }

    /// Current context for a uri, if it is open and analysed.
    pub fn document_by_uri(&self, uri: &str) -> Option<Arc<DocumentContext>> {
        let inner = self.inner.read();
        let id = inner.uri_to_id.get(uri)?;
        inner.documents.get(id).cloned()
    }

    /// Number of analysed documents.
    pub fn len(&self) -> usize {
        self.inner.read().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all analysed documents.
    pub fn documents(&self) -> Vec<Arc<DocumentContext>> {
        self.inner.read().documents.values().cloned().collect()
    }
}
