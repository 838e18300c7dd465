//! Temporary download handles for generated documents.
//!
//! Generating an ICS file or an invoice publishes its bytes to a
//! [`DocumentStore`] and yields a [`DocumentHandle`]. Dropping the handle
//! revokes the published document. A [`DownloadSlot`] holds the current
//! handle for a view and releases the old one whenever it is replaced.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// A published document held by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    /// Suggested download name.
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// Document bytes.
    pub bytes: Vec<u8>,
}

/// Somewhere generated documents can be published for download.
pub trait DocumentStore: Send + Sync {
    /// Publishes a document and returns the href it can be fetched from.
    fn publish(&self, document: StoredDocument) -> EngineResult<String>;

    /// Removes a published document.
    fn revoke(&self, href: &str) -> EngineResult<()>;
}

/// An in-memory [`DocumentStore`] handing out `blob:` hrefs.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<String, StoredDocument>>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of a published document.
    pub fn get(&self, href: &str) -> Option<StoredDocument> {
        self.documents
            .lock()
            .ok()
            .and_then(|documents| documents.get(href).cloned())
    }

    /// Number of documents currently published.
    pub fn len(&self) -> usize {
        self.documents.lock().map(|d| d.len()).unwrap_or(0)
    }

    /// Returns true if nothing is published.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn publish(&self, document: StoredDocument) -> EngineResult<String> {
        let href = format!("blob:{}", Uuid::new_v4());
        let mut documents = self.documents.lock().map_err(|_| EngineError::DocumentStoreError {
            message: "document store lock poisoned".to_string(),
        })?;
        documents.insert(href.clone(), document);
        Ok(href)
    }

    fn revoke(&self, href: &str) -> EngineResult<()> {
        let mut documents = self.documents.lock().map_err(|_| EngineError::DocumentStoreError {
            message: "document store lock poisoned".to_string(),
        })?;
        documents
            .remove(href)
            .map(|_| ())
            .ok_or_else(|| EngineError::DocumentStoreError {
                message: format!("no document published at {}", href),
            })
    }
}

/// A published document that is revoked when dropped.
pub struct DocumentHandle {
    store: Arc<dyn DocumentStore>,
    href: String,
    filename: String,
    mime_type: String,
}

impl DocumentHandle {
    /// Publishes `document` to `store`.
    pub fn publish(store: Arc<dyn DocumentStore>, document: StoredDocument) -> EngineResult<Self> {
        let filename = document.filename.clone();
        let mime_type = document.mime_type.clone();
        let href = store.publish(document)?;
        debug!(href = %href, filename = %filename, "Published document");
        Ok(Self {
            store,
            href,
            filename,
            mime_type,
        })
    }

    /// Where the document can be fetched.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Suggested download name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// MIME type of the document.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

impl Drop for DocumentHandle {
    fn drop(&mut self) {
        // release is best-effort; a stale href is harmless to the user
        if let Err(e) = self.store.revoke(&self.href) {
            warn!(href = %self.href, error = %e, "Failed to revoke document");
        }
    }
}

impl std::fmt::Debug for DocumentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentHandle")
            .field("href", &self.href)
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// Holds at most one live download for a view.
#[derive(Debug, Default)]
pub struct DownloadSlot {
    current: Option<DocumentHandle>,
}

impl DownloadSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new handle, releasing the previous one.
    pub fn replace(&mut self, handle: DocumentHandle) {
        // dropping the old handle revokes it
        self.current = Some(handle);
    }

    /// Publishes `document` and installs it. On failure the previous handle
    /// is kept.
    pub fn publish(
        &mut self,
        store: Arc<dyn DocumentStore>,
        document: StoredDocument,
    ) -> EngineResult<&DocumentHandle> {
        let handle = DocumentHandle::publish(store, document)?;
        Ok(self.current.insert(handle))
    }

    /// The live handle, if any.
    pub fn current(&self) -> Option<&DocumentHandle> {
        self.current.as_ref()
    }

    /// Releases the live handle, if any.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
