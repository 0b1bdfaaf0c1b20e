//! Id-addressed storage for analyzed documents.

use crate::arena::Arena;
use crate::document::Document;
use crate::ids::DocumentId;
use tracing::debug;
use vellum_common::{InternalError, VellumResult};

#[derive(Debug, Clone)]
struct Slot {
    document: Document,
    container: Option<DocumentId>,
    children: Vec<DocumentId>,
}

/// Every document of an analysis, addressed by [`DocumentId`].
///
/// Inline documents are stored beside their containers and linked both ways:
/// the table records the parent/child edge, and the child carries a
/// [`DocumentBackreference`](crate::DocumentBackreference) feature naming the
/// container's id. Ids are never reused, so a stale id held elsewhere simply
/// stops resolving after its document is evicted.
#[derive(Debug, Clone, Default)]
pub struct DocumentTable {
    slots: Arena<DocumentId, Option<Slot>>,
    live: usize,
}

impl DocumentTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a top-level document and returns its id.
    pub fn insert(&mut self, document: Document) -> DocumentId {
        self.live += 1;
        self.slots.alloc(Some(Slot {
            document,
            container: None,
            children: Vec::new(),
        }))
    }

    /// Stores `document` as an inline child of `container`.
    ///
    /// Fails if `container` is not a live document.
    pub fn insert_inline(
        &mut self,
        container: DocumentId,
        document: Document,
    ) -> VellumResult<DocumentId> {
        if self.get(container).is_none() {
            return Err(InternalError::new(format!(
                "cannot add an inline document to {container}: no such document"
            )));
        }
        self.live += 1;
        let id = self.slots.alloc(Some(Slot {
            document,
            container: Some(container),
            children: Vec::new(),
        }));
        if let Some(Some(parent)) = self.slots.get_mut(container) {
            parent.children.push(id);
        }
        Ok(id)
    }

    /// Returns the live document with the given id.
    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.slot(id).map(|slot| &slot.document)
    }

    /// Returns `true` if `id` names a live document.
    pub fn contains(&self, id: DocumentId) -> bool {
        self.slot(id).is_some()
    }

    /// Follows the backreference of inline document `id` to its container.
    ///
    /// Returns `None` for top-level documents and when the container is gone.
    pub fn container_of(&self, id: DocumentId) -> Option<&Document> {
        let back = self.get(id)?.backreference()?;
        self.get(back.container)
    }

    /// Ids of the inline documents directly inside `id`, in insertion order.
    pub fn children_of(&self, id: DocumentId) -> &[DocumentId] {
        self.slot(id)
            .map(|slot| slot.children.as_slice())
            .unwrap_or_default()
    }

    /// Removes a document and, recursively, all of its inline documents.
    ///
    /// Returns the removed document, or `None` if `id` was not live. Other
    /// ids are unaffected.
    pub fn evict(&mut self, id: DocumentId) -> Option<Document> {
        let slot = self.slots.get_mut(id)?.take()?;
        self.live -= 1;
        debug!(%id, url = %slot.document.url().display(), "evicting document");
        if let Some(parent) = slot.container {
            if let Some(Some(parent)) = self.slots.get_mut(parent) {
                parent.children.retain(|child| *child != id);
            }
        }
        for child in slot.children {
            self.evict(child);
        }
        Some(slot.document)
    }

    /// Swaps a re-analyzed document in under an existing id.
    ///
    /// The previous document's inline children are evicted, since the new
    /// document's inline documents are added afresh. Returns the previous
    /// document.
    pub fn replace(&mut self, id: DocumentId, document: Document) -> VellumResult<Document> {
        let children = match self.slot(id) {
            Some(slot) => slot.children.clone(),
            None => {
                return Err(InternalError::new(format!(
                    "cannot replace {id}: no such document"
                )))
            }
        };
        for child in children {
            self.evict(child);
        }
        match self.slots.get_mut(id) {
            Some(Some(slot)) => Ok(std::mem::replace(&mut slot.document, document)),
            _ => Err(InternalError::new(format!("{id} vanished during replace"))),
        }
    }

    /// Iterates over live documents in id order.
    pub fn iter(&self) -> impl Iterator<Item = (DocumentId, &Document)> {
        self.slots
            .iter()
            .filter_map(|(id, slot)| slot.as_ref().map(|slot| (id, &slot.document)))
    }

    /// Number of live documents.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if no documents are live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    fn slot(&self, id: DocumentId) -> Option<&Slot> {
        self.slots.get(id).and_then(Option::as_ref)
    }
}
