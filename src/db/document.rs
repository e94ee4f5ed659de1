//! Document collection operations.

use super::AppState;
use uuid::Uuid;

use crate::document::models::Document;

impl AppState {
    pub fn get_all_documents(&self) -> Vec<Document> {
        self.documents.read().clone()
    }

    pub fn get_document(&self, id: &Uuid) -> Option<Document> {
        self.documents.read().iter().find(|d| &d.id == id).cloned()
    }

    pub fn insert_document(&self, document: Document) {
        self.documents.write().push(document);
    }

    /// Apply `apply` to the document with the given id while holding the
    /// write lock, returning its result. `None` if no such document.
    pub fn update_document<F, T>(&self, id: &Uuid, apply: F) -> Option<T>
    where
        F: FnOnce(&mut Document) -> T,
    {
        let mut documents = self.documents.write();
        let document = documents.iter_mut().find(|d| &d.id == id)?;
        Some(apply(document))
    }

    pub fn delete_document(&self, id: &Uuid) -> bool {
        let mut documents = self.documents.write();
        let initial_len = documents.len();
        documents.retain(|d| &d.id != id);
        documents.len() != initial_len
    }
}
