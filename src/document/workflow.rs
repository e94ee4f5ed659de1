//! Approval workflow for documents.
//!
//! Status transitions are one-directional: draft -> pending -> approved or
//! rejected. Approved and rejected are terminal. Every guarded operation
//! checks the actor before touching the document, so a failed call leaves
//! the record untouched.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use super::models::{Document, DocumentStatus};
use crate::user::models::Role;

/// Identity of the user performing a workflow action, taken from the
/// validated access token.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("transisi status {from} -> {to} tidak diizinkan")]
    InvalidTransition {
        from: DocumentStatus,
        to: DocumentStatus,
    },
    #[error("hanya pembuat dokumen yang dapat mengajukan persetujuan")]
    NotOwner,
    #[error("hanya kepala departemen yang dapat memproses persetujuan")]
    NotReviewer,
    #[error("alasan penolakan tidak boleh kosong")]
    EmptyReason,
}

fn ensure_transition(from: DocumentStatus, to: DocumentStatus) -> Result<(), WorkflowError> {
    if from.can_transition(to) {
        Ok(())
    } else {
        Err(WorkflowError::InvalidTransition { from, to })
    }
}

/// Submit a draft for approval (draft -> pending). Owner only.
pub fn submit(document: &mut Document, actor: &Actor) -> Result<(), WorkflowError> {
    if document.created_by != actor.id {
        return Err(WorkflowError::NotOwner);
    }
    ensure_transition(document.status, DocumentStatus::Pending)?;
    document.status = DocumentStatus::Pending;
    document.updated_at = Utc::now();
    Ok(())
}

/// Approve a pending document (pending -> approved). Reviewer role only.
pub fn approve(document: &mut Document, actor: &Actor) -> Result<(), WorkflowError> {
    if actor.role != Role::Hode {
        return Err(WorkflowError::NotReviewer);
    }
    ensure_transition(document.status, DocumentStatus::Approved)?;
    document.status = DocumentStatus::Approved;
    document.approved_by = Some(actor.id);
    document.approved_by_name = Some(actor.name.clone());
    document.updated_at = Utc::now();
    Ok(())
}

/// Reject a pending document (pending -> rejected). Reviewer role only,
/// and the reason must not be blank. The reason is stored on the record.
pub fn reject(document: &mut Document, actor: &Actor, reason: &str) -> Result<(), WorkflowError> {
    if actor.role != Role::Hode {
        return Err(WorkflowError::NotReviewer);
    }
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(WorkflowError::EmptyReason);
    }
    ensure_transition(document.status, DocumentStatus::Rejected)?;
    document.status = DocumentStatus::Rejected;
    document.approved_by = Some(actor.id);
    document.approved_by_name = Some(actor.name.clone());
    document.rejection_reason = Some(reason.to_string());
    document.updated_at = Utc::now();
    Ok(())
}

/// Admins may delete any document; the creator may delete only drafts.
pub fn can_delete(document: &Document, actor: &Actor) -> bool {
    actor.role == Role::Admin
        || (document.created_by == actor.id && document.status == DocumentStatus::Draft)
}

/// The creator may edit a document only while it is still a draft.
pub fn can_edit(document: &Document, actor: &Actor) -> bool {
    document.created_by == actor.id && document.status == DocumentStatus::Draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::models::{CreateDocumentRequest, DocumentType};

    fn draft_document(owner: &Actor) -> Document {
        Document::new(
            CreateDocumentRequest {
                doc_type: DocumentType::Surat,
                title: "Surat Tugas".to_string(),
                code: None,
                number: Some("007/ST/HAFECS/2026".to_string()),
                content: "Menugaskan yang bersangkutan ...".to_string(),
                participants: None,
            },
            owner.id,
            owner.name.clone(),
        )
    }

    fn staf() -> Actor {
        Actor {
            id: Uuid::new_v4(),
            name: "Siti Nurhaliza".to_string(),
            role: Role::Staf,
        }
    }

    fn hode() -> Actor {
        Actor {
            id: Uuid::new_v4(),
            name: "Budi Santoso".to_string(),
            role: Role::Hode,
        }
    }

    #[test]
    fn submit_moves_draft_to_pending_and_refreshes_updated_at() {
        let owner = staf();
        let mut doc = draft_document(&owner);
        let before = doc.updated_at;

        submit(&mut doc, &owner).expect("submit should succeed");

        assert_eq!(doc.status, DocumentStatus::Pending);
        assert!(doc.updated_at >= before);
    }

    #[test]
    fn submit_rejects_non_owner() {
        let owner = staf();
        let other = staf();
        let mut doc = draft_document(&owner);

        assert_eq!(submit(&mut doc, &other), Err(WorkflowError::NotOwner));
        assert_eq!(doc.status, DocumentStatus::Draft);
    }

    #[test]
    fn approve_sets_reviewer_identity() {
        let owner = staf();
        let reviewer = hode();
        let mut doc = draft_document(&owner);
        submit(&mut doc, &owner).unwrap();

        approve(&mut doc, &reviewer).expect("approve should succeed");

        assert_eq!(doc.status, DocumentStatus::Approved);
        assert_eq!(doc.approved_by, Some(reviewer.id));
        assert_eq!(doc.approved_by_name.as_deref(), Some("Budi Santoso"));
    }

    #[test]
    fn approve_requires_reviewer_role() {
        let owner = staf();
        let mut doc = draft_document(&owner);
        submit(&mut doc, &owner).unwrap();

        assert_eq!(approve(&mut doc, &owner), Err(WorkflowError::NotReviewer));
        assert_eq!(doc.status, DocumentStatus::Pending);
    }

    #[test]
    fn approve_rejects_draft() {
        let owner = staf();
        let reviewer = hode();
        let mut doc = draft_document(&owner);

        assert_eq!(
            approve(&mut doc, &reviewer),
            Err(WorkflowError::InvalidTransition {
                from: DocumentStatus::Draft,
                to: DocumentStatus::Approved,
            })
        );
    }

    #[test]
    fn reject_requires_non_blank_reason() {
        let owner = staf();
        let reviewer = hode();
        let mut doc = draft_document(&owner);
        submit(&mut doc, &owner).unwrap();
        let before = doc.updated_at;

        assert_eq!(
            reject(&mut doc, &reviewer, "   "),
            Err(WorkflowError::EmptyReason)
        );
        assert_eq!(doc.status, DocumentStatus::Pending);
        assert_eq!(doc.updated_at, before);
        assert!(doc.rejection_reason.is_none());
    }

    #[test]
    fn reject_stores_trimmed_reason() {
        let owner = staf();
        let reviewer = hode();
        let mut doc = draft_document(&owner);
        submit(&mut doc, &owner).unwrap();

        reject(&mut doc, &reviewer, "  Nomor surat salah  ").unwrap();

        assert_eq!(doc.status, DocumentStatus::Rejected);
        assert_eq!(doc.rejection_reason.as_deref(), Some("Nomor surat salah"));
        assert_eq!(doc.approved_by_name.as_deref(), Some("Budi Santoso"));
    }

    #[test]
    fn terminal_states_allow_no_further_transitions() {
        let owner = staf();
        let reviewer = hode();
        let mut doc = draft_document(&owner);
        submit(&mut doc, &owner).unwrap();
        approve(&mut doc, &reviewer).unwrap();

        assert!(doc.status.is_terminal());
        assert!(submit(&mut doc, &owner).is_err());
        assert!(approve(&mut doc, &reviewer).is_err());
        assert!(reject(&mut doc, &reviewer, "alasan").is_err());
        assert_eq!(doc.status, DocumentStatus::Approved);
    }

    #[test]
    fn delete_rules() {
        let owner = staf();
        let reviewer = hode();
        let admin = Actor {
            id: Uuid::new_v4(),
            name: "Dr. Ahmad Hasnur".to_string(),
            role: Role::Admin,
        };
        let mut doc = draft_document(&owner);

        assert!(can_delete(&doc, &owner));
        assert!(can_delete(&doc, &admin));
        assert!(!can_delete(&doc, &reviewer));

        submit(&mut doc, &owner).unwrap();
        assert!(!can_delete(&doc, &owner));
        assert!(can_delete(&doc, &admin));
    }
}
