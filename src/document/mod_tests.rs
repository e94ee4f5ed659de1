use chrono::Utc;
use uuid::Uuid;

use super::models::{
    CreateDocumentRequest, Document, DocumentFilter, DocumentStatus, DocumentType,
};

fn surat_request(title: &str) -> CreateDocumentRequest {
    CreateDocumentRequest {
        doc_type: DocumentType::Surat,
        title: title.to_string(),
        code: Some("SU".to_string()),
        number: Some("001/SU/HAFECS/2026".to_string()),
        content: "Dengan hormat,\n\nIsi surat.".to_string(),
        participants: None,
    }
}

#[test]
fn test_document_new_starts_as_draft() {
    let creator = Uuid::new_v4();
    let document = Document::new(
        surat_request("Surat Undangan"),
        creator,
        "Siti Nurhaliza".to_string(),
    );

    assert_ne!(document.id, Uuid::nil());
    assert_eq!(document.status, DocumentStatus::Draft);
    assert_eq!(document.created_by, creator);
    assert_eq!(document.created_by_name, "Siti Nurhaliza");
    assert_eq!(document.created_at, document.updated_at);
    assert!(document.approved_by.is_none());
    assert!(document.rejection_reason.is_none());
}

#[test]
fn test_document_serializes_type_field() {
    let document = Document::new(
        surat_request("Surat Tugas"),
        Uuid::new_v4(),
        "Siti Nurhaliza".to_string(),
    );

    let json = serde_json::to_value(&document).unwrap();
    assert_eq!(json["type"], "surat");
    assert_eq!(json["status"], "draft");
    assert!(json.get("doc_type").is_none());
}

#[test]
fn test_status_transitions() {
    assert!(DocumentStatus::Draft.can_transition(DocumentStatus::Pending));
    assert!(DocumentStatus::Pending.can_transition(DocumentStatus::Approved));
    assert!(DocumentStatus::Pending.can_transition(DocumentStatus::Rejected));

    assert!(!DocumentStatus::Draft.can_transition(DocumentStatus::Approved));
    assert!(!DocumentStatus::Approved.can_transition(DocumentStatus::Pending));
    assert!(!DocumentStatus::Rejected.can_transition(DocumentStatus::Draft));
    assert!(!DocumentStatus::Pending.can_transition(DocumentStatus::Pending));
}

#[test]
fn test_terminal_statuses() {
    assert!(DocumentStatus::Approved.is_terminal());
    assert!(DocumentStatus::Rejected.is_terminal());
    assert!(!DocumentStatus::Draft.is_terminal());
    assert!(!DocumentStatus::Pending.is_terminal());
}

#[test]
fn test_filter_matches_type_and_status() {
    let document = Document::new(
        surat_request("Surat Undangan"),
        Uuid::new_v4(),
        "Siti Nurhaliza".to_string(),
    );

    let filter = DocumentFilter {
        doc_type: Some(DocumentType::Surat),
        status: Some(DocumentStatus::Draft),
        mine: None,
        search: None,
    };
    assert!(filter.matches(&document, Uuid::new_v4()));

    let filter = DocumentFilter {
        doc_type: Some(DocumentType::Sertifikat),
        status: None,
        mine: None,
        search: None,
    };
    assert!(!filter.matches(&document, Uuid::new_v4()));
}

#[test]
fn test_filter_mine_checks_creator() {
    let creator = Uuid::new_v4();
    let document = Document::new(
        surat_request("Surat Undangan"),
        creator,
        "Siti Nurhaliza".to_string(),
    );

    let filter = DocumentFilter {
        doc_type: None,
        status: None,
        mine: Some(true),
        search: None,
    };
    assert!(filter.matches(&document, creator));
    assert!(!filter.matches(&document, Uuid::new_v4()));
}

#[test]
fn test_filter_search_is_case_insensitive() {
    let document = Document::new(
        surat_request("Surat Undangan Pelatihan"),
        Uuid::new_v4(),
        "Siti Nurhaliza".to_string(),
    );

    let by_title = DocumentFilter {
        doc_type: None,
        status: None,
        mine: None,
        search: Some("undangan".to_string()),
    };
    assert!(by_title.matches(&document, Uuid::new_v4()));

    let by_number = DocumentFilter {
        doc_type: None,
        status: None,
        mine: None,
        search: Some("001/su".to_string()),
    };
    assert!(by_number.matches(&document, Uuid::new_v4()));

    let no_match = DocumentFilter {
        doc_type: None,
        status: None,
        mine: None,
        search: Some("rapat anggaran".to_string()),
    };
    assert!(!no_match.matches(&document, Uuid::new_v4()));
}

#[test]
fn test_sertifikat_keeps_participants() {
    let request = CreateDocumentRequest {
        doc_type: DocumentType::Sertifikat,
        title: "Pelatihan Guru Fisika".to_string(),
        code: None,
        number: None,
        content: "Telah mengikuti pelatihan.".to_string(),
        participants: Some(vec!["Andi Wijaya".to_string(), "Rina Kartika".to_string()]),
    };
    let before = Utc::now();
    let document = Document::new(request, Uuid::new_v4(), "Siti Nurhaliza".to_string());

    assert_eq!(document.doc_type, DocumentType::Sertifikat);
    assert_eq!(
        document.participants.as_deref(),
        Some(["Andi Wijaya".to_string(), "Rina Kartika".to_string()].as_slice())
    );
    assert!(document.created_at >= before);
}
