use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Jenis dokumen yang dikelola yayasan.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Surat resmi (undangan, keterangan, tugas, ...).
    Surat,
    /// Sertifikat pelatihan, satu lembar per peserta.
    Sertifikat,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Surat => write!(f, "surat"),
            DocumentType::Sertifikat => write!(f, "sertifikat"),
        }
    }
}

/// Status dokumen dalam alur persetujuan.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl DocumentStatus {
    /// Whether a transition from `self` to `to` is allowed by the workflow.
    pub fn can_transition(self, to: DocumentStatus) -> bool {
        matches!(
            (self, to),
            (DocumentStatus::Draft, DocumentStatus::Pending)
                | (DocumentStatus::Pending, DocumentStatus::Approved)
                | (DocumentStatus::Pending, DocumentStatus::Rejected)
        )
    }

    /// Approved and rejected documents cannot change status anymore.
    pub fn is_terminal(self) -> bool {
        matches!(self, DocumentStatus::Approved | DocumentStatus::Rejected)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Pending => "pending",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct Document {
    #[schema(example = "f1e2d3c4-b5a6-7890-1234-567890abcdef")]
    pub id: Uuid,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[schema(example = "Surat Undangan Pelatihan Guru")]
    pub title: String,
    #[schema(example = "SU")]
    pub code: Option<String>,
    #[schema(example = "001/SU/HAFECS/2026")]
    pub number: Option<String>,
    #[schema(example = "Dengan hormat,\n\nKami mengundang Bapak/Ibu ...")]
    pub content: String,
    pub status: DocumentStatus,
    pub created_by: Uuid,
    #[schema(example = "Siti Nurhaliza")]
    pub created_by_name: String,
    pub approved_by: Option<Uuid>,
    pub approved_by_name: Option<String>,
    /// Alasan penolakan, diisi saat dokumen ditolak.
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Daftar nama peserta, hanya dipakai untuk sertifikat.
    pub participants: Option<Vec<String>>,
}

impl Document {
    pub fn new(request: CreateDocumentRequest, created_by: Uuid, created_by_name: String) -> Self {
        let now = Utc::now();
        Document {
            id: Uuid::new_v4(),
            doc_type: request.doc_type,
            title: request.title,
            code: request.code,
            number: request.number,
            content: request.content,
            status: DocumentStatus::Draft,
            created_by,
            created_by_name,
            approved_by: None,
            approved_by_name: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
            participants: request.participants,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDocumentRequest {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[schema(example = "Surat Undangan Pelatihan Guru")]
    pub title: String,
    pub code: Option<String>,
    #[schema(example = "001/SU/HAFECS/2026")]
    pub number: Option<String>,
    pub content: String,
    pub participants: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub code: Option<String>,
    pub number: Option<String>,
    pub content: Option<String>,
    pub participants: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RejectRequest {
    #[schema(example = "Nomor surat belum sesuai format arsip.")]
    pub reason: String,
}

/// Query string filters for the document list endpoint.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DocumentFilter {
    /// Batasi ke satu jenis dokumen.
    #[serde(rename = "type")]
    pub doc_type: Option<DocumentType>,
    /// Batasi ke satu status.
    pub status: Option<DocumentStatus>,
    /// Hanya dokumen milik pengguna yang sedang login.
    pub mine: Option<bool>,
    /// Pencarian pada judul dan nomor, tidak peka huruf besar/kecil.
    pub search: Option<String>,
}

impl DocumentFilter {
    pub fn matches(&self, document: &Document, actor_id: Uuid) -> bool {
        if let Some(doc_type) = self.doc_type {
            if document.doc_type != doc_type {
                return false;
            }
        }
        if let Some(status) = self.status {
            if document.status != status {
                return false;
            }
        }
        if self.mine.unwrap_or(false) && document.created_by != actor_id {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if needle.is_empty() {
                return true;
            }
            let in_title = document.title.to_lowercase().contains(&needle);
            let in_number = document
                .number
                .as_deref()
                .map(|n| n.to_lowercase().contains(&needle))
                .unwrap_or(false);
            if !in_title && !in_number {
                return false;
            }
        }
        true
    }
}
