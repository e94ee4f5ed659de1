use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One entry in the append-only audit log. Entries are never edited or
/// removed over the API.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct Activity {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "Siti Nurhaliza")]
    pub user_name: String,
    #[schema(example = "Mengajukan persetujuan")]
    pub action: String,
    #[schema(example = "Surat Undangan Pelatihan Guru")]
    pub target: String,
    pub timestamp: DateTime<Utc>,
    pub details: Option<String>,
}

/// Query string parameters for the activity list endpoint.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ActivityFilter {
    /// Maximum number of entries to return, newest first.
    pub limit: Option<usize>,
}
