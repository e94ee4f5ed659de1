use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Peran pengguna di aplikasi.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator: kelola pengguna dan seluruh dokumen.
    Admin,
    /// Staf: pembuat surat dan sertifikat.
    Staf,
    /// Kepala departemen (HODE): menyetujui atau menolak dokumen.
    Hode,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Staf => write!(f, "staf"),
            Role::Hode => write!(f, "hode"),
        }
    }
}

/// User record as stored in application state. Carries the password hash
/// and the current refresh token, so it never goes over the wire as-is.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    pub password_hash: String,
    pub refresh_token: Option<String>,
}

/// User profile for API responses (without sensitive data).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    pub id: Uuid,
    #[schema(example = "Siti Nurhaliza")]
    pub name: String,
    #[schema(example = "staf@hafecs.org")]
    pub email: String,
    pub role: Role,
    #[schema(example = "Diklat")]
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            department: user.department,
            created_at: user.created_at,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub department: Option<String>,
    pub is_active: Option<bool>,
}
