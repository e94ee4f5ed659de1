//! User collection operations.

use super::AppState;
use chrono::Utc;
use uuid::Uuid;

use crate::user::models::{Role, User};

/// Demo accounts created at startup. Passwords are hashed before they
/// enter the store; the plaintext never leaves this function.
const DEMO_USERS: &[(&str, &str, Role, &str, Option<&str>)] = &[
    (
        "Dr. Ahmad Hasnur",
        "admin@hafecs.org",
        Role::Admin,
        "admin123",
        None,
    ),
    (
        "Siti Nurhaliza",
        "staf@hafecs.org",
        Role::Staf,
        "staf123",
        Some("Diklat"),
    ),
    (
        "Budi Santoso",
        "hode@hafecs.org",
        Role::Hode,
        "hode123",
        Some("Diklat"),
    ),
];

impl AppState {
    pub(super) fn seed_demo_users(&self) {
        let mut users = self.users.write();
        for (name, email, role, password, department) in DEMO_USERS {
            let password_hash = match bcrypt::hash(password, bcrypt::DEFAULT_COST) {
                Ok(hash) => hash,
                Err(e) => {
                    log::error!("Failed to hash seed password for {}: {:?}", email, e);
                    continue;
                }
            };
            users.push(User {
                id: Uuid::new_v4(),
                name: name.to_string(),
                email: email.to_string(),
                role: *role,
                department: department.map(str::to_string),
                created_at: Utc::now(),
                is_active: true,
                password_hash,
                refresh_token: None,
            });
        }
        log::info!("Seeded {} demo users", users.len());
    }

    pub fn get_all_users(&self) -> Vec<User> {
        self.users.read().clone()
    }

    pub fn get_user(&self, id: &Uuid) -> Option<User> {
        self.users.read().iter().find(|u| &u.id == id).cloned()
    }

    pub fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub fn get_user_by_refresh_token(&self, refresh_token: &str) -> Option<User> {
        self.users
            .read()
            .iter()
            .find(|u| u.refresh_token.as_deref() == Some(refresh_token))
            .cloned()
    }

    pub fn insert_user(&self, user: User) {
        self.users.write().push(user);
    }

    /// Apply `apply` to the user with the given id. Returns the updated
    /// record, or `None` if no such user exists.
    pub fn update_user<F>(&self, id: &Uuid, apply: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write();
        let user = users.iter_mut().find(|u| &u.id == id)?;
        apply(user);
        Some(user.clone())
    }

    /// Store (or clear) the single-session refresh token for a user.
    pub fn set_refresh_token(&self, id: &Uuid, refresh_token: Option<String>) -> bool {
        self.update_user(id, |user| user.refresh_token = refresh_token)
            .is_some()
    }

    pub fn delete_user(&self, id: &Uuid) -> bool {
        let mut users = self.users.write();
        let initial_len = users.len();
        users.retain(|u| &u.id != id);
        users.len() != initial_len
    }

    pub fn active_admin_count(&self) -> usize {
        self.users
            .read()
            .iter()
            .filter(|u| u.role == Role::Admin && u.is_active)
            .count()
    }
}
