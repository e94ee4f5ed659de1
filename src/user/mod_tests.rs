use chrono::Utc;
use uuid::Uuid;

use super::models::{Role, User, UserInfo};

fn sample_user() -> User {
    User {
        id: Uuid::new_v4(),
        name: "Siti Nurhaliza".to_string(),
        email: "staf@hafecs.org".to_string(),
        role: Role::Staf,
        department: Some("Diklat".to_string()),
        created_at: Utc::now(),
        is_active: true,
        password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
        refresh_token: Some("some-refresh-token".to_string()),
    }
}

#[test]
fn test_user_info_drops_credentials() {
    let user = sample_user();
    let info = UserInfo::from(user.clone());

    assert_eq!(info.id, user.id);
    assert_eq!(info.email, user.email);
    assert_eq!(info.role, Role::Staf);

    let json = serde_json::to_string(&info).unwrap();
    assert!(!json.contains("password"));
    assert!(!json.contains("refresh_token"));
    assert!(!json.contains(&user.password_hash));
}

#[test]
fn test_role_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "admin");
    assert_eq!(serde_json::to_value(Role::Staf).unwrap(), "staf");
    assert_eq!(serde_json::to_value(Role::Hode).unwrap(), "hode");

    let role: Role = serde_json::from_str("\"hode\"").unwrap();
    assert_eq!(role, Role::Hode);
}

#[test]
fn test_role_display_matches_wire_format() {
    for role in [Role::Admin, Role::Staf, Role::Hode] {
        let wire = serde_json::to_value(role).unwrap();
        assert_eq!(wire, role.to_string());
    }
}
