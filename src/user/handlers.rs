use actix_web::{web, HttpRequest, HttpResponse, Responder};
use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use uuid::Uuid;

use super::models::{CreateUserRequest, Role, UpdateUserRequest, User, UserInfo};
use crate::auth::middleware::require_role;
use crate::AppState;

/// List all users (admin only)
#[utoipa::path(
    context_path = "/api",
    tag = "User Service",
    get,
    path = "/users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of users", body = [UserInfo]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_all_users(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    if let Err(e) = require_role(&req, Role::Admin) {
        return e.error_response();
    }

    let users: Vec<UserInfo> = state.get_all_users().into_iter().map(UserInfo::from).collect();
    HttpResponse::Ok().json(users)
}

/// Create a new user (admin only)
#[utoipa::path(
    context_path = "/api",
    tag = "User Service",
    post,
    path = "/users",
    request_body = CreateUserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "User created", body = UserInfo),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> impl Responder {
    let actor = match require_role(&req, Role::Admin) {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    if state.get_user_by_email(&body.email).is_some() {
        return HttpResponse::Conflict()
            .json(crate::ErrorResponse::new("Conflict", "Email already exists"));
    }

    let password_hash = match hash(&body.password, DEFAULT_COST) {
        Ok(h) => h,
        Err(e) => {
            log::error!("Failed to hash password: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to create user"));
        }
    };

    let user = User {
        id: Uuid::new_v4(),
        name: body.name.clone(),
        email: body.email.clone(),
        role: body.role,
        department: body.department.clone(),
        created_at: Utc::now(),
        is_active: true,
        password_hash,
        refresh_token: None,
    };

    state.insert_user(user.clone());
    state.record_activity(actor.id, &actor.name, "Membuat pengguna", &user.email, None);

    HttpResponse::Created().json(UserInfo::from(user))
}

/// Update a user (admin only)
#[utoipa::path(
    context_path = "/api",
    tag = "User Service",
    put,
    path = "/users/{id}",
    request_body = UpdateUserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User updated", body = UserInfo),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    ),
    params(("id" = Uuid, Path, description = "User ID"))
)]
pub async fn update_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
) -> impl Responder {
    let actor = match require_role(&req, Role::Admin) {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    let update = body.into_inner();
    let password_hash = match &update.password {
        Some(password) => match hash(password, DEFAULT_COST) {
            Ok(h) => Some(h),
            Err(e) => {
                log::error!("Failed to hash password: {:?}", e);
                return HttpResponse::InternalServerError()
                    .json(crate::ErrorResponse::internal_error("Failed to update user"));
            }
        },
        None => None,
    };

    let updated = state.update_user(&path.into_inner(), |user| {
        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(department) = &update.department {
            user.department = Some(department.clone());
        }
        if let Some(is_active) = update.is_active {
            user.is_active = is_active;
            if !is_active {
                user.refresh_token = None;
            }
        }
        if let Some(password_hash) = password_hash {
            user.password_hash = password_hash;
        }
    });

    match updated {
        Some(user) => {
            state.record_activity(actor.id, &actor.name, "Mengubah pengguna", &user.email, None);
            HttpResponse::Ok().json(UserInfo::from(user))
        }
        None => HttpResponse::NotFound().json(crate::ErrorResponse::not_found("User not found")),
    }
}

/// Delete a user (admin only)
#[utoipa::path(
    context_path = "/api",
    tag = "User Service",
    delete,
    path = "/users/{id}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Deletion not allowed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    ),
    params(("id" = Uuid, Path, description = "User ID"))
)]
pub async fn delete_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let actor = match require_role(&req, Role::Admin) {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    let user_id = path.into_inner();

    // Prevent self-deletion
    if actor.id == user_id {
        return HttpResponse::BadRequest().json(crate::ErrorResponse::bad_request(
            "Cannot delete your own account",
        ));
    }

    let target = match state.get_user(&user_id) {
        Some(user) => user,
        None => {
            return HttpResponse::NotFound()
                .json(crate::ErrorResponse::not_found("User not found"));
        }
    };

    // Ensure at least one active admin remains
    if target.role == Role::Admin && state.active_admin_count() <= 1 {
        return HttpResponse::BadRequest().json(crate::ErrorResponse::bad_request(
            "Cannot delete the last admin",
        ));
    }

    if !state.delete_user(&user_id) {
        return HttpResponse::NotFound().json(crate::ErrorResponse::not_found("User not found"));
    }

    state.record_activity(actor.id, &actor.name, "Menghapus pengguna", &target.email, None);
    HttpResponse::Ok().finish()
}

/// Configure user management routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::get().to(get_all_users))
            .route(web::post().to(create_user)),
    )
    .service(
        web::resource("/users/{id}")
            .route(web::put().to(update_user))
            .route(web::delete().to(delete_user)),
    );
}
