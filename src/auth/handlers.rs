use actix_web::{web, HttpRequest, HttpResponse, Responder};
use bcrypt::verify;

use super::jwt::{
    generate_access_token, generate_refresh_token, get_access_token_expiry, validate_token,
};
use super::middleware::validate_request_token;
use super::model::{LoginRequest, LoginResponse, RefreshRequest, TokenResponse};
use crate::user::models::UserInfo;
use crate::AppState;

const INVALID_CREDENTIALS: &str = "Email atau password salah";

/// Login endpoint. The same generic message is returned for an unknown
/// email, a wrong password and an inactive account.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> impl Responder {
    let user = match state.get_user_by_email(&body.email) {
        Some(user) => user,
        None => {
            return HttpResponse::Unauthorized()
                .json(crate::ErrorResponse::new("Unauthorized", INVALID_CREDENTIALS));
        }
    };

    let password_valid = verify(&body.password, &user.password_hash).unwrap_or(false);
    if !password_valid || !user.is_active {
        return HttpResponse::Unauthorized()
            .json(crate::ErrorResponse::new("Unauthorized", INVALID_CREDENTIALS));
    }

    let user_id = user.id.to_string();
    let access_token = match generate_access_token(&user_id, &user.name, user.role) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Failed to generate access token: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to generate token"));
        }
    };

    let refresh_token = match generate_refresh_token(&user_id, &user.name, user.role) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Failed to generate refresh token: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to generate token"));
        }
    };

    // Single device session: a new login invalidates the previous one.
    state.set_refresh_token(&user.id, Some(refresh_token.clone()));
    state.record_activity(user.id, &user.name, "Login", "Sesi", None);

    HttpResponse::Ok().json(LoginResponse {
        user: UserInfo::from(user),
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: get_access_token_expiry(),
    })
}

/// Refresh access token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "Authentication",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token refreshed", body = TokenResponse),
        (status = 401, description = "Invalid refresh token")
    )
)]
pub async fn refresh_token(
    state: web::Data<AppState>,
    body: web::Json<RefreshRequest>,
) -> impl Responder {
    let claims = match validate_token(&body.refresh_token) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Invalid refresh token: {:?}", e);
            return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
                "Unauthorized",
                "Invalid or expired refresh token",
            ));
        }
    };

    if claims.token_type != "refresh" {
        return HttpResponse::Unauthorized()
            .json(crate::ErrorResponse::new("Unauthorized", "Invalid token type"));
    }

    // The token must also match the stored single-session token.
    let user = match state.get_user_by_refresh_token(&body.refresh_token) {
        Some(user) => user,
        None => {
            return HttpResponse::Unauthorized().json(crate::ErrorResponse::new(
                "Unauthorized",
                "Session expired. Please login again.",
            ));
        }
    };

    let access_token = match generate_access_token(&user.id.to_string(), &user.name, user.role) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Failed to generate access token: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to generate token"));
        }
    };

    HttpResponse::Ok().json(TokenResponse {
        access_token,
        refresh_token: body.refresh_token.clone(),
        token_type: "Bearer".to_string(),
        expires_in: get_access_token_expiry(),
    })
}

/// Profile of the logged-in user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserInfo),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let claims = match validate_request_token(&req) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let user_id = match uuid::Uuid::parse_str(&claims.sub) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::Unauthorized()
                .json(crate::ErrorResponse::new("Unauthorized", "Invalid token subject"));
        }
    };

    match state.get_user(&user_id) {
        Some(user) => HttpResponse::Ok().json(UserInfo::from(user)),
        None => HttpResponse::NotFound().json(crate::ErrorResponse::not_found("User not found")),
    }
}

/// Logout: clears the stored refresh token
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let claims = match validate_request_token(&req) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    if let Ok(user_id) = uuid::Uuid::parse_str(&claims.sub) {
        state.set_refresh_token(&user_id, None);
        state.record_activity(user_id, &claims.name, "Logout", "Sesi", None);
    }

    HttpResponse::Ok().finish()
}

/// Configure auth routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh_token))
            .route("/me", web::get().to(me))
            .route("/logout", web::post().to(logout)),
    );
}
