use actix_web::error::{ErrorForbidden, ErrorUnauthorized};
use actix_web::{Error, HttpRequest};
use uuid::Uuid;

use super::jwt::validate_token;
use super::model::Claims;
use crate::document::workflow::Actor;
use crate::user::models::Role;

/// Extract token from Authorization header
fn extract_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(str::to_string))
}

/// Validate token from HttpRequest and return claims
pub fn validate_request_token(req: &HttpRequest) -> Result<Claims, Error> {
    let token =
        extract_token(req).ok_or_else(|| ErrorUnauthorized("Missing authorization token"))?;

    let claims = validate_token(&token).map_err(|e| {
        log::warn!("Token validation failed: {:?}", e);
        ErrorUnauthorized("Invalid or expired token")
    })?;

    if claims.token_type != "access" {
        return Err(ErrorUnauthorized("Invalid token type"));
    }

    Ok(claims)
}

/// Validate the request token and turn its claims into a workflow actor.
pub fn require_actor(req: &HttpRequest) -> Result<Actor, Error> {
    let claims = validate_request_token(req)?;
    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ErrorUnauthorized("Invalid subject in token"))?;
    Ok(Actor {
        id,
        name: claims.name,
        role: claims.role,
    })
}

/// Like [`require_actor`] but additionally requires a specific role.
pub fn require_role(req: &HttpRequest, role: Role) -> Result<Actor, Error> {
    let actor = require_actor(req)?;
    if actor.role != role {
        return Err(ErrorForbidden("Insufficient role for this operation"));
    }
    Ok(actor)
}
