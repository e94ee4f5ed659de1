use actix_web::{web, HttpRequest, HttpResponse, Responder};

use super::models::{Activity, ActivityFilter};
use crate::auth::middleware::require_role;
use crate::user::models::Role;
use crate::AppState;

/// List audit log entries, newest first (admin only).
#[utoipa::path(
    context_path = "/api",
    tag = "Activity Service",
    get,
    path = "/activities",
    params(ActivityFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Audit log entries", body = [Activity]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_activities(
    req: HttpRequest,
    state: web::Data<AppState>,
    filter: web::Query<ActivityFilter>,
) -> impl Responder {
    if let Err(e) = require_role(&req, Role::Admin) {
        return e.error_response();
    }

    HttpResponse::Ok().json(state.recent_activities(filter.limit))
}

/// Configure activity routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/activities").route(web::get().to(get_activities)));
}
