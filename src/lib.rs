use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod activity;
pub mod auth;
pub mod db;
pub mod document;
pub mod export;
pub mod user;

pub use crate::db::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn forbidden(message: &str) -> Self {
        Self::new("Forbidden", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::refresh_token,
        crate::auth::handlers::me,
        crate::auth::handlers::logout,
        crate::document::handlers::get_all_documents,
        crate::document::handlers::get_document_by_id,
        crate::document::handlers::create_document,
        crate::document::handlers::update_document,
        crate::document::handlers::delete_document,
        crate::document::handlers::submit_document,
        crate::document::handlers::approve_document,
        crate::document::handlers::reject_document,
        crate::export::handlers::export_document,
        crate::export::handlers::export_document_batch,
        crate::user::handlers::get_all_users,
        crate::user::handlers::create_user,
        crate::user::handlers::update_user,
        crate::user::handlers::delete_user,
        crate::activity::handlers::get_activities
    ),
    components(
        schemas(
            document::models::Document,
            document::models::DocumentType,
            document::models::DocumentStatus,
            document::models::CreateDocumentRequest,
            document::models::UpdateDocumentRequest,
            document::models::RejectRequest,
            user::models::Role,
            user::models::UserInfo,
            user::models::CreateUserRequest,
            user::models::UpdateUserRequest,
            activity::models::Activity,
            auth::model::LoginRequest,
            auth::model::LoginResponse,
            auth::model::TokenResponse,
            auth::model::RefreshRequest,
            export::PdfOptions,
            export::PageFormat,
            export::Orientation,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, token refresh and session endpoints."),
        (name = "Document Service", description = "Document CRUD and approval workflow endpoints."),
        (name = "Export", description = "PDF and certificate archive export endpoints."),
        (name = "User Service", description = "User management endpoints (admin only)."),
        (name = "Activity Service", description = "Audit log endpoints (admin only).")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Localhost Staging server")
    )
)]
struct ApiDoc;

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok(); // Load .env file

    let app_state = web::Data::new(AppState::new());

    let prometheus = PrometheusMetricsBuilder::new("hafecs_office_server")
        .registry(prometheus::default_registry().clone())
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    log::info!("Starting server at http://0.0.0.0:{}", port);

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:8080")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(
                web::scope("/api")
                    .configure(auth::handlers::config)
                    .configure(document::handlers::config)
                    .configure(user::handlers::config)
                    .configure(activity::handlers::config),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
