// routes.rs - router assembly
//
// Public routes → user routes (JWT) → admin routes (JWT + role gate)

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::{admin_only_middleware, jwt_auth_middleware};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let protected = user_routes(&state)
        .merge(admin_routes())
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/api/login", post(public::login_post))
        .merge(protected)
        .nest_service("/uploads", ServeDir::new(&state.config.uploads.root))
        // Global middleware
        .layer(cors_layer(&state.config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any authenticated caller
fn user_routes(state: &AppState) -> Router<AppState> {
    use protected::{alumni, file, pekerjaan};

    // POST takes the category in the same segment GET/DELETE use for the id
    let files = Router::new()
        .route("/api/file", get(file::file_list))
        .route(
            "/api/file/:id",
            get(file::file_get).delete(file::file_delete).post(file::file_upload),
        )
        .layer(DefaultBodyLimit::max(state.config.uploads.max_request_bytes));

    Router::new()
        .route("/api/auth/whoami", get(protected::whoami_get))
        .route("/api/alumni", get(alumni::alumni_list))
        .route("/api/alumni/pag", get(alumni::alumni_paginated))
        .route("/api/alumni/:id", get(alumni::alumni_get))
        .route("/api/pekerjaan", get(pekerjaan::pekerjaan_list))
        .route("/api/pekerjaan/pag", get(pekerjaan::pekerjaan_paginated))
        .route("/api/pekerjaan/trash", get(pekerjaan::pekerjaan_trash))
        .route("/api/pekerjaan/:id", get(pekerjaan::pekerjaan_get))
        .route("/api/pekerjaan/:id/soft-delete", put(pekerjaan::pekerjaan_soft_delete))
        .route("/api/pekerjaan/:id/restore", put(pekerjaan::pekerjaan_restore))
        .route("/api/pekerjaan/hard/:id", delete(pekerjaan::pekerjaan_hard_delete))
        .merge(files)
}

/// Role `admin` only
fn admin_routes() -> Router<AppState> {
    use protected::{alumni, pekerjaan};

    Router::new()
        .route("/api/alumni", post(alumni::alumni_post))
        .route("/api/alumni/:id", put(alumni::alumni_put).delete(alumni::alumni_delete))
        .route("/api/pekerjaan", post(pekerjaan::pekerjaan_post))
        .route(
            "/api/pekerjaan/:id",
            put(pekerjaan::pekerjaan_put).delete(pekerjaan::pekerjaan_delete),
        )
        .route("/api/pekerjaan/tahun/:year", get(pekerjaan::pekerjaan_by_year))
        .route("/api/pekerjaan/alumni/:alumni_id", get(pekerjaan::pekerjaan_by_alumni))
        .route_layer(from_fn(admin_only_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
