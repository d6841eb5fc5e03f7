// handlers/public/system.rs - GET / and GET /health

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Alumni API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "login": "/api/login (public)",
                "alumni": "/api/alumni[/pag|/:id] (protected; writes require admin)",
                "pekerjaan": "/api/pekerjaan[/pag|/trash|/:id] (protected; writes require admin)",
                "file": "/api/file[/:category|/:id] (protected)",
                "uploads": "/uploads/* (static)",
            }
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let database = match &state.db {
        Some(db) => db.health_check().await.map(|_| "ok"),
        None => Ok("memory"),
    };

    match database {
        Ok(database) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": database
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
